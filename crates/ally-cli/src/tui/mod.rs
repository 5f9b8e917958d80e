pub mod app;
pub mod event;
mod views;
mod widgets;

use std::sync::Arc;
use std::time::Duration;

use ally_core::session::{Route, Session};
use ally_core::AppSession;
use anyhow::Result;
use crossterm::event::{self as ct_event, Event};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::{mpsc, watch};

use self::app::{App, Screen};
use self::event::{AsyncAction, AsyncResult};

/// Entry point for the interactive landing screen.
pub async fn run_tui(
    session: AppSession,
    nav: mpsc::UnboundedReceiver<Route>,
    api_url: &str,
) -> Result<()> {
    let session = Arc::new(session);

    // Channels for async communication
    let (action_tx, action_rx) = mpsc::unbounded_channel::<AsyncAction>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    // Relay controller updates and navigation signals to the UI
    tokio::spawn(relay_loop(session.subscribe(), nav, result_tx));

    // Spawn async worker
    tokio::spawn(worker_loop(session, action_rx));

    action_tx.send(AsyncAction::Initialize)?;

    let mut terminal = ratatui::init();
    let mut app = App::new();

    let result = run_loop(&mut terminal, &mut app, &action_tx, &mut result_rx, api_url);

    ratatui::restore();

    result
}

fn run_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    action_tx: &mpsc::UnboundedSender<AsyncAction>,
    result_rx: &mut mpsc::UnboundedReceiver<AsyncResult>,
    api_url: &str,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app, api_url))?;

        while let Ok(result) = result_rx.try_recv() {
            app.handle_result(result);
        }

        // 50ms poll keeps the loading line responsive
        if ct_event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = ct_event::read()? {
                if let Some(action) = app.handle_key(key) {
                    let _ = action_tx.send(action);
                }
            }
        }

        app.tick_error();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App, api_url: &str) {
    use ratatui::layout::{Constraint, Layout};

    let [body, help] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    match app.screen {
        Screen::Landing => views::landing::render(frame, app, body, api_url),
        Screen::Dashboard => views::dashboard::render(frame, app, body),
    }

    frame.render_widget(
        widgets::help_bar::HelpBar {
            screen: &app.screen,
            authenticated: app.session.is_authenticated(),
        },
        help,
    );

    if let Some(ref msg) = app.error_message {
        render_error_toast(frame, msg);
    }
}

fn render_error_toast(frame: &mut Frame, msg: &str) {
    use ratatui::{
        layout::{Constraint, Flex, Layout},
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph},
    };

    let area = frame.area();
    let [toast_area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(area);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(toast_area);

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(format!(" ✗ {msg}"))
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(toast, toast_area);
}

/// Async worker loop: runs session actions against the controller.
async fn worker_loop(session: Arc<AppSession>, mut action_rx: mpsc::UnboundedReceiver<AsyncAction>) {
    while let Some(action) = action_rx.recv().await {
        tracing::debug!(?action, "tui action");
        match action {
            AsyncAction::Initialize => {
                session.initialize().await;
            }
            AsyncAction::Logout => {
                session.logout();
            }
        }
    }
}

/// Forward every published session and navigation signal until the UI goes away.
async fn relay_loop(
    mut updates: watch::Receiver<Session>,
    mut nav: mpsc::UnboundedReceiver<Route>,
    result_tx: mpsc::UnboundedSender<AsyncResult>,
) {
    loop {
        let result = tokio::select! {
            changed = updates.changed() => match changed {
                Ok(()) => AsyncResult::Session(updates.borrow_and_update().clone()),
                Err(_) => break,
            },
            route = nav.recv() => match route {
                Some(route) => AsyncResult::Navigate(route),
                None => break,
            },
        };
        if result_tx.send(result).is_err() {
            break; // UI closed
        }
    }
}
