mod tui;

use std::io::{BufRead, Write};

use ally_core::api::ApiClient;
use ally_core::config::{AllyConfig, SUPABASE_ANON_KEY_ENV, SUPABASE_URL_ENV};
use ally_core::model::*;
use ally_core::session::{Route, Session, SessionState, LOGIN_FAILED, REGISTRATION_FAILED};
use ally_core::AppSession;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ally",
    about = "Anxiety Ally: journaling, mood tracking, and calming exercises",
    version
)]
enum Cli {
    /// Sign in and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account, then sign in with it
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Full name shown on the profile
        #[arg(short, long)]
        name: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show configuration and session status
    Status {
        /// Also print the effective configuration as TOML
        #[arg(long)]
        config: bool,
    },
    /// Manage journal entries
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Log and review moods
    #[command(subcommand)]
    Mood(MoodCommand),
    /// Talk to the AI companion (interactive when no message is given)
    Chat {
        /// Message to send
        message: Option<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze the sentiment of a piece of text
    Sentiment {
        /// Text to analyze
        text: String,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List guided breathing exercises
    Breathing {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the interactive landing screen
    Home,
}

#[derive(Subcommand)]
enum JournalCommand {
    /// List journal entries, newest first
    List(ListArgs),
    /// Show one entry in full
    Get {
        /// Entry ID
        id: String,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a new entry
    Create {
        /// Entry title
        #[arg(short, long)]
        title: String,
        /// Entry body
        #[arg(short, long)]
        content: String,
        /// Link the entry to a logged mood
        #[arg(long)]
        mood: Option<String>,
        /// Tags (can be repeated)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Change fields of an existing entry
    Update {
        /// Entry ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New body
        #[arg(short, long)]
        content: Option<String>,
        /// Link the entry to a logged mood
        #[arg(long)]
        mood: Option<String>,
        /// Replace the tags (can be repeated)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
    /// Sentiment analysis of an entry
    Analyze {
        /// Entry ID
        id: String,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum MoodCommand {
    /// List logged moods, newest first
    List(ListArgs),
    /// Show one mood
    Get {
        /// Mood ID
        id: String,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Log how you feel right now
    Create {
        /// Score from 1 (worst) to 10 (best)
        #[arg(value_parser = clap::value_parser!(i32).range(1..=10))]
        score: i32,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a logged mood
    Update {
        /// Mood ID
        id: String,
        /// New score from 1 to 10
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=10))]
        score: Option<i32>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a logged mood
    Delete {
        /// Mood ID
        id: String,
    },
    /// Average mood per day, week, or month
    Aggregate {
        /// Bucket size: day, week, month
        #[arg(default_value = "week")]
        period: AggregationPeriod,
        /// Only moods on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only moods on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Number of records to skip
    #[arg(long)]
    skip: Option<usize>,
    /// Maximum number of records
    #[arg(short, long)]
    limit: Option<usize>,
    /// Only records on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Only records on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Output raw JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn query(&self) -> ListQuery {
        ListQuery {
            skip: self.skip,
            limit: self.limit,
            start_date: self.from,
            end_date: self.to,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AllyConfig::load(Some(&std::env::current_dir()?))
        .unwrap_or_else(|_| AllyConfig::default_config());

    run(cli, &config).await
}

async fn run(cli: Cli, config: &AllyConfig) -> Result<()> {
    let (api, session, mut nav) = ally_core::connect(config);
    tracing::debug!(api_url = %config.api.url, "client ready");

    // The landing screen initializes on its own so it can show progress.
    if let Cli::Home = cli {
        return tui::run_tui(session, nav, &config.api.url).await;
    }

    let current = session.initialize().await;

    let result = match cli {
        Cli::Login { email, password } => cmd_login(&session, &email, password).await,
        Cli::Register {
            email,
            password,
            name,
        } => cmd_register(&session, &email, password, &name).await,
        Cli::Logout => {
            session.logout();
            Ok(())
        }
        Cli::Whoami { json } => cmd_whoami(&current, json),
        Cli::Status { config: show } => cmd_status(config, &current, show),
        Cli::Journal(cmd) => {
            require_login(&current)?;
            cmd_journal(&api, cmd).await
        }
        Cli::Mood(cmd) => {
            require_login(&current)?;
            cmd_mood(&api, cmd).await
        }
        Cli::Chat { message, json } => {
            require_login(&current)?;
            cmd_chat(&api, message, json).await
        }
        Cli::Sentiment { text, json } => {
            require_login(&current)?;
            cmd_sentiment(&api, &text, json).await
        }
        Cli::Breathing { json } => {
            require_login(&current)?;
            cmd_breathing(&api, json).await
        }
        Cli::Home => Ok(()),
    };

    print_navigation(&mut nav, &session.session());
    result
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

async fn cmd_login(session: &AppSession, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let result = session.login(email, &password).await;
    if !result.is_authenticated() {
        bail!("{}", result.error.as_deref().unwrap_or(LOGIN_FAILED));
    }
    Ok(())
}

async fn cmd_register(
    session: &AppSession,
    email: &str,
    password: Option<String>,
    name: &str,
) -> Result<()> {
    let password = resolve_password(password)?;
    let result = session.register(email, &password, name).await;
    if !result.is_authenticated() {
        bail!("{}", result.error.as_deref().unwrap_or(REGISTRATION_FAILED));
    }
    println!("{} Account created for {}", "✓".green(), email.cyan());
    Ok(())
}

fn cmd_whoami(session: &Session, json: bool) -> Result<()> {
    if json {
        return print_json(&session.user);
    }
    match &session.user {
        Some(user) => {
            println!("{}", user.full_name.bold());
            println!("  {}  {}", "Email:".dimmed(), user.email);
            println!("  {}     {}", "ID:".dimmed(), user.id.cyan());
        }
        None => {
            println!("{}", "Not signed in.".yellow());
            if let Some(ref err) = session.error {
                println!("  {}", err.dimmed());
            }
        }
    }
    Ok(())
}

fn cmd_status(config: &AllyConfig, session: &Session, show_config: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    println!("{}", format!("Anxiety Ally v{version}").bold());
    println!("  {}      {}", "Backend:".dimmed(), config.api.url.cyan());

    let token_file = config
        .token_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none (no config directory)".to_string());
    println!("  {}   {}", "Token file:".dimmed(), token_file);

    let state = session.state();
    let state_label = match state {
        SessionState::Authenticated => state.to_string().green().to_string(),
        _ => state.to_string().yellow().to_string(),
    };
    println!("  {}      {}", "Session:".dimmed(), state_label);
    if let Some(ref user) = session.user {
        println!("  {}         {} <{}>", "User:".dimmed(), user.full_name, user.email);
    }
    if let Some(ref err) = session.error {
        println!("  {}        {}", "Error:".dimmed(), err.red());
    }

    let supabase = if config.supabase.url.is_some() && config.supabase.anon_key.is_some() {
        "configured (unused)".to_string()
    } else {
        format!("not set ({SUPABASE_URL_ENV}, {SUPABASE_ANON_KEY_ENV})")
    };
    println!("  {}     {}", "Supabase:".dimmed(), supabase.dimmed());

    if show_config {
        let mut shown = config.clone();
        if shown.supabase.anon_key.is_some() {
            shown.supabase.anon_key = Some("********".to_string());
        }
        println!();
        println!("{}", "--- Effective config ---".dimmed());
        print!(
            "{}",
            toml::to_string_pretty(&shown).context("failed to render config")?
        );
    }
    Ok(())
}

fn require_login(session: &Session) -> Result<()> {
    if session.is_authenticated() {
        return Ok(());
    }
    match session.error {
        Some(ref err) => bail!("{err} Run `ally login` to sign in."),
        None => bail!("not signed in. Run `ally login` first."),
    }
}

fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password is required");
    }
    Ok(password)
}

/// Report where a session flow sent the user.
fn print_navigation(nav: &mut mpsc::UnboundedReceiver<Route>, session: &Session) {
    while let Ok(route) = nav.try_recv() {
        match route {
            Route::Dashboard => {
                let who = session
                    .user
                    .as_ref()
                    .map(|u| u.full_name.as_str())
                    .unwrap_or("you");
                println!("{} Signed in as {}", "✓".green(), who.bold());
                println!(
                    "  {}",
                    "Try `ally mood create 7` or `ally journal list`.".dimmed()
                );
            }
            Route::Landing => {
                println!("{} Signed out", "✓".green());
                println!("  {}", "Run `ally home` or `ally login` to come back.".dimmed());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Journals
// ---------------------------------------------------------------------------

async fn cmd_journal(api: &ApiClient, cmd: JournalCommand) -> Result<()> {
    let journals = api.journals();
    match cmd {
        JournalCommand::List(args) => {
            let entries = journals
                .list(&args.query())
                .await
                .context("failed to list journal entries")?;
            if args.json {
                return print_json(&entries);
            }
            print_journal_table(&entries);
        }
        JournalCommand::Get { id, json } => {
            let entry = journals
                .get(&id)
                .await
                .context("failed to load journal entry")?;
            if json {
                return print_json(&entry);
            }
            print_journal(&entry);
        }
        JournalCommand::Create {
            title,
            content,
            mood,
            tags,
            json,
        } => {
            let input = JournalEntryInput {
                title: Some(title),
                content: Some(content),
                mood_id: mood,
                tags: (!tags.is_empty()).then_some(tags),
                image_urls: None,
            };
            let entry = journals
                .create(&input)
                .await
                .context("failed to create journal entry")?;
            if json {
                return print_json(&entry);
            }
            println!("{} Saved \"{}\" ({})", "✓".green(), entry.title, entry.id.cyan());
        }
        JournalCommand::Update {
            id,
            title,
            content,
            mood,
            tags,
            json,
        } => {
            let input = JournalEntryInput {
                title,
                content,
                mood_id: mood,
                tags: (!tags.is_empty()).then_some(tags),
                image_urls: None,
            };
            if journal_input_is_empty(&input) {
                bail!("nothing to update: pass --title, --content, --mood, or --tag");
            }
            let entry = journals
                .update(&id, &input)
                .await
                .context("failed to update journal entry")?;
            if json {
                return print_json(&entry);
            }
            println!("{} Updated \"{}\"", "✓".green(), entry.title);
        }
        JournalCommand::Delete { id } => {
            journals
                .delete(&id)
                .await
                .context("failed to delete journal entry")?;
            println!("{} Deleted journal entry {}", "✓".green(), id.cyan());
        }
        JournalCommand::Analyze { id, json } => {
            let analysis = journals
                .analyze(&id)
                .await
                .context("failed to analyze journal entry")?;
            if json {
                return print_json(&analysis);
            }
            println!(
                "{} {}",
                sentiment_label(&analysis.sentiment_label),
                format!("({:.2})", analysis.sentiment_score).dimmed()
            );
            print_keywords_and_suggestions(&analysis.keywords, analysis.suggestions.as_deref());
        }
    }
    Ok(())
}

fn journal_input_is_empty(input: &JournalEntryInput) -> bool {
    input.title.is_none()
        && input.content.is_none()
        && input.mood_id.is_none()
        && input.tags.is_none()
        && input.image_urls.is_none()
}

fn print_journal_table(entries: &[JournalEntry]) {
    if entries.is_empty() {
        println!("{}", "No journal entries yet.".dimmed());
        return;
    }
    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.created_at.format("%Y-%m-%d").to_string().dimmed(),
            entry.title.bold(),
            entry.id.cyan()
        );
        let preview = entry.preview(72);
        if !preview.is_empty() {
            println!("            {}", preview.dimmed());
        }
    }
    println!();
    println!("{}", plural(entries.len(), "entry", "entries"));
}

fn print_journal(entry: &JournalEntry) {
    println!("{}", entry.title.bold());
    println!(
        "{}",
        entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    println!();
    println!("{}", entry.content);
    println!();
    println!("{}", "--- Details ---".dimmed());
    println!("  {}  {}", "ID:".dimmed(), entry.id.cyan());
    if let Some(updated) = entry.updated_at {
        println!(
            "  {}  {}",
            "Updated:".dimmed(),
            updated.format("%Y-%m-%d %H:%M:%S")
        );
    }
    if let Some(ref mood) = entry.mood_id {
        println!("  {}  {}", "Mood:".dimmed(), mood);
    }
    if let Some(score) = entry.sentiment_score {
        println!("  {}  {:.2}", "Sentiment:".dimmed(), score);
    }
    if !entry.tags.is_empty() {
        println!("  {}  {}", "Tags:".dimmed(), entry.tags.join(", ").cyan());
    }
    if !entry.image_urls.is_empty() {
        println!("  {}  {}", "Images:".dimmed(), entry.image_urls.len());
    }
}

// ---------------------------------------------------------------------------
// Moods
// ---------------------------------------------------------------------------

async fn cmd_mood(api: &ApiClient, cmd: MoodCommand) -> Result<()> {
    let moods = api.moods();
    match cmd {
        MoodCommand::List(args) => {
            let list = moods
                .list(&args.query())
                .await
                .context("failed to list moods")?;
            if args.json {
                return print_json(&list);
            }
            print_mood_table(&list);
        }
        MoodCommand::Get { id, json } => {
            let mood = moods.get(&id).await.context("failed to load mood")?;
            if json {
                return print_json(&mood);
            }
            print_mood_table(std::slice::from_ref(&mood));
        }
        MoodCommand::Create { score, notes, json } => {
            let input = MoodInput {
                score: Some(score),
                notes,
                timestamp: None,
            };
            let mood = moods.create(&input).await.context("failed to log mood")?;
            if json {
                return print_json(&mood);
            }
            println!(
                "{} Logged {} {}",
                "✓".green(),
                mood_bar(f64::from(mood.score)).magenta(),
                format!("{}/10", mood.score).bold()
            );
        }
        MoodCommand::Update {
            id,
            score,
            notes,
            json,
        } => {
            if score.is_none() && notes.is_none() {
                bail!("nothing to update: pass --score or --notes");
            }
            let input = MoodInput {
                score,
                notes,
                timestamp: None,
            };
            let mood = moods
                .update(&id, &input)
                .await
                .context("failed to update mood")?;
            if json {
                return print_json(&mood);
            }
            println!("{} Updated mood {}", "✓".green(), mood.id.cyan());
        }
        MoodCommand::Delete { id } => {
            moods.delete(&id).await.context("failed to delete mood")?;
            println!("{} Deleted mood {}", "✓".green(), id.cyan());
        }
        MoodCommand::Aggregate {
            period,
            from,
            to,
            json,
        } => {
            let agg = moods
                .aggregate(period, from, to)
                .await
                .context("failed to aggregate moods")?;
            if json {
                return print_json(&agg);
            }
            print_aggregation(&agg);
        }
    }
    Ok(())
}

fn print_mood_table(moods: &[Mood]) {
    if moods.is_empty() {
        println!("{}", "No moods logged yet.".dimmed());
        return;
    }
    for mood in moods {
        println!(
            "{}  {} {:>2}/10  {}",
            mood.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            mood_bar(f64::from(mood.score)).magenta(),
            mood.score,
            mood.id.cyan()
        );
        if let Some(ref notes) = mood.notes {
            if !notes.trim().is_empty() {
                println!("                  {}", notes.dimmed());
            }
        }
    }
}

fn print_aggregation(agg: &MoodAggregation) {
    println!(
        "{} {}",
        format!("Mood by {}", agg.period).bold(),
        format!("(average {:.2})", agg.average_score).dimmed()
    );
    if agg.data.is_empty() {
        println!("  {}", "No moods in this range.".dimmed());
        return;
    }
    for bucket in &agg.data {
        println!(
            "  {:<10}  {} {:>5.2}  {}",
            bucket.period,
            mood_bar(bucket.average_score).magenta(),
            bucket.average_score,
            plural(bucket.count, "mood", "moods").dimmed()
        );
    }
}

/// Ten-cell bar for a 1..=10 score.
fn mood_bar(score: f64) -> String {
    let filled = score.round().clamp(0.0, 10.0) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

// ---------------------------------------------------------------------------
// AI
// ---------------------------------------------------------------------------

async fn cmd_chat(api: &ApiClient, message: Option<String>, json: bool) -> Result<()> {
    let ai = api.ai();

    if let Some(message) = message {
        let reply = ai.chat(&message, None).await.context("chat request failed")?;
        if json {
            return print_json(&reply);
        }
        print_reply(&reply);
        return Ok(());
    }

    eprintln!(
        "{}",
        "Chatting with Ally. An empty line or Ctrl+D ends the conversation.".dimmed()
    );
    let mut history: Vec<ChatMessage> = Vec::new();
    let stdin = std::io::stdin();
    loop {
        eprint!("{} ", ">".cyan());
        std::io::stderr().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            break;
        }

        let prior = (!history.is_empty()).then_some(history.as_slice());
        let reply = ai.chat(message, prior).await.context("chat request failed")?;
        if json {
            print_json(&reply)?;
        } else {
            print_reply(&reply);
        }
        history.push(ChatMessage::user(message));
        history.push(ChatMessage::assistant(reply.response));
    }
    Ok(())
}

fn print_reply(reply: &ChatResponse) {
    println!("{}", reply.response);
    for suggestion in &reply.suggestions {
        println!("  {} {}", "→".cyan(), suggestion.dimmed());
    }
}

async fn cmd_sentiment(api: &ApiClient, text: &str, json: bool) -> Result<()> {
    let result = api
        .ai()
        .sentiment(text)
        .await
        .context("sentiment request failed")?;
    if json {
        return print_json(&result);
    }
    println!(
        "{} {}",
        sentiment_label(&result.label),
        format!("({:.2})", result.score).dimmed()
    );
    print_keywords_and_suggestions(&result.keywords, result.suggestions.as_deref());
    Ok(())
}

async fn cmd_breathing(api: &ApiClient, json: bool) -> Result<()> {
    let exercises = api
        .ai()
        .breathing_exercises()
        .await
        .context("failed to load breathing exercises")?;
    if json {
        return print_json(&exercises);
    }
    for (i, exercise) in exercises.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", exercise.name.bold());
        println!("  {}", exercise.description);
        println!("  {}", breathing_pattern(exercise).cyan());
    }
    Ok(())
}

fn breathing_pattern(exercise: &BreathingExercise) -> String {
    let mut steps = vec![format!("inhale {}s", exercise.inhale_duration)];
    if exercise.hold_duration > 0 {
        steps.push(format!("hold {}s", exercise.hold_duration));
    }
    steps.push(format!("exhale {}s", exercise.exhale_duration));
    format!(
        "{} x {} ({})",
        steps.join(" · "),
        plural(exercise.cycles as usize, "cycle", "cycles"),
        format_duration(exercise.total_seconds())
    )
}

fn sentiment_label(label: &str) -> String {
    match label.to_ascii_uppercase().as_str() {
        "POSITIVE" => label.green().bold().to_string(),
        "NEGATIVE" => label.red().bold().to_string(),
        _ => label.yellow().bold().to_string(),
    }
}

fn print_keywords_and_suggestions(keywords: &[String], suggestions: Option<&[String]>) {
    if !keywords.is_empty() {
        println!("  {}  {}", "Keywords:".dimmed(), keywords.join(", ").cyan());
    }
    for suggestion in suggestions.unwrap_or_default() {
        println!("  {} {}", "→".cyan(), suggestion);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn format_duration(seconds: u32) -> String {
    match (seconds / 60, seconds % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ally").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_login() {
        match parse(&["login", "-e", "sam@example.com", "-p", "hunter22"]) {
            Cli::Login { email, password } => {
                assert_eq!(email, "sam@example.com");
                assert_eq!(password.as_deref(), Some("hunter22"));
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_parse_journal_list_query() {
        match parse(&["journal", "list", "--limit", "5", "--from", "2024-03-01"]) {
            Cli::Journal(JournalCommand::List(args)) => {
                let query = args.query();
                assert_eq!(query.limit, Some(5));
                assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert!(query.skip.is_none());
                assert!(query.end_date.is_none());
            }
            _ => panic!("expected journal list"),
        }
    }

    #[test]
    fn test_parse_journal_create_tags() {
        match parse(&[
            "journal", "create", "-t", "Night", "-c", "Could not sleep", "--tag", "sleep",
            "--tag", "work",
        ]) {
            Cli::Journal(JournalCommand::Create { title, tags, .. }) => {
                assert_eq!(title, "Night");
                assert_eq!(tags, vec!["sleep", "work"]);
            }
            _ => panic!("expected journal create"),
        }
    }

    #[test]
    fn test_mood_score_range() {
        assert!(Cli::try_parse_from(["ally", "mood", "create", "7"]).is_ok());
        assert!(Cli::try_parse_from(["ally", "mood", "create", "0"]).is_err());
        assert!(Cli::try_parse_from(["ally", "mood", "create", "11"]).is_err());
    }

    #[test]
    fn test_mood_aggregate_defaults_to_week() {
        match parse(&["mood", "aggregate"]) {
            Cli::Mood(MoodCommand::Aggregate { period, from, to, .. }) => {
                assert_eq!(period, AggregationPeriod::Week);
                assert!(from.is_none() && to.is_none());
            }
            _ => panic!("expected mood aggregate"),
        }
        assert!(Cli::try_parse_from(["ally", "mood", "aggregate", "year"]).is_err());
    }

    #[test]
    fn test_chat_message_optional() {
        assert!(matches!(
            parse(&["chat"]),
            Cli::Chat { message: None, .. }
        ));
        assert!(matches!(
            parse(&["chat", "hello"]),
            Cli::Chat { message: Some(_), .. }
        ));
    }

    #[test]
    fn test_mood_bar() {
        assert_eq!(mood_bar(10.0), "██████████");
        assert_eq!(mood_bar(0.0), "░░░░░░░░░░");
        assert_eq!(mood_bar(6.6), "███████░░░");
        assert_eq!(mood_bar(42.0).chars().count(), 10);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(120), "2m");
        assert_eq!(format_duration(76), "1m 16s");
    }

    #[test]
    fn test_breathing_pattern_skips_zero_hold() {
        let exercise = BreathingExercise {
            name: "Deep Breathing".into(),
            description: "Slow and deep.".into(),
            inhale_duration: 5,
            hold_duration: 0,
            exhale_duration: 5,
            cycles: 10,
        };
        assert_eq!(
            breathing_pattern(&exercise),
            "inhale 5s · exhale 5s x 10 cycles (1m 40s)"
        );
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "entry", "entries"), "1 entry");
        assert_eq!(plural(3, "entry", "entries"), "3 entries");
    }

    #[test]
    fn test_journal_input_is_empty() {
        assert!(journal_input_is_empty(&JournalEntryInput::default()));
        assert!(!journal_input_is_empty(&JournalEntryInput {
            title: Some("x".into()),
            ..Default::default()
        }));
    }

    #[test]
    fn test_require_login() {
        assert!(require_login(&Session::default()).is_err());
    }
}
