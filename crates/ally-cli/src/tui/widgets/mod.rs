pub mod help_bar;
