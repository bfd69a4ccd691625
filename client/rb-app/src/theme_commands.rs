use clap::Subcommand;

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the current theme
    Show,

    /// Switch between light and dark
    Toggle,
}
