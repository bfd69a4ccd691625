use clap::Subcommand;

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Forget the conversation so the next suggestion starts fresh
    Clear,
}
