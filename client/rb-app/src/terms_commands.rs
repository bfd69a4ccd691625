use clap::Subcommand;

#[derive(Subcommand)]
pub enum TermsCommands {
    /// Accept the terms and finish signing in
    Accept,

    /// Decline the terms and sign out
    Decline,
}
