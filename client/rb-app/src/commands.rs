use crate::{
    favorite_commands::FavoriteCommands, history_commands::HistoryCommands,
    recipe_commands::RecipeCommands, terms_commands::TermsCommands,
    theme_commands::ThemeCommands,
};

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with a Google identity token
    Login {
        /// Identity token issued by Google Sign-In
        #[arg(long)]
        id_token: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Sign out and forget the stored session
    Logout,

    /// Terms and conditions gate
    Terms {
        #[command(subcommand)]
        action: TermsCommands,
    },

    /// Recipe suggestions
    Recipe {
        #[command(subcommand)]
        action: RecipeCommands,
    },

    /// Starred recipes
    Favorites {
        #[command(subcommand)]
        action: FavoriteCommands,
    },

    /// Conversation history kept by the service
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Run a kitchen timer in the terminal
    Timer {
        #[arg(long)]
        hours: Option<String>,

        #[arg(long)]
        minutes: Option<String>,

        #[arg(long)]
        seconds: Option<String>,
    },

    /// Color theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeCommands,
    },
}
