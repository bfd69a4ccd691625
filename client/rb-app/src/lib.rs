//! rb-app library
//!
//! Command dispatch for the `rb` binary, exported for tests.

pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod favorite_commands;
pub(crate) mod history_commands;
pub(crate) mod logger;
pub(crate) mod recipe_commands;
pub(crate) mod terms_commands;
pub(crate) mod theme_commands;
pub(crate) mod timer;


pub use app::App;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{AppError, Result as AppErrorResult};
pub use favorite_commands::FavoriteCommands;
pub use history_commands::HistoryCommands;
pub use logger::initialize as initialize_logger;
pub use recipe_commands::RecipeCommands;
pub use terms_commands::TermsCommands;
pub use theme_commands::ThemeCommands;
pub use timer::countdown;
