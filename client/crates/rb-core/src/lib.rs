pub mod error;
pub mod kitchen_timer;
pub mod models;
pub mod prompt;
pub mod recipe_title;
pub mod session_credential;

#[cfg(test)]
mod tests;

pub use error::error_kind::ErrorKind;
pub use error::{CoreError, Result};
pub use kitchen_timer::{KitchenTimer, TickOutcome, format_time};
pub use models::favorite_recipe::FavoriteRecipe;
pub use models::recipe_suggestion::RecipeSuggestion;
pub use models::sort_order::SortOrder;
pub use models::theme::Theme;
pub use models::user_profile::UserProfile;
pub use prompt::validate_prompt;
pub use recipe_title::{UNTITLED_RECIPE, extract_title};
pub use session_credential::SessionCredential;
