pub mod favorite_recipe;
pub mod recipe_suggestion;
pub mod sort_order;
pub mod theme;
pub mod user_profile;
