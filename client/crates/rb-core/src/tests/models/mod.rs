mod favorite_recipe;
mod sort_order;
mod theme;
mod user_profile;
