//! HTTP client for the recipe service.

pub(crate) mod client;


pub use client::{
    ApiClient, ApiError, ApiResult,
    wire::{FavoriteAdded, LoginResponse},
};
