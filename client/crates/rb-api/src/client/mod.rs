pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod wire;

pub use client::ApiClient;
pub use error::{ApiError, Result as ApiResult};
