mod models;
mod session_credential;
