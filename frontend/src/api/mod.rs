mod auth;
pub mod client;
mod profile;
pub mod types;

pub use auth::REGISTRATION_FAILED;
pub use client::*;
pub use types::*;
