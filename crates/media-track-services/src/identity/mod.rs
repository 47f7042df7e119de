pub mod auth;

pub use auth::{sign_in, SessionTokens};
