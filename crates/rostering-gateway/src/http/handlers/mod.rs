//! HTTP request handlers.

mod chat;
mod health;

pub use chat::{chat, list_quick_actions};
pub use health::health_check;
