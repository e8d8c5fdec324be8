pub mod api;
pub mod auth;
pub mod config;
pub mod enums;
pub mod error;
pub mod services;
pub mod store;
pub mod views;

pub use config::Config;
pub use enums::TransactionKind;
pub use error::{AppError, Result};
