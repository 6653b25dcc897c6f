pub use handlers::{login, register};

mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
