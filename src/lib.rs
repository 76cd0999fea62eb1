pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod export;
pub mod file_store;
pub mod listing;
pub mod logging;
pub mod report;
pub mod store;
