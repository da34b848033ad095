pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod health;
pub mod interactive;
pub mod notify;
pub mod selection;
pub mod session;
pub mod submission;
