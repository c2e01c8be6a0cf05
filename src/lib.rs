pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod modal;
pub mod records;
pub mod session;
pub mod view;

#[cfg(test)]
pub mod testing;
