pub mod auth;
pub mod blog;
pub mod config;
pub mod contact;
pub mod doubt;
pub mod joinus;
pub mod mentor;
pub mod resume;
pub mod screen;
