pub mod client;
pub mod envelope;

pub use client::{fetch_items, HttpClient, Method, ResourceClient, ResourceRequest};
