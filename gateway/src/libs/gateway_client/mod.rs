pub mod api;
pub mod client;
pub mod models;

pub use client::{Client, ClientConfig, HttpConfig};
