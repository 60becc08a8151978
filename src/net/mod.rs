pub mod client;
pub mod dns;

pub use client::HttpClient;
