pub mod client;
pub mod error;
mod types;

pub use client::ProviderClient;
pub use error::ProviderError;
