pub mod client;
pub mod provider;

pub use client::BinanceClient;
pub use provider::PriceProvider;
