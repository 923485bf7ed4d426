pub mod client;
pub mod poller;
pub mod types;

pub use client::*;
pub use poller::*;
pub use types::*;
