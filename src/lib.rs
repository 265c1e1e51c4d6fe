pub mod types;
pub mod handle;
pub mod session;
pub mod scoring;
pub mod storage;
pub mod config;

pub use config::Config;
pub use types::*;
