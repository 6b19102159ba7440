pub mod config;
pub mod error;
pub mod iter;
pub mod journal;
pub mod queue;
