pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod pipeline;
