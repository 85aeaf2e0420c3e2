pub mod args;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod presentation;
pub mod server;
pub mod util;
