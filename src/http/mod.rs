//! HTTP transport for the explorer API and the embedded visualizer

pub mod handler;
pub mod server;

pub use server::{router, HttpServer};
