//! Service assembly for the droplet API: route wiring, request tracing and
//! the standalone server loop.

pub mod service;
pub mod tracing;

pub use service::DropletService;
