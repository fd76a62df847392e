//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load route sources → Compose handler chain → (main binds listener)
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → Server stops accepting, drains and exits
//! ```
//!
//! # Design Decisions
//! - Ordered startup: sources first, listener last (traffic only when ready)
//! - Fail fast on explicitly requested sources, degrade on the database

pub mod signals;
pub mod startup;

pub use startup::{build_chain, StartupError};
