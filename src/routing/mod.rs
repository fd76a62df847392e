//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     base handler (Greeting)
//!     → + database stage (if it loaded)
//!     → + file stages (in the order given)
//!     → HandlerChain (immutable, shared via Arc)
//!
//! Per request:
//!     path → chain.rs (walk stages, last added first)
//!          → resolver.rs (redirect on hit, fallback on full miss)
//! ```
//!
//! # Design Decisions
//! - Stages stay separate; conflicts resolve at request time, first hit wins
//! - No locking: tables are never mutated after composition
//! - Deterministic: same path always resolves to the same stage

pub mod chain;
pub mod resolver;

pub use chain::HandlerChain;
pub use resolver::{Fallback, Greeting, RedirectStatus, Resolution, Stage};
