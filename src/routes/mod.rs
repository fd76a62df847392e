//! Route sources subsystem.
//!
//! # Data Flow
//! ```text
//! SQLite table (path, url)          YAML / JSON file
//!     → database.rs (read-all)          → file.rs (read + decode)
//!     → Vec<PathRoute>                  → Vec<PathRoute>
//!            ↘                          ↙
//!             table.rs (last write wins)
//!             → RouteTable (immutable)
//! ```
//!
//! # Design Decisions
//! - Every record is validated when it becomes a `PathRoute`
//! - Tables are built once and never mutated afterwards
//! - Source formats are opaque to the resolver; it only sees `RouteTable`

pub mod database;
pub mod error;
pub mod file;
pub mod table;

pub use error::{LoadError, ParseError};
pub use file::SourceFormat;
pub use table::{PathRoute, RouteTable};
