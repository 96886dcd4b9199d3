//! # hearth-core - Core Domain Types
//!
//! Foundation crate for the hearth shell. Provides domain types, lifecycle
//! event definitions with wire parsing, error handling, configuration, and
//! the logging bootstrap.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, tracing, toml, chrono).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`HomeKind`] - Which home surface a value refers to (Primary | Landing)
//! - [`ManifestId`], [`InstanceId`], [`AppIdentity`] - the three identity
//!   spaces used to match events, windows, and underlay apps
//! - [`CloseMode`] - How a surface or window should be torn down
//!
//! ### Events (`events`)
//! - [`ShellEvent`] - The closed lifecycle event set driving the coordinator
//! - [`EventKind`] - Discriminant used for bus subscription
//! - Payload structs: [`AppOpened`], [`AppTerminated`], [`LaunchIntent`],
//!   [`HomeSurfaceOpened`], [`AppDescriptor`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum for the plumbing edges
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Configuration (`config`)
//! - [`ShellConfig`] - Injected static configuration
//! - [`load_config()`] - Lenient load from `.hearth/config.toml`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use hearth_core::prelude::*;
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout the hearth crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use config::{load_config, ShellConfig};
pub use error::{Error, Result, ResultExt};
pub use events::{
    AppDescriptor, AppOpened, AppTerminated, EventKind, HomeSurfaceOpened, LaunchIntent, ShellEvent,
};
pub use types::{AppIdentity, CloseMode, HomeKind, InstanceId, ManifestId};
