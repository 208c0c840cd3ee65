//! # rbdash-core - Core Domain Types
//!
//! Foundation crate for the RapidBuild dashboard. Provides domain types, error
//! handling, logging setup, and the small pure helpers the renderer relies on.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`User`] - The authenticated caller (id + email)
//! - [`App`] - One application record owned by the caller
//! - [`AppStatus`] - Build/deploy status, tolerant of unknown values
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Display Helpers
//! - [`normalize_logo_url()`] - Turn `s3://bucket/key` into a public HTTPS URL
//! - [`format_created_date()`] - Render a timestamp in the viewer's local zone
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use rbdash_core::prelude::*;
//! ```

pub mod display;
pub mod error;
pub mod logging;
pub mod logo;
pub mod types;

/// Prelude for common imports used throughout all dashboard crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use display::{format_created_date, DEFAULT_DATE_FORMAT};
pub use error::{Error, Result, ResultExt};
pub use logo::normalize_logo_url;
pub use types::{App, AppStatus, User};
