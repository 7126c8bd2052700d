//! `debug!` and `warn!` for the rest of the crate.
//!
//! Built with `tracing`, the names point at the real macros. Built without
//! it, the same call sites compile to empty statements so no logging code
//! ends up in the library.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
