//! Structured logging for CapTrack
//!
//! One `init(profile)` call per process, three lifecycle macros
//! (`log_op_start!`, `log_op_end!`, `log_op_error!`) and an in-memory
//! capture layer for tests.
//!
//! Lifecycle events come from `apply()` and from the bulk import entry
//! points in `captrack-store` (`capability_import`, `seed_import`). The
//! ops, queries and codecs below them log at `debug` level and never emit
//! start/end pairs of their own.
//!
//! ```rust
//! use captrack_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
