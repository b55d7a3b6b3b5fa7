//! # termspin
//!
//! Animated single-line terminal spinner for CLIs that block on process
//! calls or filesystem scans.
//!
//! The [`Spinner`] owns a background render thread that redraws
//! `\r{frame} {message}` on a fixed period. `stop` is synchronous: it returns
//! only after the line has been cleared and the cursor shown again, so output
//! printed right after it never lands on a half-drawn line.
//!
//! ## Modules
//!
//! * [`spinner`]: the [`Spinner`], its frame catalog and output sinks.
//! * [`config`]: YAML defaults for the `termspin` binary.
//! * [`cmd`]: process runner used to wrap external commands in a spinner.

pub mod cmd;
pub mod config;
pub mod error;
pub mod logger;
pub mod spinner;

pub use error::SpinnerError;
pub use spinner::{FrameSet, FrameStyle, SharedBuffer, Spinner};
