#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Logging setup shared by the Wells of Change crates.
//!
//! Native binaries log to stderr through `tracing-subscriber`; the wasm
//! front-end routes the same fmt layer to the browser console.

#[cfg(target_arch = "wasm32")]
pub mod console;
pub mod init;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
