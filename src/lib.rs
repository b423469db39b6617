//! Release pipeline for the Coilwatch hardware telemetry suite.
//!
//! Builds a per-architecture Windows distribution from one source tree:
//! the native Pascal sensor library, the .NET front-ends, the vendor
//! driver set, and an Inno Setup installer, optionally code-signed.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use error::{ReleaseError, Result};
