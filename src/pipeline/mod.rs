//! Release pipeline.
//!
//! The pipeline turns a source tree into a signed, installable
//! distribution in four sequential stages:
//!
//! 1. [`compiler`] builds the native sensor library, falling back from
//!    Delphi to Free Pascal where the configuration allows it.
//! 2. [`assemble`] fills the recreated output directory: native library,
//!    vendor drivers, published front-ends.
//! 3. [`signing`] signs the assembled binaries, skipping pre-signed
//!    vendor files.
//! 4. [`installer`] packages everything and the result is hashed.
//!
//! All external tools run through [`process::ProcessRunner`], and all
//! environment inspection happens up front in [`config`].

pub mod assemble;
pub mod checksum;
pub mod compiler;
pub mod config;
pub mod error;
mod fsutil;
pub mod installer;
pub mod orchestrator;
pub mod process;
pub mod publish;
pub mod signing;

pub use error::{Error, Result};
pub use orchestrator::{execute, PipelineReport};
