//! Build configuration.
//!
//! Configuration flows one way: [`ResolveRequest`] (raw CLI and host
//! state) is resolved into an immutable [`BuildConfig`] which every
//! pipeline stage reads. Architecture-dependent tool names live in the
//! [`ToolchainDescriptor`] table.

mod arch;
mod core;
mod resolver;
mod toolchain;

pub use arch::Arch;
pub use resolver::{resolve, ResolveRequest};
pub use self::core::{
    BuildConfig, CompilerPreference, SdkPaths, SigningConfig, NATIVE_ARTIFACT, NATIVE_PROJECT,
    PRODUCT_NAME, SHARED_VENDOR_RUNTIME, VENDOR_DRIVER_PREFIX,
};
pub use toolchain::{descriptor, ToolchainDescriptor};
