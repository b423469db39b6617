//! Fallback backend: the Free Pascal compiler.
//!
//! Free Pascal covers every supported architecture, including arm64 where
//! it is the only option.

use super::{exe_name, run_backend};
use crate::pipeline::config::{BuildConfig, NATIVE_PROJECT};
use crate::pipeline::process::{ProcessRequest, ProcessRunner};

/// Builds the native library with the target-specific `ppc*` compiler.
pub(super) async fn compile(config: &BuildConfig, runner: &dyn ProcessRunner) -> bool {
    let Some(root) = config.sdk().fpc_root() else {
        log::warn!("Free Pascal installation not found, skipping");
        return false;
    };

    let toolchain = config.toolchain();
    let program = root.join("bin").join(exe_name(toolchain.fpc_compiler));
    let units = root.join("units").join(toolchain.fpc_unit_dir);
    let request = ProcessRequest::new(
        program,
        [
            "-B".to_string(),
            format!("-T{}", toolchain.fpc_target),
            format!("-Fu{}", units.display()),
            NATIVE_PROJECT.to_string(),
        ],
    )
    .in_dir(config.native_dir());

    run_backend("Free Pascal", &request, runner).await
}
