//! Primary backend: the Delphi command-line compiler.

use super::{exe_name, run_backend};
use crate::pipeline::config::{BuildConfig, NATIVE_PROJECT};
use crate::pipeline::process::{ProcessRequest, ProcessRunner};

/// Builds the native library with `dcc32`/`dcc64`.
///
/// Skips with a warning when the architecture has no Delphi compiler or
/// no installation was found; both count as a failed attempt.
pub(super) async fn compile(config: &BuildConfig, runner: &dyn ProcessRunner) -> bool {
    let toolchain = config.toolchain();
    let (Some(compiler), Some(lib_dir)) = (toolchain.delphi_compiler, toolchain.delphi_lib_dir)
    else {
        log::warn!("Delphi cannot target {}, skipping", config.arch());
        return false;
    };
    let Some(root) = config.sdk().delphi_root() else {
        log::warn!("Delphi installation not found, skipping");
        return false;
    };

    let program = root.join("bin").join(exe_name(compiler));
    let lib_path = root.join("lib").join(lib_dir).join("release");
    let request = ProcessRequest::new(
        program,
        [
            "-B".to_string(),
            "-Q".to_string(),
            format!("-U{}", lib_path.display()),
            NATIVE_PROJECT.to_string(),
        ],
    )
    .in_dir(config.native_dir());

    run_backend("Delphi", &request, runner).await
}
