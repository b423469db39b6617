//! Compiler backend selection and fallback behavior.

mod common;

use common::{FakeRunner, TestProject};

use coilwatch_release::pipeline::compiler;
use coilwatch_release::pipeline::config::{Arch, CompilerPreference};

#[tokio::test]
async fn auto_skips_fallback_when_primary_succeeds() {
    let project = TestProject::new();
    let config = project.config(Arch::X64, CompilerPreference::Auto);
    let runner = FakeRunner::new().succeed_creating("dcc64", &[project.native_artifact()]);

    assert!(compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("dcc64"), 1);
    assert!(!runner.was_invoked("ppcx64"));
}

#[tokio::test]
async fn auto_falls_back_when_primary_fails() {
    let project = TestProject::new();
    let config = project.config(Arch::X64, CompilerPreference::Auto);
    let runner = FakeRunner::new()
        .fail("dcc64", 2)
        .succeed_creating("ppcx64", &[project.native_artifact()]);

    assert!(compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("dcc64"), 1);
    assert_eq!(runner.invocations_of("ppcx64"), 1);
}

#[tokio::test]
async fn auto_falls_back_when_primary_cannot_start() {
    let project = TestProject::new();
    let config = project.config(Arch::X64, CompilerPreference::Auto);
    let runner = FakeRunner::new()
        .unavailable("dcc64")
        .succeed_creating("ppcx64", &[project.native_artifact()]);

    // An unstartable compiler counts as a failed attempt, same as a
    // compile error.
    assert!(compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("ppcx64"), 1);
}

#[tokio::test]
async fn auto_reports_failure_when_both_backends_fail() {
    let project = TestProject::new();
    let config = project.config(Arch::X64, CompilerPreference::Auto);
    let runner = FakeRunner::new().fail("dcc64", 2).fail("ppcx64", 1);

    assert!(!compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("dcc64"), 1);
    assert_eq!(runner.invocations_of("ppcx64"), 1);
}

#[tokio::test]
async fn explicit_delphi_preference_never_falls_back() {
    let project = TestProject::new();
    let config = project.config(Arch::X64, CompilerPreference::Delphi);
    let runner = FakeRunner::new().fail("dcc64", 2);

    assert!(!compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("dcc64"), 1);
    assert!(!runner.was_invoked("ppcx64"));
}

#[tokio::test]
async fn explicit_fpc_preference_skips_the_primary() {
    let project = TestProject::new();
    let config = project.config(Arch::X64, CompilerPreference::Fpc);
    let runner = FakeRunner::new().succeed_creating("ppcx64", &[project.native_artifact()]);

    assert!(compiler::compile(&config, &runner).await);
    assert!(!runner.was_invoked("dcc64"));
    assert_eq!(runner.invocations_of("ppcx64"), 1);
}

#[tokio::test]
async fn arm64_builds_use_the_arm_fpc_compiler() {
    let project = TestProject::new();
    // Auto resolves to fpc on arm64 because Delphi cannot target it.
    let config = project.config(Arch::Arm64, CompilerPreference::Auto);
    assert_eq!(config.compiler(), CompilerPreference::Fpc);

    let runner = FakeRunner::new().succeed_creating("ppca64", &[project.native_artifact()]);

    assert!(compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("ppca64"), 1);
    assert!(!runner.was_invoked("dcc64"));
    assert!(!runner.was_invoked("dcc32"));
}

#[tokio::test]
async fn x86_builds_use_the_32_bit_compilers() {
    let project = TestProject::new();
    let config = project.config(Arch::X86, CompilerPreference::Auto);
    let runner = FakeRunner::new()
        .fail("dcc32", 1)
        .succeed_creating("ppc386", &[project.native_artifact()]);

    assert!(compiler::compile(&config, &runner).await);
    assert_eq!(runner.invocations_of("dcc32"), 1);
    assert_eq!(runner.invocations_of("ppc386"), 1);

    // The 32-bit target flag reaches the fallback compiler.
    let fpc_call = runner
        .recorded()
        .into_iter()
        .find(|call| call.program_stem() == "ppc386")
        .unwrap();
    assert!(fpc_call.args.iter().any(|arg| arg == "-Twin32"));
}
