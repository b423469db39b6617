//! Shared test harness: a scripted process runner and an on-disk project
//! fixture, so pipeline behavior can be tested without any real toolchain.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use coilwatch_release::pipeline::config::{
    self, Arch, BuildConfig, CompilerPreference, ResolveRequest,
};
use coilwatch_release::pipeline::error::{Error, Result};
use coilwatch_release::pipeline::process::{ProcessOutput, ProcessRequest, ProcessRunner};

/// One scripted tool behavior, matched by program stem and optionally by
/// an argument fragment.
struct ToolScript {
    program: String,
    arg_fragment: Option<String>,
    exit_code: i32,
    fail_to_spawn: bool,
    creates: Vec<PathBuf>,
}

impl ToolScript {
    fn matches(&self, stem: &str, args: &[String]) -> bool {
        if stem != self.program {
            return false;
        }
        match &self.arg_fragment {
            Some(fragment) => args.iter().any(|arg| arg.contains(fragment)),
            None => true,
        }
    }
}

/// Process runner that consults a script instead of spawning anything.
///
/// The first matching script wins; unmatched programs succeed with no
/// side effects. Every invocation is recorded for assertions.
#[derive(Default)]
pub struct FakeRunner {
    scripts: Vec<ToolScript>,
    calls: Mutex<Vec<ProcessRequest>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program exits zero and creates `files` on each invocation.
    pub fn succeed_creating(self, program: &str, files: &[PathBuf]) -> Self {
        self.script(program, None, 0, false, files)
    }

    /// Like `succeed_creating`, but only for invocations whose arguments
    /// contain `fragment`.
    pub fn succeed_matching(self, program: &str, fragment: &str, files: &[PathBuf]) -> Self {
        self.script(program, Some(fragment), 0, false, files)
    }

    /// Program exits with `exit_code` and touches nothing.
    pub fn fail(self, program: &str, exit_code: i32) -> Self {
        self.script(program, None, exit_code, false, &[])
    }

    /// Failing variant scoped to invocations matching `fragment`.
    pub fn fail_matching(self, program: &str, fragment: &str, exit_code: i32) -> Self {
        self.script(program, Some(fragment), exit_code, false, &[])
    }

    /// Program cannot be started at all.
    pub fn unavailable(self, program: &str) -> Self {
        self.script(program, None, 0, true, &[])
    }

    fn script(
        mut self,
        program: &str,
        fragment: Option<&str>,
        exit_code: i32,
        fail_to_spawn: bool,
        creates: &[PathBuf],
    ) -> Self {
        self.scripts.push(ToolScript {
            program: program.to_string(),
            arg_fragment: fragment.map(str::to_string),
            exit_code,
            fail_to_spawn,
            creates: creates.to_vec(),
        });
        self
    }

    /// All recorded invocations, in order.
    pub fn recorded(&self) -> Vec<ProcessRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations of a program, matched by stem.
    pub fn invocations_of(&self, program: &str) -> usize {
        self.recorded()
            .iter()
            .filter(|call| call.program_stem() == program)
            .count()
    }

    pub fn was_invoked(&self, program: &str) -> bool {
        self.invocations_of(program) > 0
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(request.clone());

        let stem = request.program_stem().to_string();
        let Some(script) = self
            .scripts
            .iter()
            .find(|script| script.matches(&stem, &request.args))
        else {
            return Ok(ProcessOutput {
                exit_code: Some(0),
                combined: String::new(),
            });
        };

        if script.fail_to_spawn {
            return Err(Error::Spawn {
                program: stem,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted"),
            });
        }
        for file in &script.creates {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(file, b"artifact").unwrap();
        }
        Ok(ProcessOutput {
            exit_code: Some(script.exit_code),
            combined: String::from("scripted output"),
        })
    }
}

/// Minimal on-disk project tree with stub toolchain roots.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for sub in ["native", "drivers", "ui", "cli", "installer"] {
            std::fs::create_dir_all(root.join(sub)).unwrap();
        }
        std::fs::write(root.join("native/coilsense.dpr"), "library coilsense;\n").unwrap();
        std::fs::write(root.join("installer/coilwatch.iss"), "; Inno Setup script\n").unwrap();
        // Stub toolchain roots so resolution succeeds without real installs.
        std::fs::create_dir_all(root.join("sdk/delphi/bin")).unwrap();
        std::fs::create_dir_all(root.join("sdk/fpc/bin")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Resolved configuration pointing at the fixture tree.
    pub fn config(&self, arch: Arch, compiler: CompilerPreference) -> BuildConfig {
        self.config_with(arch, compiler, false, None)
    }

    pub fn config_with(
        &self,
        arch: Arch,
        compiler: CompilerPreference,
        sign: bool,
        iscc: Option<PathBuf>,
    ) -> BuildConfig {
        config::resolve(ResolveRequest {
            arch: Some(arch),
            compiler,
            sign,
            cert_thumbprint: None,
            root_dir: self.root().to_path_buf(),
            host_arch: "x86_64".to_string(),
            delphi_dir: Some(self.root().join("sdk/delphi")),
            fpc_dir: Some(self.root().join("sdk/fpc")),
            iscc_path: iscc,
        })
        .unwrap()
    }

    pub fn add_driver(&self, name: &str) {
        std::fs::write(self.root().join("drivers").join(name), b"driver").unwrap();
    }

    /// The full x64 vendor drop.
    pub fn add_x64_drivers(&self) {
        for name in ["RingBus64.sys", "RingBus32.sys", "RingBusNet.dll"] {
            self.add_driver(name);
        }
    }

    /// Path the compile stage must produce; compiler scripts create it.
    pub fn native_artifact(&self) -> PathBuf {
        self.root().join("native/coilsense.dll")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root().join("bin")
    }

    pub fn gui_publish_dir(&self) -> PathBuf {
        self.root().join("publish/gui")
    }

    pub fn cli_publish_dir(&self) -> PathBuf {
        self.root().join("publish/cli")
    }

    /// Creates a stub packager executable and returns its path.
    pub fn stub_iscc(&self) -> PathBuf {
        let path = self.root().join("sdk/ISCC.exe");
        std::fs::write(&path, b"stub").unwrap();
        path
    }

    /// Where the packager leaves the unqualified installer.
    pub fn raw_installer(&self) -> PathBuf {
        self.root().join("installer/output/coilwatch-setup.exe")
    }

    /// Sorted file names currently present in `bin/`.
    pub fn bin_file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.bin_dir()) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}
