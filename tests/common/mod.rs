//! Shared integration-test harness: a scratch copy of the demo tree and a
//! helper running the `templatedoc` binary against it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A temporary source root populated from `demos/`.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Copies the demo tree into a fresh temporary directory.
    #[allow(clippy::missing_panics_doc)]
    pub fn demo() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
        copy_tree(&demos, dir.path());
        Self { dir }
    }

    /// Root of the fixture tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `rel`, creating parent directories.
    #[allow(clippy::missing_panics_doc)]
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().expect("path has a parent")).expect("create dirs");
        fs::write(path, contents).expect("write fixture file");
    }

    /// Reads a file under the root.
    #[allow(clippy::missing_panics_doc)]
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel))
            .unwrap_or_else(|e| panic!("cannot read {rel}: {e}"))
    }

    /// Returns `true` if `rel` exists under the root.
    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).exists()
    }

    /// Runs the binary with `--root` set to the fixture and colors off.
    #[allow(clippy::missing_panics_doc)]
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_templatedoc"))
            .arg("--root")
            .arg(self.root())
            .args(["--color", "never"])
            .args(args)
            .env_remove("TEMPLATEDOC_LOG_LEVEL")
            .env_remove("TEMPLATEDOC_CONFIG")
            .env_remove("TEMPLATEDOC_ROOT")
            .output()
            .expect("failed to run templatedoc")
    }
}

fn copy_tree(from: &Path, to: &Path) {
    for entry in fs::read_dir(from).expect("read demo dir") {
        let entry = entry.expect("demo dir entry");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            fs::create_dir_all(&target).expect("create dir");
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("copy file");
        }
    }
}

/// Stdout of a finished run, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished run, lossily decoded.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
