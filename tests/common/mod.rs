use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Address nothing listens on, so connections are refused quickly.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Isolated working directory with no settings file and no token variables.
pub struct TestEnv {
    _tmp: TempDir,
    pub cwd: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let cwd = tmp.path().join("work");
        fs::create_dir_all(&cwd).expect("create isolated cwd");
        Self { _tmp: tmp, cwd }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("cgx-tagger");
        cmd.current_dir(&self.cwd)
            .env_remove("X_AUTH_TOKEN")
            .env_remove("AUTH_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_settings(&self, body: &str) -> PathBuf {
        let path = self.cwd.join("cloudgenix_settings.toml");
        fs::write(&path, body).expect("write settings");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.cwd.join(name)
    }
}
