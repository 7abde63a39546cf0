//! Helpers for driving the built binary end to end.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard};

/// Serializes tests that write stub tools and spawn processes (ETXTBSY).
static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// A scratch workspace with a settings file, stub tools, and a data dir.
pub struct TestEnv {
    _guard: MutexGuard<'static, ()>,
    pub root: tempfile::TempDir,
    pub config: PathBuf,
    pub data: PathBuf,
}

/// Result of one binary run.
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TestEnv {
    /// Workspace whose settings point at working stub converters.
    pub fn new() -> Self {
        let guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let root = tempfile::tempdir().expect("tempdir");
        let tools = root.path().join("tools");
        let data = root.path().join("data");
        std::fs::create_dir_all(&tools).expect("mkdir tools");
        std::fs::create_dir_all(&data).expect("mkdir data");

        let msgpack = write_tool(
            &tools,
            "MsgPack2Json",
            r#"printf '{"ok":true}' > "$3""#,
        );
        let nier = write_tool(&tools, "nier_cli", r#"printf '<root/>' > "$3""#);

        let config = root.path().join("appsettings.json");
        write_settings(&config, &msgpack, &nier);

        Self {
            _guard: guard,
            root,
            config,
            data,
        }
    }

    /// Point the settings file at tools that do not exist.
    pub fn with_missing_tools(self) -> Self {
        let tools = self.root.path().join("absent");
        write_settings(
            &self.config,
            &tools.join("MsgPack2Json"),
            &tools.join("nier_cli"),
        );
        self
    }

    /// Create a source file under the data directory.
    pub fn add_source(&self, relative: &str) -> PathBuf {
        let path = self.data.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(&path, b"\x81\xa2id\x01").expect("write source");
        path
    }

    /// Run the binary against `dir` with this workspace's settings.
    pub fn run_on(&self, dir: &Path) -> RunOutput {
        run(self.command(dir).env_remove("RUST_LOG"))
    }

    /// Run the binary against the data directory.
    pub fn run(&self) -> RunOutput {
        self.run_on(&self.data)
    }

    /// Run against the data directory with `RUST_LOG` set to `filter`.
    pub fn run_with_log(&self, filter: &str) -> RunOutput {
        run(self.command(&self.data).env("RUST_LOG", filter))
    }

    fn command(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gbfr-data-converter"));
        cmd.arg("--config")
            .arg(&self.config)
            .arg("--no-pause")
            .arg(dir)
            .env_remove("GBFR_CONFIG");
        cmd
    }
}

fn run(cmd: &mut Command) -> RunOutput {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().expect("run binary");
    RunOutput {
        code: status.code(),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

fn write_settings(path: &Path, msgpack: &Path, nier: &Path) {
    let settings = serde_json::json!({
        "ToolSettings": {
            "MsgPack2JsonPath": msgpack,
            "NierCliPath": nier,
        },
        "Conversion": { "TimeoutSeconds": 30 },
    });
    std::fs::write(path, serde_json::to_vec_pretty(&settings).expect("json")).expect("write");
}

fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}
