//! Shared test helpers: stub converter executables and processor wiring.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use gbfr_converter::processor::ProgressObserver;
use gbfr_converter::{BatchProcessor, ConverterSet, FileOutcome, ToolExecutor};
use gbfr_core::config::conversion::ConversionConfig;
use gbfr_core::config::tools::ToolSettings;

/// Serializes tests that write and spawn executables.
///
/// Writing a script while another thread forks can leave the script's
/// write handle open in the child, making `exec` fail with ETXTBSY.
pub static PROCESS_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// `MsgPack2Json json <in> <out>` that writes JSON.
pub const MSGPACK_OK: &str = r#"[ "$1" = "json" ] || exit 64
printf '{"converted":true}' > "$3""#;

/// `nier_cli <in> -o <out>` that writes XML.
pub const BXM_OK: &str = r#"[ "$2" = "-o" ] || exit 64
printf '<root/>' > "$3""#;

/// Fails with a message on stderr.
pub const FAILING: &str = r#"echo "corrupt input" >&2
exit 3"#;

/// Claims success without writing anything.
pub const SILENT: &str = "exit 0";

/// Writes a zero-length output for `MsgPack2Json` argument order.
pub const MSGPACK_EMPTY: &str = r#": > "$3""#;

/// Never finishes on its own.
pub const HANGING: &str = "exec sleep 30";

/// Starts writing JSON, then never finishes.
pub const MSGPACK_PARTIAL_THEN_HANG: &str = r#"printf '{"trunc' > "$3"
exec sleep 30"#;

/// Exits 0 but leaves a background child holding stdout and stderr.
pub const MSGPACK_DETACHED_CHILD: &str = r#"printf '{}' > "$3"
sleep 30 &
exit 0"#;

/// Writes output, then removes the input itself (`MsgPack2Json` order).
pub const MSGPACK_EATS_INPUT: &str = r#"printf '{}' > "$3"
rm -f "$2""#;

/// Leaves a marker next to itself when invoked.
pub const RECORDS_INVOCATION: &str = r#"touch "$0.invoked"
exit 0"#;

/// Write an executable `/bin/sh` script named `name` into `dir`.
pub fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write tool");
    let mut perms = std::fs::metadata(&path).expect("stat tool").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod tool");
    path
}

/// Whether the tool written by [`write_tool`] was run.
pub fn was_invoked(tool: &Path) -> bool {
    let mut marker = tool.as_os_str().to_owned();
    marker.push(".invoked");
    PathBuf::from(marker).exists()
}

/// Write a fake binary source file.
pub fn write_source(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, b"\x82\xa4name\xa3gbf").expect("write source");
}

/// A processor wired to the given stub tools.
pub fn processor(msgpack_tool: &Path, bxm_tool: &Path, config: ConversionConfig) -> BatchProcessor {
    BatchProcessor::with_parts(
        ConverterSet::from_settings(&ToolSettings::new(msgpack_tool, bxm_tool)),
        ToolExecutor::from_config(&config),
        config,
    )
}

/// Conversion settings with a short timeout.
pub fn quick_config() -> ConversionConfig {
    ConversionConfig {
        timeout_seconds: 10,
        ..Default::default()
    }
}

/// Per-file events captured by [`RecordingObserver`].
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// `(index, total, path)` for each started file.
    pub started: Vec<(usize, usize, PathBuf)>,
    /// Path and success flag for each finished file.
    pub finished: Vec<(PathBuf, bool)>,
}

impl ProgressObserver for RecordingObserver {
    fn file_started(&mut self, index: usize, total: usize, path: &Path) {
        self.started.push((index, total, path.to_path_buf()));
    }

    fn file_finished(&mut self, path: &Path, outcome: &FileOutcome) {
        self.finished.push((path.to_path_buf(), outcome.is_success()));
    }
}

/// Shortcut for tests that need a wall-clock bound.
pub const TEST_DEADLINE: Duration = Duration::from_secs(20);
