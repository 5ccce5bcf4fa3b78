//! The abort path kills the process, so it is exercised by re-running this
//! test binary as a child and inspecting its exit status and stderr.

use std::env;
use std::process::Command;

const CHILD_MARKER: &str = "KITBAG_ABORT_CHILD";

#[test]
fn bug_prints_banner_and_aborts() {
    if env::var_os(CHILD_MARKER).is_some() {
        kitbag_core::bug!("boom {}", 42);
    }

    let exe = env::current_exe().expect("test binary path");
    let output = Command::new(exe)
        .args(["bug_prints_banner_and_aborts", "--nocapture"])
        .env(CHILD_MARKER, "1")
        .output()
        .expect("spawn child test process");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("program paniked at"), "stderr: {stderr}");
    assert!(stderr.contains("abort.rs"), "stderr: {stderr}");
    assert!(stderr.contains("note: boom 42"), "stderr: {stderr}");
    assert!(stderr.contains("stacktrace:"), "stderr: {stderr}");
}
