//! Client/Server Integration Tests
//!
//! Drives real interactive sessions against a real server over a
//! loopback socket: scripted input lines in, console output captured.

mod common;

use std::fs;

use tempfile::TempDir;

use filebay::client::Session;
use filebay::network::Connection;

/// Run one scripted session against the server at `addr`, returning
/// the captured console output.
fn run_session(addr: std::net::SocketAddr, local_dir: &std::path::Path, script: &str) -> String {
    let conn = Connection::connect(&addr.ip().to_string(), addr.port()).expect("connect");
    let mut session = Session::new(conn).local_dir(local_dir);
    let mut out = Vec::new();
    session
        .run(script.as_bytes(), &mut out)
        .expect("session should terminate cleanly");
    // Echoed file content may be arbitrary bytes; the assertions below
    // only look at ASCII substrings.
    String::from_utf8_lossy(&out).into_owned()
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_put_then_get_roundtrip() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let upload_dir = TempDir::new().unwrap();
    let download_dir = TempDir::new().unwrap();

    let content: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    fs::write(upload_dir.path().join("blob.bin"), &content).unwrap();

    run_session(addr, upload_dir.path(), "put blob.bin\nexit\n");
    assert_eq!(
        fs::read(server_root.path().join("blob.bin")).unwrap(),
        content
    );

    run_session(addr, download_dir.path(), "get blob.bin\nexit\n");
    assert_eq!(
        fs::read(download_dir.path().join("blob.bin")).unwrap(),
        content
    );
}

#[test]
fn test_put_sizes_request_from_local_file() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    fs::write(local.path().join("report.txt"), b"exactly forty-two bytes of file content!!\n").unwrap();

    let output = run_session(addr, local.path(), "put report.txt\nexit\n");

    // Success is silent; the stored copy has the exact length.
    assert!(output.is_empty());
    assert_eq!(
        fs::read(server_root.path().join("report.txt")).unwrap().len(),
        42
    );
}

#[test]
fn test_zero_byte_file_roundtrip() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    fs::write(local.path().join("empty"), b"").unwrap();

    run_session(addr, local.path(), "put empty\nexit\n");

    let download_dir = TempDir::new().unwrap();
    let output = run_session(addr, download_dir.path(), "get empty\nexit\n");

    assert!(output.is_empty());
    assert_eq!(fs::read(download_dir.path().join("empty")).unwrap(), b"");
}

#[test]
fn test_get_echoes_content_to_console() {
    let server_root = TempDir::new().unwrap();
    fs::write(server_root.path().join("motd"), b"welcome aboard\n").unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "get motd\nexit\n");

    assert_eq!(output, "welcome aboard\n");
    assert_eq!(
        fs::read(local.path().join("motd")).unwrap(),
        b"welcome aboard\n"
    );
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_ls_empty_directory_prints_nothing() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "ls\nexit\n");
    assert!(output.is_empty());
}

#[test]
fn test_ls_lists_sorted_names() {
    let server_root = TempDir::new().unwrap();
    fs::write(server_root.path().join("beta"), b"b").unwrap();
    fs::write(server_root.path().join("alpha"), b"a").unwrap();
    fs::create_dir(server_root.path().join("subdir")).unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "ls\nexit\n");

    // Flat name list: one name per line, sorted, directories omitted
    assert_eq!(output, "alpha\nbeta\n");
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_get_missing_file_reports_and_touches_nothing() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "get missing.txt\nexit\n");

    assert!(output.contains("get 'missing.txt'"));
    assert!(output.contains("No such file"));
    assert!(!local.path().join("missing.txt").exists());
}

#[test]
fn test_rm_missing_file_fails_each_time() {
    let server_root = TempDir::new().unwrap();
    fs::write(server_root.path().join("once"), b"x").unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "rm once\nrm once\nexit\n");

    // First rm succeeds silently; the second is exactly one failure
    // line, not a crash and not silent success.
    let failures: Vec<&str> = output.lines().filter(|l| l.contains("rm 'once'")).collect();
    assert_eq!(failures.len(), 1);
    assert!(!server_root.path().join("once").exists());
}

#[test]
fn test_put_missing_local_file_never_reaches_server() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "put nothere.txt\nexit\n");

    assert!(output.contains("nothere.txt"));
    assert!(!server_root.path().join("nothere.txt").exists());
}

#[test]
fn test_session_continues_after_failure() {
    let server_root = TempDir::new().unwrap();
    fs::write(server_root.path().join("real"), b"still here\n").unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "get fake\nget real\nexit\n");

    assert!(output.contains("get 'fake'"));
    assert!(output.contains("still here"));
}

// =============================================================================
// Dispatcher Tests
// =============================================================================

#[test]
fn test_unknown_command_reported() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "frobnicate\nexit\n");
    assert!(output.contains("frobnicate: invalid command"));
}

#[test]
fn test_missing_filename_argument_reported() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "get\nexit\n");
    assert!(output.contains("invalid command"));
}

#[test]
fn test_extra_tokens_reported() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "get a b\nexit\n");
    assert!(output.contains("invalid command"));
}

#[test]
fn test_overlong_filename_rejected_locally() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let long = "n".repeat(60);
    let output = run_session(addr, local.path(), &format!("get {}\nexit\n", long));
    assert!(output.contains("invalid filename"));
}

#[test]
fn test_help_is_local() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "help\nexit\n");
    assert!(output.contains("get filename"));
    assert!(output.contains("List names of files"));
}

#[test]
fn test_blank_lines_ignored() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "\n   \nexit\n");
    assert!(output.is_empty());
}

#[test]
fn test_end_of_input_terminates_cleanly() {
    let server_root = TempDir::new().unwrap();
    let addr = common::spawn_server(server_root.path());

    // No exit command; the script just ends.
    let local = TempDir::new().unwrap();
    let output = run_session(addr, local.path(), "ls\n");
    assert!(output.is_empty());
}
