//! CLI Tests
//!
//! Runs the `hostwire-cli` binary against a mock host and checks what
//! lands on stdout or in the output file.

mod common;

use std::process::{Command, Output};

use common::{host_echo_request, host_expect_ack, host_expect_command, host_send_frame, spawn_tcp_host};
use hostwire::Endpoint;

// =============================================================================
// Helper Functions
// =============================================================================

fn run_cli(endpoint: &Endpoint, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hostwire-cli"))
        .env_remove("HOSTWIRE_ENDPOINT")
        .env("RUST_LOG", "off")
        .arg("--endpoint")
        .arg(endpoint.to_string())
        .args(args)
        .output()
        .unwrap()
}

fn spawn_read_host(body: Vec<u8>) -> (Endpoint, std::thread::JoinHandle<()>) {
    spawn_tcp_host(move |mut stream| {
        host_expect_command(&mut stream, b"READ");
        host_expect_ack(&mut stream);
        host_send_frame(&mut stream, &body, 4096);
    })
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_read_raw_body_is_unchanged_on_stdout() {
    let body = vec![0xde, 0xad, 0xbe, 0xef];
    let (endpoint, host) = spawn_read_host(body.clone());

    let out = run_cli(&endpoint, &["read", "READ"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, body);
    host.join().unwrap();
}

#[test]
fn test_read_base64_ends_with_newline() {
    let (endpoint, host) = spawn_read_host(vec![0xde, 0xad, 0xbe, 0xef]);

    let out = run_cli(&endpoint, &["read", "READ", "--base64"]);

    assert!(out.status.success());
    assert_eq!(out.stdout, b"3q2+7w==\n");
    host.join().unwrap();
}

#[test]
fn test_request_raw_is_unchanged_on_stdout() {
    let (endpoint, host) = spawn_tcp_host(|mut stream| {
        host_echo_request(&mut stream, b"GET_IMAGE");
    });

    let out = run_cli(&endpoint, &["request", "GET_IMAGE", "--data", r#"{"x":1}"#, "--raw"]);

    assert!(out.status.success());
    assert_eq!(out.stdout, br#"{"x":1}"#);
    host.join().unwrap();
}

#[test]
fn test_read_to_output_file() {
    let body: Vec<u8> = (0..=255u8).collect();
    let (endpoint, host) = spawn_read_host(body.clone());
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("body.bin");

    let out = run_cli(&endpoint, &["read", "READ", "--output", path.to_str().unwrap()]);

    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(std::fs::read(&path).unwrap(), body);
    host.join().unwrap();
}

// =============================================================================
// Expected Ack Tests
// =============================================================================

#[test]
fn test_expect_ack_hex_accepted() {
    let (endpoint, host) = spawn_tcp_host(|mut stream| {
        host_expect_command(&mut stream, b"PING");
    });

    let out = run_cli(&endpoint, &["--expect-ack", "00", "command", "PING"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, b"\x00\n");
    host.join().unwrap();
}

#[test]
fn test_expect_ack_rejects_bad_hex() {
    let endpoint = Endpoint::Tcp("127.0.0.1:1".to_string());

    for bad in ["zz", "0", ""] {
        let out = run_cli(&endpoint, &["--expect-ack", bad, "command", "PING"]);
        assert!(!out.status.success(), "{:?} should be rejected", bad);
    }
}
