//! End-to-end runs of the probe binary.

use std::net::TcpListener;
use std::process::Command;

fn probe_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rebind-cli"))
}

#[test]
fn reports_ephemeral_for_port_zero() {
    let output = probe_binary()
        .arg("127.0.0.1:0")
        .output()
        .expect("failed to run the probe");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("ephemeral request:"),
        "unexpected output: {stdout}"
    );
}

#[test]
fn reports_exclusive_without_interposition() {
    // Pick a port that was free a moment ago and probe it explicitly.
    let port = {
        let holder = TcpListener::bind("127.0.0.1:0").expect("holder bind");
        holder.local_addr().expect("holder addr").port()
    };

    let output = probe_binary()
        .arg(format!("127.0.0.1:{port}"))
        .output()
        .expect("failed to run the probe");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("reuse inactive:"),
        "unexpected output: {stdout}"
    );
}

#[test]
fn rejects_a_malformed_address() {
    let output = probe_binary()
        .arg("not-an-address")
        .output()
        .expect("failed to run the probe");
    assert!(!output.status.success());
}
