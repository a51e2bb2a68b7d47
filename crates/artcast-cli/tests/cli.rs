use std::fs;
use std::net::UdpSocket;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("artcast"))
}

fn receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("read timeout");
    socket
}

fn recv_datagram(socket: &UdpSocket) -> Vec<u8> {
    let mut buf = [0u8; 1024];
    let (len, _) = socket.recv_from(&mut buf).expect("datagram");
    buf[..len].to_vec()
}

#[test]
fn help_lists_send() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("send"));
    cmd().arg("send").arg("--help").assert().success();
}

#[test]
fn missing_destination_shows_error_and_hint() {
    cmd()
        .arg("send")
        .arg("--count")
        .arg("1")
        .assert()
        .failure()
        .stderr(contains("error: missing destination").and(contains("hint:")));
}

#[test]
fn invalid_rate_is_rejected() {
    cmd()
        .arg("send")
        .arg("127.0.0.1")
        .arg("--rate")
        .arg("0")
        .arg("--count")
        .arg("1")
        .assert()
        .failure()
        .stderr(contains("invalid rate"));
}

#[test]
fn sends_requested_frame_count_with_sequences() {
    let rx = receiver();
    let port = rx.local_addr().unwrap().port();

    let assert = cmd()
        .arg("send")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(port.to_string())
        .arg("--universe")
        .arg("5")
        .arg("--net")
        .arg("1")
        .arg("--rate")
        .arg("1000")
        .arg("--count")
        .arg("3")
        .arg("--json")
        .assert()
        .success()
        .stderr(contains("OK: 3 frame(s) sent"));

    for expected in 1..=3u8 {
        let datagram = recv_datagram(&rx);
        assert_eq!(datagram.len(), 530);
        assert_eq!(datagram[12], expected);
        assert_eq!(datagram[14], 5);
        assert_eq!(datagram[15], 1);
        assert_eq!(datagram[18 + 10], 10);
    }

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let summary: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(summary["frames_sent"], 3);
    assert_eq!(summary["last_sequence"], 3);
    assert_eq!(summary["pattern"], "ramp");
}

#[test]
fn full_pattern_sets_every_channel() {
    let rx = receiver();
    let addr = rx.local_addr().unwrap();

    cmd()
        .arg("send")
        .arg(addr.to_string())
        .arg("--pattern")
        .arg("full")
        .arg("--count")
        .arg("1")
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());

    let datagram = recv_datagram(&rx);
    assert!(datagram[18..].iter().all(|&v| v == 255));
}

#[test]
fn config_file_supplies_destination() {
    let rx = receiver();
    let addr = rx.local_addr().unwrap();
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("client.json");
    fs::write(
        &config,
        format!(r#"{{"destination": "127.0.0.1", "port": {}}}"#, addr.port()),
    )
    .expect("write config");

    cmd()
        .arg("send")
        .arg("--config")
        .arg(&config)
        .arg("--pattern")
        .arg("level")
        .arg("--level")
        .arg("42")
        .arg("--count")
        .arg("1")
        .assert()
        .success();

    let datagram = recv_datagram(&rx);
    assert!(datagram[18..].iter().all(|&v| v == 42));
}

#[test]
fn missing_config_file_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.json");

    cmd()
        .arg("send")
        .arg("--config")
        .arg(missing)
        .arg("--count")
        .arg("1")
        .assert()
        .failure()
        .stderr(contains("config file not found").and(contains("hint:")));
}

#[test]
fn invalid_config_file_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("client.json");
    fs::write(&config, "{\"port\": 6454}").expect("write config");

    cmd()
        .arg("send")
        .arg("--config")
        .arg(&config)
        .arg("--count")
        .arg("1")
        .assert()
        .failure()
        .stderr(contains("invalid config file"));
}

#[test]
fn unreachable_node_still_exits_cleanly() {
    let addr = {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind");
        socket.local_addr().expect("local addr")
    };

    cmd()
        .arg("send")
        .arg(addr.to_string())
        .arg("--count")
        .arg("1")
        .assert()
        .success()
        .stderr(contains("OK: 1 frame(s) sent"));
}
