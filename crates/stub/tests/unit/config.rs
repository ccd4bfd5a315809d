//! Configuration loading: defaults, partial JSON, files and errors.

use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use nyuzi_stub::{Config, StubError};

#[test]
fn test_defaults_match_the_stock_server() {
    let config = Config::default();
    assert_eq!(config.server.bind_address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.backlog, 4);
    assert_eq!(config.protocol.packet_capacity, 256);
    assert_eq!(config.execution.quantum_cycles, 1000);
    assert_eq!(config.execution.poll_timeout_ms, -1);
    assert_eq!(config.target.strands, 4);
}

#[test]
fn test_every_section_can_be_overridden() {
    let config = Config::from_json(
        r#"{
            "server": { "bind_address": "127.0.0.1", "port": 9000, "backlog": 1 },
            "protocol": { "packet_capacity": 1024 },
            "execution": { "quantum_cycles": 50, "poll_timeout_ms": 20 },
            "target": { "strands": 2, "memory_size": 65536 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:9000");
    assert_eq!(config.server.backlog, 1);
    assert_eq!(config.protocol.packet_capacity, 1024);
    assert_eq!(config.execution.quantum_cycles, 50);
    assert_eq!(config.execution.poll_timeout_ms, 20);
    assert_eq!(config.target.strands, 2);
    assert_eq!(config.target.memory_size, 65536);
}

#[test]
fn test_empty_object_is_all_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.target.memory_size, 16 * 1024 * 1024);
}

#[test]
fn test_malformed_json_is_a_config_error() {
    assert!(matches!(
        Config::from_json(r#"{ "server": { "port": "eight" } }"#),
        Err(StubError::Config(_))
    ));
}

#[test]
fn test_loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "execution": { "quantum_cycles": 7 } }"#)
        .unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.execution.quantum_cycles, 7);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::from_file(dir.path().join("absent.json")),
        Err(StubError::Io(_))
    ));
}
