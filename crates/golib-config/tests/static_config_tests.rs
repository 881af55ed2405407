//! Tests for the fixed-table `StaticConfig` reader.

mod common;

use common::*;
use golib_config::{mapping, ConfigError, ConfigReader, ErrorKind, StaticConfig, Value};

/// Code under test only sees the trait.
fn read_port(cfg: &impl ConfigReader) -> golib_config::Result<u16> {
    let mut port = 80u16;
    match cfg.get_by_key("server.port", &mut port) {
        Err(err) if err.is_no_such_key() => Ok(port),
        other => other.map(|()| port),
    }
}

#[test]
fn empty_table_has_no_data() {
    let cfg = StaticConfig::new();
    let mut s = String::new();
    assert_eq!(cfg.get(&mut s).unwrap_err().kind(), ErrorKind::NoData);
    assert_eq!(
        cfg.get_by_key("any", &mut s).unwrap_err().kind(),
        ErrorKind::NoData
    );
}

#[test]
fn keys_are_literal() {
    let cfg = StaticConfig::new()
        .with_value("server.port", 9000)
        .with_value("server", mapping! { "port" => 1 });
    assert_eq!(read_port(&cfg).unwrap(), 9000);

    let mut port = 0u16;
    let err = cfg.get_by_key("server..port", &mut port).unwrap_err();
    assert!(err.is_no_such_key());
}

#[test]
fn absent_key_falls_back() {
    let cfg = StaticConfig::new().with_value("other", 1);
    assert_eq!(read_port(&cfg).unwrap(), 80);
}

#[test]
fn injected_error_reaches_the_caller() {
    let cfg = StaticConfig::new().with_error("server.port", || ConfigError::NoData);
    assert_eq!(read_port(&cfg).unwrap_err().kind(), ErrorKind::NoData);
}

#[test]
fn values_go_through_the_converter() {
    let cfg = StaticConfig::new()
        .with_value("", Value::Mapping(expected_raw_json()))
        .with_value("port", 8080.9);

    let mut data = SampleConfig::default();
    cfg.get(&mut data).unwrap();
    assert_eq!(data, expected_config());

    let mut port = 0u16;
    cfg.get_by_key("port", &mut port).unwrap();
    assert_eq!(port, 8080);

    let mut wrong = false;
    let err = cfg.get_by_key("port", &mut wrong).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MismatchedTypes);
}
