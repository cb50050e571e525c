//! End-to-end host flow: register, create, drain, reset.

use intruder_core::{
    AttackContext, CodecKind, Extension, ExtensionConfig, HostRegistry, HttpService,
    IntruderError, TextMode,
};
use serial_test::serial;
use std::io::Write;

fn attack() -> AttackContext {
    AttackContext::new(
        b"GET /session?id=\xa7AAEC\xa7 HTTP/1.1\r\nHost: app.test\r\n\r\n".to_vec(),
        HttpService::new("app.test", 8443, "https"),
    )
}

fn clear_env() {
    for key in [
        "INTRUDER_GENERATOR_NAME",
        "INTRUDER_EXTENSION_NAME",
        "INTRUDER_LOAD_MESSAGE",
        "INTRUDER_TEXT_MODE",
        "INTRUDER_CODEC",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_full_attack_pass() {
    let mut host = HostRegistry::new();
    Extension::register(&mut host, &ExtensionConfig::default()).unwrap();
    let mut generator = host.create_generator("My Generator", &attack()).unwrap();

    let mut payloads = Vec::new();
    while generator.has_more_payloads() {
        payloads.push(generator.next_payload(b"AAEC").unwrap());
    }
    assert_eq!(payloads.len(), 3 * 255);
    assert_eq!(payloads[0], b"AQEC");
    assert_eq!(payloads[255], b"AAIC");
    assert!(payloads.iter().all(|p| !p.contains(&b'=')));

    generator.reset_payloads();
    assert_eq!(generator.next_payload(b"AAEC").unwrap(), payloads[0]);
}

#[test]
fn test_empty_base_value_fails_loudly() {
    let mut host = HostRegistry::new();
    Extension::register(&mut host, &ExtensionConfig::default()).unwrap();
    let mut generator = host.create_generator("My Generator", &attack()).unwrap();
    assert_eq!(
        generator.next_payload(b"").unwrap_err(),
        IntruderError::PositionOutOfRange {
            position: 0,
            len: 0
        }
    );
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    std::env::set_var("INTRUDER_GENERATOR_NAME", "Byte Walker");
    std::env::set_var("INTRUDER_TEXT_MODE", "utf8");
    std::env::set_var("INTRUDER_CODEC", "identity");

    let cfg = ExtensionConfig::from_env().unwrap();
    clear_env();

    assert_eq!(cfg.generator_name, "Byte Walker");
    assert_eq!(cfg.text_mode, TextMode::Utf8);
    assert_eq!(cfg.codec, CodecKind::Identity);
    assert_eq!(cfg.extension_name, "My Extension");
}

#[test]
#[serial]
fn test_bad_env_value_is_config_error() {
    clear_env();
    std::env::set_var("INTRUDER_CODEC", "rot13");
    let result = ExtensionConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(IntruderError::Config { .. })));
}

#[test]
#[serial]
fn test_file_then_env_precedence() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "generator_name: From File").unwrap();
    writeln!(file, "extension_name: File Extension").unwrap();

    std::env::set_var("INTRUDER_EXTENSION_NAME", "Env Extension");
    let cfg = ExtensionConfig::from_file(file.path())
        .and_then(ExtensionConfig::apply_env)
        .unwrap();
    clear_env();

    assert_eq!(cfg.generator_name, "From File");
    assert_eq!(cfg.extension_name, "Env Extension");

    let mut host = HostRegistry::new();
    Extension::register(&mut host, &cfg).unwrap();
    assert_eq!(host.extension_name(), Some("Env Extension"));
    assert!(host.factory("From File").is_some());
}

#[test]
fn test_missing_config_file() {
    let err = ExtensionConfig::from_file(std::path::Path::new("/nonexistent/intruder.yaml"))
        .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
