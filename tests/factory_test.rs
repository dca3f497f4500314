//! Tests for URI parsing and configuration construction

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use treeconf::application::{ApplicationError, BackendUri, ConfigurationFactory};
use treeconf::config::{PortSettings, Settings};
use treeconf::infrastructure::backends::DocumentFormat;
use treeconf::infrastructure::InfraError;
use treeconf::util::testing::{self, resource_path};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn factory() -> ConfigurationFactory {
    ConfigurationFactory::new(Arc::new(Settings::default()))
}

// ============================================================
// URI parsing
// ============================================================

#[rstest]
#[case("etcd-v3://localhost", "localhost", 2379, "")]
#[case("etcd-v3://10.0.0.1:12379", "10.0.0.1", 12379, "")]
#[case("etcd-v3://localhost:2379/o2/components", "localhost", 2379, "/o2/components")]
fn given_etcd_uri_when_parsing_then_host_port_prefix(
    #[case] uri: &str,
    #[case] host: &str,
    #[case] port: u16,
    #[case] prefix: &str,
) {
    let parsed = BackendUri::parse(uri, &PortSettings::default()).unwrap();
    assert_eq!(
        parsed,
        BackendUri::Etcd {
            host: host.to_string(),
            port,
            prefix: prefix.to_string(),
        }
    );
}

#[test]
fn given_consul_uri_without_port_when_parsing_then_configured_default() {
    let ports = PortSettings {
        etcd: 2379,
        consul: 18500,
    };
    let parsed = BackendUri::parse("consul://consul.local/app", &ports).unwrap();
    assert_eq!(
        parsed,
        BackendUri::Consul {
            host: "consul.local".to_string(),
            port: 18500,
            prefix: "/app".to_string(),
        }
    );
}

#[rstest]
#[case("file:/etc/app.ini", "/etc/app.ini", DocumentFormat::Ini)]
#[case("file://etc/app.json", "/etc/app.json", DocumentFormat::Json)]
#[case("file:///etc/app.yml", "/etc/app.yml", DocumentFormat::Yaml)]
#[case("file:conf/app.TOML", "conf/app.TOML", DocumentFormat::Toml)]
#[case("json:/etc/app.conf", "/etc/app.conf", DocumentFormat::Json)]
#[case("ini:/etc/app", "/etc/app", DocumentFormat::Ini)]
fn given_document_uri_when_parsing_then_path_and_format(
    #[case] uri: &str,
    #[case] path: &str,
    #[case] format: DocumentFormat,
) {
    let parsed = BackendUri::parse(uri, &PortSettings::default()).unwrap();
    assert_eq!(
        parsed,
        BackendUri::Document {
            path: PathBuf::from(path),
            format,
        }
    );
}

#[rstest]
#[case::no_scheme_separator("localhost")]
#[case::unknown_scheme("ftp://localhost/a")]
#[case::missing_slashes("etcd-v3:localhost")]
#[case::empty_host("etcd-v3://:2379/a")]
#[case::empty_consul_host("consul:///a")]
#[case::bad_port("consul://localhost:http")]
#[case::port_out_of_range("etcd-v3://localhost:99999")]
#[case::empty_document_path("file:")]
#[case::unknown_extension("file:/etc/app.txt")]
#[case::no_extension("file:/etc/app")]
fn given_malformed_uri_when_parsing_then_malformed_uri(#[case] uri: &str) {
    let result = BackendUri::parse(uri, &PortSettings::default());
    assert!(
        matches!(result, Err(ApplicationError::MalformedUri { .. })),
        "{uri}: {result:?}"
    );
}

// ============================================================
// get_configuration
// ============================================================

#[test]
fn given_malformed_uri_when_getting_configuration_then_fails_before_io() {
    let result = factory().get_configuration("consul://:8500");
    assert!(matches!(result, Err(ApplicationError::MalformedUri { .. })));
}

#[test]
fn given_file_uri_when_getting_configuration_then_document_is_readable() {
    let uri = format!("file:{}", resource_path("equipment.json").display());

    let conf = factory().get_configuration(&uri).unwrap();

    assert_eq!(conf.backend_name(), "document");
    assert_eq!(conf.get::<i64>("/equipment_1/serial").unwrap(), Some(33333));
}

#[test]
fn given_forced_format_when_getting_configuration_then_extension_is_ignored() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("settings.conf");
    fs::write(&file, "[server]\nport = 8080\n").unwrap();

    let conf = factory()
        .get_configuration(&format!("toml:{}", file.display()))
        .unwrap();

    assert_eq!(conf.get::<i64>("server/port").unwrap(), Some(8080));
}

#[test]
fn given_configured_separator_when_getting_configuration_then_applied() {
    let settings = Settings {
        path_separator: '.',
        ..Settings::default()
    };
    let factory = ConfigurationFactory::new(Arc::new(settings));
    let uri = format!("file:{}", resource_path("sample.ini").display());

    let conf = factory.get_configuration(&uri).unwrap();

    assert_eq!(conf.path_separator(), '.');
    assert_eq!(conf.get::<i64>("section1.key_int").unwrap(), Some(456));
}

#[test]
fn given_etcd_uri_with_path_when_getting_configuration_then_path_becomes_prefix() {
    let settings = Settings {
        path_separator: '.',
        ..Settings::default()
    };
    let factory = ConfigurationFactory::new(Arc::new(settings));

    // No request is made until the configuration is used.
    let conf = factory
        .get_configuration("etcd-v3://localhost:2379/o2/components")
        .unwrap();

    assert_eq!(conf.backend_name(), "etcd");
    assert_eq!(conf.prefix().segments(), ["o2", "components"]);
    assert_eq!(conf.path_separator(), '.');
}

#[test]
fn given_missing_file_when_getting_configuration_then_io_error() {
    let temp = TempDir::new().unwrap();
    let uri = format!("file:{}", temp.path().join("absent.json").display());

    let result = factory().get_configuration(&uri);

    assert!(matches!(
        result,
        Err(ApplicationError::Infra(InfraError::Io { .. }))
    ));
}
