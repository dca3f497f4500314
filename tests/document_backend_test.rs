//! Configuration over parsed documents (INI, JSON, YAML)

use treeconf::application::{ApplicationError, Configuration};
use treeconf::branch;
use treeconf::domain::DomainError;
use treeconf::infrastructure::backends::{DocumentBackend, DocumentFormat};
use treeconf::infrastructure::InfraError;
use treeconf::util::testing::{self, resource_path};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn open(name: &str, format: DocumentFormat) -> Configuration {
    let backend = DocumentBackend::from_file(&resource_path(name), format).expect("parse document");
    Configuration::new(Box::new(backend))
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================
// JSON
// ============================================================

#[test]
fn given_equipment_json_when_reading_typed_then_values_match() {
    let conf = open("equipment.json", DocumentFormat::Json);

    assert!(conf.get_required::<bool>("equipment_1/enabled").unwrap());
    assert_eq!(conf.get_required::<i32>("equipment_1/serial").unwrap(), 33333);
    assert_eq!(conf.get_required::<String>("equipment_1/type").unwrap(), "rorc");
}

#[test]
fn given_equipment_json_when_reading_recursive_map_then_traversal_order_and_flat_rendering() {
    let conf = open("equipment.json", DocumentFormat::Json);

    let map = conf.get_recursive_map("/").unwrap();

    assert_eq!(
        map,
        pairs(&[
            ("/equipment_1/enabled", "1"),
            ("/equipment_1/type", "rorc"),
            ("/equipment_1/serial", "33333"),
            ("/equipment_1/channel", "0"),
        ])
    );
}

#[test]
fn given_equipment_json_when_reading_root_then_equals_built_tree() {
    let conf = open("equipment.json", DocumentFormat::Json);
    assert_eq!(conf.get_recursive("").unwrap(), testing::equipment_tree());
}

#[test]
fn given_menu_json_when_reading_nested_subtrees_then_rerooted() {
    let conf = open("menu.json", DocumentFormat::Json);

    let popup = conf.get_recursive("/menu/popup").unwrap();
    assert_eq!(
        popup,
        branch! {
            "menuitem1" => branch! { "value" => "New", "onclick" => "CreateNewDoc()" },
            "menuitem2" => branch! { "value" => "Close", "onclick" => "CloseDoc()" },
        }
    );

    let item = conf.get_recursive("/menu/popup/menuitem2").unwrap();
    assert_eq!(item.get::<String>("value").unwrap(), Some("Close".to_string()));
}

#[test]
fn given_prefix_when_reading_recursive_then_paths_relative_to_prefix() {
    let mut conf = open("menu.json", DocumentFormat::Json);
    let direct = conf.get_recursive("/menu/popup").unwrap();

    conf.set_prefix("/menu/popup").unwrap();

    assert_eq!(conf.get_recursive("/").unwrap(), direct);
    assert_eq!(
        conf.get_recursive_map("/menuitem1").unwrap(),
        pairs(&[("/value", "New"), ("/onclick", "CreateNewDoc()")])
    );
    assert_eq!(
        conf.get::<String>("menuitem1/value").unwrap(),
        Some("New".to_string())
    );
}

#[test]
fn given_prefix_when_replaced_then_resolved_from_root() {
    let mut conf = open("menu.json", DocumentFormat::Json);
    conf.set_prefix("/menu/popup").unwrap();
    conf.set_prefix("/menu").unwrap();

    assert_eq!(conf.get::<String>("id").unwrap(), Some("file".to_string()));
}

#[test]
fn given_unknown_path_when_reading_recursive_then_path_not_found() {
    let conf = open("menu.json", DocumentFormat::Json);
    assert!(matches!(
        conf.get_recursive("/menu/nope"),
        Err(ApplicationError::Domain(DomainError::PathNotFound { .. }))
    ));
}

#[test]
fn given_json_with_array_when_opening_then_rejected() {
    let result = DocumentBackend::from_file(&resource_path("array.json"), DocumentFormat::Json);
    assert!(matches!(result, Err(InfraError::Document { .. })));
}

#[test]
fn given_document_when_putting_then_not_supported() {
    let mut conf = open("equipment.json", DocumentFormat::Json);

    let result = conf.put_int("/equipment_1/serial", 1);

    assert!(matches!(
        result,
        Err(ApplicationError::Infra(InfraError::NotSupported { .. }))
    ));
    assert_eq!(conf.get::<i64>("/equipment_1/serial").unwrap(), Some(33333));
}

// ============================================================
// INI / YAML
// ============================================================

#[test]
fn given_ini_with_dot_separator_when_reading_then_sections_are_branches() {
    let mut conf = open("sample.ini", DocumentFormat::Ini);
    conf.set_path_separator('.');

    assert_eq!(conf.get::<i64>("key1").unwrap(), Some(123));
    assert_eq!(conf.get::<String>("key2").unwrap(), Some("abc".to_string()));
    assert_eq!(conf.get::<i64>("section1.key_int").unwrap(), Some(456));
    assert_eq!(
        conf.get::<String>("section1.key_str").unwrap(),
        Some("hello".to_string())
    );
    assert_eq!(conf.get::<f64>("section2.key_float").unwrap(), Some(1.5));
    assert_eq!(conf.get::<String>("section1.nope").unwrap(), None);
}

#[test]
fn given_ini_section_when_reading_recursive_map_then_dot_rendered_paths() {
    let mut conf = open("sample.ini", DocumentFormat::Ini);
    conf.set_path_separator('.');

    let map = conf.get_recursive_map("section1").unwrap();

    assert_eq!(map, pairs(&[(".key_int", "456"), (".key_str", "hello")]));
}

#[test]
fn given_yaml_and_json_with_same_content_when_parsing_then_trees_equal() {
    let yaml = open("equipment.yaml", DocumentFormat::Yaml);
    let json = open("equipment.json", DocumentFormat::Json);

    assert_eq!(yaml.get_recursive("").unwrap(), json.get_recursive("").unwrap());
}

#[test]
fn given_missing_file_when_opening_then_io_error() {
    let result = DocumentBackend::from_file(&resource_path("nope.json"), DocumentFormat::Json);
    assert!(matches!(result, Err(InfraError::Io { .. })));
}
