//! Tests for path parsing and rendering

use rstest::rstest;

use treeconf::domain::{DomainError, Path};

#[rstest]
#[case("/a/b/c", '/')]
#[case("a/b/c", '/')]
#[case(".a.b.c", '.')]
#[case("a.b.c", '.')]
#[case("a.b.c.", '.')]
#[case(":a:b:c", ':')]
fn given_separator_when_parsing_equivalent_strings_then_same_segments(
    #[case] input: &str,
    #[case] separator: char,
) {
    let path = Path::parse(input, separator).unwrap();
    assert_eq!(path.segments(), ["a", "b", "c"]);
}

#[rstest]
#[case("")]
#[case("/")]
fn given_empty_or_lone_separator_when_parsing_then_root(#[case] input: &str) {
    assert!(Path::parse(input, '/').unwrap().is_root());
}

#[rstest]
#[case("/a//b")]
#[case("a//")]
#[case("///")]
fn given_doubled_separator_when_parsing_then_malformed_path(#[case] input: &str) {
    assert!(matches!(
        Path::parse(input, '/'),
        Err(DomainError::MalformedPath { .. })
    ));
}

#[rstest]
#[case("a/b.c")]
#[case(".a.b/")]
fn given_dot_separator_when_segment_contains_slash_then_invalid_key(#[case] input: &str) {
    assert!(matches!(
        Path::parse(input, '.'),
        Err(DomainError::InvalidKey { .. })
    ));
}

#[test]
fn given_prefix_when_joining_then_segments_concatenate() {
    let prefix = Path::parse("/equipment_1", '/').unwrap();
    let joined = prefix.join(&Path::parse("serial", '/').unwrap());
    assert_eq!(joined.to_string(), "/equipment_1/serial");
    assert_eq!(prefix.join(&Path::root()), prefix);
}

#[test]
fn given_prefix_when_stripping_then_relative_path() {
    let full = Path::parse("/a/b/c", '/').unwrap();
    let prefix = Path::parse("/a", '/').unwrap();

    assert_eq!(full.strip_prefix(&prefix).unwrap().segments(), ["b", "c"]);
    assert!(prefix.strip_prefix(&full).is_none());
}

#[test]
fn given_path_when_rendering_with_separator_then_leading_separator() {
    let path = Path::from_segments(["menu", "popup"]).unwrap();
    assert_eq!(path.to_string_with('.'), ".menu.popup");
    assert_eq!(path.to_store_key(), "/menu/popup");
}

#[test]
fn given_empty_segment_when_building_from_segments_then_fails() {
    assert!(Path::from_segments(["a", ""]).is_err());
}

#[test]
fn given_slash_in_segment_when_building_from_segments_then_invalid_key() {
    assert!(matches!(
        Path::from_segments(["a/b", "c"]),
        Err(DomainError::InvalidKey { .. })
    ));
}
