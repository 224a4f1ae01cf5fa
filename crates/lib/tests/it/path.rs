//! Tests for path parsing, canonical strings and construction helpers.

use formstate::{Path, PathBuilder, Segment, path};

#[test]
fn test_bracket_and_dotted_notation_are_the_same_path() {
    let bracket = Path::parse("orders[2].lines[0].sku");
    let dotted = Path::parse("orders.2.lines.0.sku");
    assert_eq!(bracket, dotted);
    assert_eq!(bracket.to_canonical_string(), "orders.2.lines.0.sku");
}

#[test]
fn test_structural_equality_across_constructions() {
    let parsed = Path::parse("rows.3.title");
    let built = PathBuilder::new().field("rows").index(3).field("title").build();
    let from_segments = Path::from_segments([Segment::from("rows"), Segment::from(3usize), Segment::from("title")]);
    assert_eq!(parsed, built);
    assert_eq!(parsed, from_segments);
    assert_eq!(parsed, path!("rows", 3, "title"));
}

#[test]
fn test_builder_is_immutable() {
    let rows = PathBuilder::new().field("rows");
    let first = rows.index(0);
    let second = rows.index(1);
    assert_eq!(Path::from(first), Path::parse("rows.0"));
    assert_eq!(Path::from(second), Path::parse("rows.1"));
    assert_eq!(rows.build(), Path::parse("rows"));
}

#[test]
fn test_concat_with_empty_sides() {
    let group = Path::parse("address");
    assert_eq!(group.concat(&Path::root()), group);
    assert_eq!(Path::root().concat(&group), group);
    assert_eq!(group.concat(&Path::parse("street")).to_string(), "address.street");
}

#[test]
fn test_parent_head_and_index() -> formstate::Result<()> {
    let path = Path::parse("items.4");
    assert_eq!(path.parent()?, Path::parse("items"));
    assert_eq!(path.head()?.to_string(), "4");
    assert_eq!(path.head_as_index()?, 4);
    Ok(())
}

#[test]
fn test_structural_errors() {
    let root_parent: formstate::Error = Path::root().parent().unwrap_err().into();
    assert!(root_parent.is_path_error());
    assert_eq!(root_parent.module(), "path");

    assert!(Path::root().head().unwrap_err().is_empty_path());
    assert!(Path::parse("items.name").head_as_index().unwrap_err().is_not_a_number());
}

#[test]
fn test_path_serializes_as_canonical_string() {
    let path = Path::parse("a[1].b");
    assert_eq!(serde_json::to_string(&path).unwrap(), r#""a.1.b""#);
    let back: Path = serde_json::from_str(r#""a[1].b""#).unwrap();
    assert_eq!(back, path);
}
