//! Property-based tests for struct tag parsing
//!
//! Generated tags must parse into exactly the name and attributes they were
//! built from, and no input may make the lexer panic.

use confdoc_core::config::TagConfig;
use confdoc_core::features::tag_parsing::{lex_struct_tag, ParsedTag, TagError, TagParser};
use proptest::prelude::*;

// Strategy for display names as they appear in yaml tags
fn display_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,15}".prop_filter("not the ignore marker", |s| s != "-")
}

// Strategy for example values without separators or quotes
fn example_value() -> impl Strategy<Value = String> {
    "[a-z0-9.:/]{1,12}"
}

// Strategy for keys other than the display-name key
fn other_key() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("not yaml", |s| s != "yaml")
}

fn build_tag(name: &str, required: bool, example: Option<&str>) -> String {
    let mut attributes = Vec::new();
    attributes.push(if required { "required" } else { "" }.to_string());
    if let Some(example) = example {
        attributes.push(format!("example={example}"));
    }
    format!(r#"yaml:"{name},omitempty" conf:"{}""#, attributes.join(","))
}

proptest! {
    #[test]
    fn prop_parse_recovers_name_and_attributes(
        name in display_name(),
        required in any::<bool>(),
        example in proptest::option::of(example_value()),
    ) {
        let config = TagConfig::default();
        let raw = build_tag(&name, required, example.as_deref());

        let parsed = TagParser::new(&config).parse(Some(&raw)).unwrap();

        let mut expected = ParsedTag::new(name.as_str());
        if required {
            expected = expected.required();
        }
        if let Some(example) = &example {
            expected = expected.with_example(example.as_str());
        }
        prop_assert_eq!(parsed, Some(expected));
    }

    #[test]
    fn prop_quoted_example_is_unwrapped(name in display_name(), example in example_value()) {
        let config = TagConfig::default();
        let raw = format!(r#"yaml:"{name}" conf:",example=\"{example}\"""#);

        let parsed = TagParser::new(&config).parse(Some(&raw)).unwrap().unwrap();

        prop_assert_eq!(parsed.example.as_deref(), Some(example.as_str()));
        prop_assert!(!parsed.required);
    }

    #[test]
    fn prop_tag_without_name_key_is_missing(key in other_key(), value in "[a-z,=]{0,12}") {
        let config = TagConfig::default();
        let raw = format!(r#"{key}:"{value}""#);

        let result = TagParser::new(&config).parse(Some(&raw));

        let is_missing = matches!(result, Err(TagError::Missing { .. }));
        prop_assert!(is_missing);
    }

    #[test]
    fn prop_lexer_never_panics(raw in "\\PC{0,40}") {
        let _ = lex_struct_tag(&raw);
    }

    #[test]
    fn prop_lexer_keeps_subtag_order(
        entries in prop::collection::vec((other_key(), "[a-z0-9 ,=]{0,10}"), 1..5),
    ) {
        let raw = entries
            .iter()
            .map(|(k, v)| format!(r#"{k}:"{v}""#))
            .collect::<Vec<_>>()
            .join(" ");

        let subtags = lex_struct_tag(&raw).unwrap();

        prop_assert_eq!(subtags.len(), entries.len());
        for (subtag, (key, value)) in subtags.iter().zip(&entries) {
            prop_assert_eq!(&subtag.key, key);
            prop_assert_eq!(&subtag.value, value);
        }
    }
}

#[test]
fn test_ignore_marker_excludes_field() {
    let config = TagConfig::default();
    assert_eq!(TagParser::new(&config).parse(Some(r#"yaml:"-""#)).unwrap(), None);
}

#[test]
fn test_unterminated_value_reports_position() {
    match lex_struct_tag(r#"yaml:"port"#) {
        Err(TagError::Malformed { position, .. }) => assert_eq!(position, 5),
        other => panic!("expected malformed, got {other:?}"),
    }
}
