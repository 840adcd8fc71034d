use super::*;
use crate::model::FileEntry;

#[test]
fn plain_scalar_is_unquoted() {
    assert_eq!(quote_scalar("src/main.rs"), "src/main.rs");
}

#[test]
fn leading_dash_is_quoted() {
    assert_eq!(quote_scalar("-1"), "\"-1\"");
}

#[test]
fn colon_inside_value_is_quoted() {
    assert_eq!(quote_scalar("note: fix"), "\"note: fix\"");
}

#[test]
fn reserved_words_are_quoted_case_insensitively() {
    assert_eq!(quote_scalar("true"), "\"true\"");
    assert_eq!(quote_scalar("NO"), "\"NO\"");
    assert_eq!(quote_scalar("Null"), "\"Null\"");
}

#[test]
fn ordinary_boolean_lookalike_word_is_not_over_quoted() {
    assert_eq!(quote_scalar("falsely"), "falsely");
}

#[test]
fn envelope_with_meta_only_renders_elapsed_ms() {
    let envelope = OutputEnvelope {
        meta: MetaInfo {
            elapsed_ms: 12,
            ..MetaInfo::default()
        },
        ..OutputEnvelope::default()
    };
    let rendered = render(&envelope);
    assert_eq!(rendered, "meta:\n  elapsedMs: 12\n");
}

#[test]
fn multiline_contents_render_as_block_scalar() {
    let mut entry = FileEntry::with_path("a.rs".to_string());
    entry.contents = Some("line one\nline two".to_string());
    let envelope = OutputEnvelope {
        meta: MetaInfo::default(),
        files: Some(vec![entry]),
        ..OutputEnvelope::default()
    };
    let rendered = render(&envelope);
    assert!(rendered.contains("contents: |\n"));
    assert!(rendered.contains("    line one\n"));
    assert!(rendered.contains("    line two\n"));
}

#[test]
fn error_only_envelope_renders_both_fields() {
    let envelope = OutputEnvelope::error("bad argument");
    let rendered = render(&envelope);
    assert!(rendered.starts_with("meta:\n  elapsedMs: 0\n"));
    assert!(rendered.contains("error: bad argument\n"));
}
