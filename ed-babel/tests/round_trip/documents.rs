//! Markdown → Ed-XML → Markdown and Ed-XML → Markdown → Ed-XML.

use crate::common::{doc, ed_to_md, fixture, md_to_ed};

#[test]
fn test_safe_markdown_round_trips() {
    let md = fixture("lesson.md");
    let back = ed_to_md(&md_to_ed(&md));
    assert_eq!(back, md.trim_end());
}

#[test]
fn test_ed_document_is_reproduced() {
    let ed = fixture("lesson.xml");
    let ed = ed.trim_end();
    assert_eq!(md_to_ed(&ed_to_md(ed)), ed);
}

#[test]
fn test_snippet_round_trip() {
    let md = "```python.extra=\"x\"\nprint(1)";
    let md = format!("{md}\n```");
    assert_eq!(ed_to_md(&md_to_ed(&md)), md);
}

#[test]
fn test_callout_round_trip() {
    let md = "{.callout type=\"warning\"}\nMind the gap.";
    assert_eq!(ed_to_md(&md_to_ed(md)), md);
}

#[test]
fn test_table_round_trip() {
    let md = "|a|b|c|\n|---|---|---|\n|1|2|3|";
    assert_eq!(ed_to_md(&md_to_ed(md)), md);
}

#[test]
fn test_code_with_escapes_round_trip() {
    let md = "```c\nprintf(\"a\\nb\\\\\");\n```";
    assert_eq!(ed_to_md(&md_to_ed(md)), md);
}

#[test]
fn test_underline_is_kept_as_raw_markup() {
    let ed = doc("<paragraph>x <underline>y</underline></paragraph>");
    assert_eq!(md_to_ed(&ed_to_md(&ed)), ed);
}

#[test]
fn test_nested_list_flattens_into_parent_item() {
    let md = "* a\n  * b\n* c";
    assert_eq!(ed_to_md(&md_to_ed(md)), "* a* b\n* c");
}
