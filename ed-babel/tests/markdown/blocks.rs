//! Element layout when rendering Ed-XML as Markdown.

use crate::common::{doc, ed_to_md};
use insta::assert_snapshot;

#[test]
fn test_heading_snapshot() {
    assert_snapshot!(ed_to_md(&doc(r#"<heading level="1">Title</heading>"#)), @"# Title");
}

#[test]
fn test_paragraphs_are_separated_by_blank_lines() {
    assert_eq!(
        ed_to_md(&doc("<paragraph>one</paragraph><paragraph>two</paragraph>")),
        "one\n\ntwo"
    );
}

#[test]
fn test_inline_markers() {
    assert_eq!(
        ed_to_md(&doc(
            "<paragraph><bold>b</bold> <italic>i</italic> <code>c</code> <underline>u</underline></paragraph>"
        )),
        "**b** *i* `c` <underline>u</underline>"
    );
}

#[test]
fn test_heading_and_callout() {
    assert_eq!(
        ed_to_md(&doc(
            r#"<heading level="2">Setup</heading><callout type="success">Done</callout>"#
        )),
        "## Setup\n\n{.callout type=\"success\"}\nDone"
    );
}

#[test]
fn test_link_alias_and_anchor() {
    assert_eq!(
        ed_to_md(&doc(
            r#"<paragraph><link href="https://a.org">A</link> and <a href="https://b.org">B</a></paragraph>"#
        )),
        "[A](https://a.org) and [B](https://b.org)"
    );
}

#[test]
fn test_break_variants() {
    assert_eq!(
        ed_to_md(&doc("<paragraph>a<break/>b<break></break>c</paragraph>")),
        "a\nb\nc"
    );
}

#[test]
fn test_list_items() {
    assert_eq!(
        ed_to_md(&doc(concat!(
            r#"<list style="number">"#,
            "<list-item><paragraph>first</paragraph></list-item>",
            "<list-item><paragraph>second</paragraph></list-item>",
            "</list>"
        ))),
        "* first\n* second"
    );
}

#[test]
fn test_snippet_fence_line() {
    assert_eq!(
        ed_to_md(&doc(concat!(
            r#"<snippet language="python" extra="x">"#,
            r#"<snippet-file id="code">print(1)</snippet-file>"#,
            "</snippet>"
        ))),
        "```python.extra=\"x\"\nprint(1)\n```"
    );
}

#[test]
fn test_code_escapes_are_decoded() {
    assert_eq!(
        ed_to_md(&doc(r#"<pre>printf("hi\\n");\nreturn 0;</pre>"#)),
        "```\nprintf(\"hi\\n\");\nreturn 0;\n```"
    );
}

#[test]
fn test_inline_code_is_not_unescaped() {
    assert_eq!(
        ed_to_md(&doc(r#"<paragraph><code>a\nb</code></paragraph>"#)),
        "`a\\nb`"
    );
}

#[test]
fn test_table_gets_separator_row() {
    let ed = doc(concat!(
        "<table>",
        "<thead><tr><th>a</th><th>b</th><th>c</th></tr></thead>",
        "<tbody><tr><td>1</td><td>2</td><td>3</td></tr><tr><td>4</td><td>5</td><td>6</td></tr></tbody>",
        "</table>"
    ));
    assert_eq!(ed_to_md(&ed), "|a|b|c|\n|---|---|---|\n|1|2|3|\n|4|5|6|");
}

#[test]
fn test_unknown_element_is_transparent() {
    assert_eq!(
        ed_to_md(&doc(r#"<widget foo="bar">text</widget>"#)),
        "text"
    );
}

#[test]
fn test_html_wrapper_is_transparent() {
    assert_eq!(
        ed_to_md("<html><head></head><body><paragraph>x</paragraph></body></html>"),
        "x"
    );
}

#[test]
fn test_entities_are_decoded() {
    assert_eq!(
        ed_to_md(&doc("<paragraph>a &lt; b &amp;&amp; c</paragraph>")),
        "a < b && c"
    );
}
