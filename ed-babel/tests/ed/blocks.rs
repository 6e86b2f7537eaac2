//! Block and inline element mapping from Markdown to Ed-XML.

use crate::common::{doc, md_to_ed};
use insta::assert_snapshot;

#[test]
fn test_bold_inside_paragraph() {
    assert_snapshot!(md_to_ed("**bold**"), @r#"<document version="2.0"><paragraph><bold>bold</bold></paragraph></document>"#);
}

#[test]
fn test_heading_level() {
    let ed = md_to_ed("# Title");
    assert!(ed.contains(r#"<heading level="1">Title</heading>"#));

    let ed = md_to_ed("### Deeper");
    assert!(ed.contains(r#"<heading level="3">Deeper</heading>"#));
}

#[test]
fn test_emphasis_and_inline_code() {
    assert_eq!(
        md_to_ed("Use *care* with `rm -rf`."),
        doc("<paragraph>Use <italic>care</italic> with <code>rm -rf</code>.</paragraph>")
    );
}

#[test]
fn test_link_destination_is_escaped() {
    assert_eq!(
        md_to_ed("[Ed](https://edstem.org/?a=1&b=2)"),
        doc(r#"<paragraph><link href="https://edstem.org/?a=1&amp;b=2">Ed</link></paragraph>"#)
    );
}

#[test]
fn test_lists() {
    assert_eq!(
        md_to_ed("* one\n* two\n"),
        doc(concat!(
            r#"<list style="bullet">"#,
            "<list-item><paragraph>one</paragraph></list-item>",
            "<list-item><paragraph>two</paragraph></list-item>",
            "</list>"
        ))
    );
    assert!(md_to_ed("1. first\n2. second\n").contains(r#"<list style="number">"#));
}

#[test]
fn test_callout_annotation() {
    assert_eq!(
        md_to_ed("{.callout type=\"warning\"}\nMind the gap.\n"),
        doc(r#"<callout type="warning">Mind the gap.</callout>"#)
    );
}

#[test]
fn test_annotation_without_callout_class_keeps_paragraph() {
    assert_eq!(
        md_to_ed("{#intro}\nHello\n"),
        doc("<paragraph>Hello</paragraph>")
    );
}

#[test]
fn test_snippet_from_info_string() {
    let md = "```python.extra=\"x\"\nprint(1)\n```\n";
    assert_eq!(
        md_to_ed(md),
        doc(concat!(
            r#"<snippet language="python" extra="x">"#,
            r#"<snippet-file id="code">print(1)</snippet-file>"#,
            "</snippet>"
        ))
    );
}

#[test]
fn test_bare_snippet_flags_become_true() {
    let ed = md_to_ed("```java.runnable\nclass A {}\n```\n");
    assert!(ed.contains(r#"<snippet language="java" runnable="true">"#));
}

#[test]
fn test_pre_encodes_newlines() {
    let md = "```\nprintf(\"hi\\n\");\nreturn 0;\n```\n";
    assert_eq!(
        md_to_ed(md),
        doc(r#"<pre>printf("hi\\n");\nreturn 0;</pre>"#)
    );
}

#[test]
fn test_code_is_xml_escaped() {
    let ed = md_to_ed("```\nif a < b && c {}\n```\n");
    assert_eq!(ed, doc("<pre>if a &lt; b &amp;&amp; c {}</pre>"));
}

#[test]
fn test_math() {
    assert_eq!(
        md_to_ed("Euler: $e^{i\\pi}$"),
        doc("<paragraph>Euler: $e^{i\\pi}$</paragraph>")
    );
    assert_eq!(
        md_to_ed("$$x^2$$\n"),
        doc("<paragraph>$$</paragraph><paragraph>x^2</paragraph>")
    );
}

#[test]
fn test_breaks() {
    assert_eq!(
        md_to_ed("soft\nbreak"),
        doc("<paragraph>soft break</paragraph>")
    );
    assert_eq!(
        md_to_ed("hard  \nbreak"),
        doc("<paragraph>hard<break/>break</paragraph>")
    );
}

#[test]
fn test_table() {
    let md = "| a | b | c |\n|---|---|---|\n| 1 | 2 | 3 |\n";
    assert_eq!(
        md_to_ed(md),
        doc(concat!(
            "<table>",
            "<thead><tr><th>a</th><th>b</th><th>c</th></tr></thead>",
            "<tbody><tr><td>1</td><td>2</td><td>3</td></tr></tbody>",
            "</table>"
        ))
    );
}

#[test]
fn test_raw_html_passes_through() {
    assert_eq!(
        md_to_ed("Some <underline>marked</underline> text"),
        doc("<paragraph>Some <underline>marked</underline> text</paragraph>")
    );
}

#[test]
fn test_anchor_alias_is_normalized() {
    assert_eq!(
        md_to_ed(r#"See <a href="https://x.org">this</a>"#),
        doc(r#"<paragraph>See <link href="https://x.org">this</link></paragraph>"#)
    );
}

#[test]
fn test_output_is_single_line() {
    let ed = md_to_ed("# A\n\nPara one\ncontinued.\n\n- x\n- y\n\n```\nl1\nl2\n```\n");
    assert!(!ed.contains('\n'));
    assert!(!ed.contains('\r'));
}

#[test]
fn test_unmapped_blocks_keep_their_content() {
    assert_eq!(
        md_to_ed("> quoted\n\n---\n"),
        doc("<paragraph>quoted</paragraph>")
    );
}
