//! Tag alias normalization.
//!
//! Ed-XML links have been written both as `<link>` and as `<a>`, and line breaks both as
//! `<break/>` and `<break></break>`. Documents reach us from either converter, so each direction
//! rewrites the aliases into the spelling its parser expects before parsing.

/// Normalize Ed-XML before parsing it into an Ed tree: `<link>` becomes `<a>`,
/// `<break/>` becomes `<break></break>`.
pub fn normalize_for_ed_input(source: &str) -> String {
    let renamed = rename_tag(source, "link", "a");
    renamed
        .replace("<break/>", "<break></break>")
        .replace("<break />", "<break></break>")
}

/// Normalize Markdown (which may carry raw Ed-XML fragments) before parsing it:
/// `<a>` becomes `<link>`, `<break></break>` becomes `<break/>`.
pub fn normalize_for_markdown_input(source: &str) -> String {
    let renamed = rename_tag(source, "a", "link");
    renamed.replace("<break></break>", "<break/>")
}

/// Rename every opening and closing tag called `from` to `to`.
///
/// Only whole tag names match: renaming `a` leaves `<abbr>` untouched.
fn rename_tag(source: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (slash, name) = match after.strip_prefix('/') {
            Some(stripped) => ("/", stripped),
            None => ("", after),
        };

        if let Some(tail) = name.strip_prefix(from) {
            if tail.starts_with(|c: char| c == '>' || c == '/' || c.is_whitespace()) {
                out.push('<');
                out.push_str(slash);
                out.push_str(to);
                rest = tail;
                continue;
            }
        }

        out.push('<');
        rest = after;
    }

    out.push_str(rest);
    out
}
