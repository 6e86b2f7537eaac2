//! Block attribute annotations
//!
//! A line consisting only of `{#id .class key="value" key=value}` attaches attributes to the
//! block that starts on the next non-blank line:
//!
//! ```text
//! {.callout type="warning"}
//! Mind the gap.
//! ```
//!
//! comrak has no notion of these, so they are pulled out of the source before parsing. The
//! annotation line is blanked rather than removed, which keeps every other line number intact;
//! the renderer then finds a block's attributes through the block's source position.

use std::collections::HashMap;

/// Attributes attached to one block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockAttributes {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,
}

/// Block attributes keyed by the 1-based source line the block starts on.
pub type AttributeMap = HashMap<usize, BlockAttributes>;

impl BlockAttributes {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Fold `other` into `self`. Later keys win; classes accumulate.
    pub fn merge(&mut self, other: BlockAttributes) {
        if other.id.is_some() {
            self.id = other.id;
        }
        for class in other.classes {
            if !self.has_class(&class) {
                self.classes.push(class);
            }
        }
        self.attrs.extend(other.attrs);
    }
}

/// Parse a single annotation line. Returns `None` if the line is not an annotation.
pub fn parse_annotation(line: &str) -> Option<BlockAttributes> {
    let inner = line.trim().strip_prefix('{')?.strip_suffix('}')?;
    let tokens = tokenize(inner)?;
    if tokens.is_empty() {
        return None;
    }

    let mut attributes = BlockAttributes::default();
    for token in tokens {
        if let Some(id) = token.strip_prefix('#') {
            if id.is_empty() {
                return None;
            }
            attributes.id = Some(id.to_string());
        } else if let Some(class) = token.strip_prefix('.') {
            if class.is_empty() {
                return None;
            }
            attributes.classes.push(class.to_string());
        } else if let Some((key, value)) = token.split_once('=') {
            if key.is_empty() {
                return None;
            }
            attributes
                .attrs
                .insert(key.to_string(), unquote(value).to_string());
        } else {
            return None;
        }
    }
    Some(attributes)
}

/// Split on whitespace outside double quotes. `None` on an unterminated quote.
fn tokenize(input: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Some(tokens)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Opening fence of a fenced code block: the fence character and its run length.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run = trimmed.chars().take_while(|c| *c == first).count();
    (run >= 3).then_some((first, run))
}

/// Remove annotation lines from `source` and collect their attributes.
///
/// Returns the source with every annotation line blanked (line count and trailing newline
/// preserved) and the attributes keyed by the line of the block they annotate. Consecutive
/// annotations merge. Annotations inside fenced code blocks are left alone, and an annotation
/// with no following block is dropped.
pub fn extract_block_attributes(source: &str) -> (String, AttributeMap) {
    let mut map = AttributeMap::new();
    let mut lines: Vec<&str> = Vec::new();
    let mut pending: Option<BlockAttributes> = None;
    let mut open_fence: Option<(char, usize)> = None;

    for (index, line) in source.split('\n').enumerate() {
        let line_number = index + 1;

        if let Some((fence, run)) = open_fence {
            if let Some((c, n)) = fence_marker(line) {
                let rest = line.trim_start().trim_start_matches(c);
                if c == fence && n >= run && rest.trim().is_empty() {
                    open_fence = None;
                }
            }
            lines.push(line);
            continue;
        }

        if let Some(attributes) = parse_annotation(line) {
            pending.get_or_insert_with(BlockAttributes::default).merge(attributes);
            lines.push("");
            continue;
        }

        if !line.trim().is_empty() {
            if let Some(attributes) = pending.take() {
                map.entry(line_number).or_default().merge(attributes);
            }
            open_fence = fence_marker(line);
        }
        lines.push(line);
    }

    (lines.join("\n"), map)
}
