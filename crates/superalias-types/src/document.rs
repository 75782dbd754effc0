//! Framing of the YAML header at the top of a Markdown note.

use std::ops::Range;

use serde_json::Value;

use crate::error::{Result, TypeError};
use crate::frontmatter::{parse_frontmatter_aliases, Frontmatter, ALIASES_KEY};

const FENCE: &str = "---";

/// Byte ranges of a header block inside a note.
struct Block {
    yaml: Range<usize>,
    body_start: usize,
}

/// Split a note into its frontmatter block and body.
///
/// A block exists only when the first line is `---` and a later line closes
/// it with `---`. Otherwise the whole input is body and `None` is returned.
pub fn split_frontmatter(content: &str) -> Result<(Option<Frontmatter>, &str)> {
    match locate_block(content) {
        Some(block) => {
            let frontmatter = parse_block(&content[block.yaml])?;
            Ok((Some(frontmatter), &content[block.body_start..]))
        }
        None => Ok((None, content)),
    }
}

/// Rewrite only the `aliases` entry of a note's header.
///
/// Every other header line, the fences and the body are kept byte for byte.
/// An existing top-level `aliases` entry is replaced in place; otherwise the
/// entry is appended at the end of the header. Returns `Ok(None)` when the
/// note has no header block.
pub fn replace_aliases(content: &str, aliases: &[String]) -> Result<Option<String>> {
    let Some(block) = locate_block(content) else {
        return Ok(None);
    };
    parse_block(&content[block.yaml.clone()])?;

    let newline = if content[..block.yaml.start].ends_with("\r\n") { "\r\n" } else { "\n" };
    let entry = render_aliases_entry(aliases, newline)?;

    let yaml = &content[block.yaml.clone()];
    let span = find_aliases_entry(yaml).unwrap_or(yaml.len()..yaml.len());
    let mut rewritten = String::with_capacity(content.len() + entry.len());
    rewritten.push_str(&content[..block.yaml.start + span.start]);
    rewritten.push_str(&entry);
    rewritten.push_str(&content[block.yaml.start + span.end..]);

    let (frontmatter, _) = split_frontmatter(&rewritten)?;
    let found = frontmatter
        .as_ref()
        .and_then(parse_frontmatter_aliases)
        .unwrap_or_default();
    if found != aliases {
        return Err(TypeError::AliasesMismatch {
            expected: aliases.to_vec(),
            found,
        });
    }
    Ok(Some(rewritten))
}

fn locate_block(content: &str) -> Option<Block> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != FENCE {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Some(Block {
                yaml: yaml_start..offset,
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}

/// Span of the top-level `aliases` entry: its key line plus every following
/// indented line or block-sequence item. Trailing blank lines are not part
/// of the entry.
fn find_aliases_entry(yaml: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut span: Option<Range<usize>> = None;
    for line in yaml.split_inclusive('\n') {
        let next = offset + line.len();
        match span.as_mut() {
            None if is_aliases_key_line(line) => span = Some(offset..next),
            None => {}
            Some(span) if is_continuation(line) => {
                if !line.trim().is_empty() {
                    span.end = next;
                }
            }
            Some(_) => break,
        }
        offset = next;
    }
    span
}

fn is_aliases_key_line(line: &str) -> bool {
    let Some((key, _)) = line.split_once(':') else {
        return false;
    };
    matches!(key.trim_end(), ALIASES_KEY | "\"aliases\"" | "'aliases'")
}

fn is_continuation(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with([' ', '\t', '-'])
}

fn render_aliases_entry(aliases: &[String], newline: &str) -> Result<String> {
    let mut entry = Frontmatter::new();
    entry.set_aliases(aliases.to_vec());
    let yaml = serde_yaml::to_string(&entry).map_err(|e| TypeError::Yaml(e.to_string()))?;
    Ok(if newline == "\n" { yaml } else { yaml.replace('\n', newline) })
}

fn parse_block(yaml: &str) -> Result<Frontmatter> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }
    let value: Value = serde_yaml::from_str(yaml).map_err(|e| TypeError::Yaml(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(Frontmatter::from(map)),
        Value::Null => Ok(Frontmatter::new()),
        other => Err(TypeError::InvalidFrontmatter(kind_name(&other).to_string())),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
