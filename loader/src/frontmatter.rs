//! Front matter parsing for instruction documents.
//!
//! ```text
//! ---
//! applyTo: "**/*.py, **/*.ipynb"
//! description: Python conventions
//! ---
//! Body text handed to the assistant.
//! ```
//!
//! `applyTo` is the instruction-file key; `globs` is the `.mdc` rule-file key.
//! Either may be a string or a list of strings. A document with neither key is
//! not scoped to paths and yields no pattern field.

use serde::Deserialize;

const DELIMITER: &str = "---";

/// A document split into its declared pattern field and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Comma-separated pattern field, if the front matter declared one.
    pub pattern_field: Option<String>,
    pub description: Option<String>,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    #[serde(default, rename = "applyTo")]
    apply_to: Option<PatternValue>,
    #[serde(default)]
    globs: Option<PatternValue>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternValue {
    One(String),
    Many(Vec<String>),
}

impl PatternValue {
    fn into_alternatives(self) -> Vec<String> {
        match self {
            Self::One(field) => vec![field],
            Self::Many(list) => list,
        }
    }
}

impl Frontmatter {
    fn pattern_field(self) -> (Option<String>, Option<String>) {
        let alternatives: Vec<String> = self
            .apply_to
            .into_iter()
            .chain(self.globs)
            .flat_map(PatternValue::into_alternatives)
            .collect();
        let field = (!alternatives.is_empty()).then(|| alternatives.join(", "));
        (field, self.description)
    }
}

/// Splits `content` into front matter and body.
///
/// CRLF line endings and a leading byte-order mark are normalised first. The
/// body has its surrounding blank lines removed.
pub fn parse_document(content: &str) -> Result<ParsedDocument, serde_yaml::Error> {
    let normalized = content.replace("\r\n", "\n");
    let text = normalized.strip_prefix('\u{feff}').unwrap_or(&normalized);

    let Some((yaml, body)) = split_frontmatter(text) else {
        return Ok(ParsedDocument {
            pattern_field: None,
            description: None,
            body: trim_body(text),
        });
    };

    let frontmatter = parse_frontmatter(yaml)?;
    let (pattern_field, description) = frontmatter.pattern_field();
    Ok(ParsedDocument {
        pattern_field,
        description,
        body: trim_body(body),
    })
}

/// Returns `(front matter, body)` when `text` opens with a delimited block.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(DELIMITER)?.strip_prefix('\n')?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    match serde_yaml::from_str(yaml) {
        Ok(frontmatter) => Ok(frontmatter),
        Err(err) => {
            // Unquoted globs (`globs: *.ts`) read as YAML aliases. Fall back to
            // a flat key/value scan before giving up.
            if let Some(frontmatter) = parse_flat(yaml) {
                tracing::debug!("Front matter is not valid YAML; used flat key scan ({err})");
                Ok(frontmatter)
            } else {
                Err(err)
            }
        }
    }
}

fn parse_flat(yaml: &str) -> Option<Frontmatter> {
    let mut frontmatter = Frontmatter::default();
    for line in yaml.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim());
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "applyTo" => frontmatter.apply_to = Some(PatternValue::One(value.to_string())),
            "globs" => frontmatter.globs = Some(PatternValue::One(value.to_string())),
            "description" => frontmatter.description = Some(value.to_string()),
            _ => {}
        }
    }
    (frontmatter.apply_to.is_some() || frontmatter.globs.is_some()).then_some(frontmatter)
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(value)
}

fn trim_body(body: &str) -> String {
    body.trim_start_matches('\n').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::parse_document;

    #[test]
    fn apply_to_string() {
        let doc = parse_document(
            "---\napplyTo: \"**/*.py, **/*.ipynb\"\ndescription: Python rules\n---\n\n\
             Use type hints.\n",
        )
        .unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("**/*.py, **/*.ipynb"));
        assert_eq!(doc.description.as_deref(), Some("Python rules"));
        assert_eq!(doc.body, "Use type hints.");
    }

    #[test]
    fn globs_list_is_joined() {
        let doc = parse_document("---\nglobs:\n  - '*.ts'\n  - '*.tsx'\n---\nBody").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("*.ts, *.tsx"));
    }

    #[test]
    fn both_keys_contribute_alternatives() {
        let doc = parse_document("---\napplyTo: '*.vue'\nglobs: '*.css'\n---\nBody").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("*.vue, *.css"));
    }

    #[test]
    fn unquoted_glob_falls_back_to_flat_scan() {
        let doc = parse_document("---\ndescription: TS\nglobs: *.ts, *.tsx\n---\nBody").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("*.ts, *.tsx"));
        assert_eq!(doc.description.as_deref(), Some("TS"));
    }

    #[test]
    fn crlf_line_endings() {
        let doc =
            parse_document("---\r\napplyTo: '*.cs'\r\n---\r\nLine one\r\nLine two\r\n").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("*.cs"));
        assert_eq!(doc.body, "Line one\nLine two");
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let doc = parse_document("\u{feff}---\napplyTo: '*.md'\n---\nBody").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("*.md"));
    }

    #[test]
    fn no_frontmatter_means_no_pattern() {
        let doc = parse_document("# Prompt\n\nDo the thing.\n").unwrap();
        assert!(doc.pattern_field.is_none());
        assert_eq!(doc.body, "# Prompt\n\nDo the thing.");
    }

    #[test]
    fn frontmatter_without_pattern_key() {
        let doc = parse_document("---\nmode: agent\n---\nPrompt body").unwrap();
        assert!(doc.pattern_field.is_none());
        assert_eq!(doc.body, "Prompt body");
    }

    #[test]
    fn empty_frontmatter_block() {
        let doc = parse_document("---\n---\nBody").unwrap();
        assert!(doc.pattern_field.is_none());
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn unterminated_frontmatter_is_plain_text() {
        let doc = parse_document("---\napplyTo: '*.py'\nno closing line").unwrap();
        assert!(doc.pattern_field.is_none());
        assert!(doc.body.starts_with("---"));
    }

    #[test]
    fn closing_delimiter_at_end_of_file() {
        let doc = parse_document("---\napplyTo: '*.rs'\n---").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some("*.rs"));
        assert!(doc.body.is_empty());
    }

    #[test]
    fn malformed_yaml_without_pattern_is_an_error() {
        assert!(parse_document("---\ndescription: [unclosed\n---\nBody").is_err());
    }

    #[test]
    fn body_indentation_is_preserved() {
        let doc = parse_document("---\napplyTo: '*.py'\n---\n\n    code block\n").unwrap();
        assert_eq!(doc.body, "    code block");
    }

    #[test]
    fn empty_apply_to_is_kept_for_the_registry_to_reject() {
        let doc = parse_document("---\napplyTo: ''\n---\nBody").unwrap();
        assert_eq!(doc.pattern_field.as_deref(), Some(""));
    }
}
