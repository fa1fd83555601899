//! INI parsing for `.conf` model files
//!
//! Grammar:
//! - `[section]` starts a section; keys before the first header belong to
//!   [`DEFAULT_SECTION`]
//! - `key = value` is split on the first `=`, both sides trimmed
//! - lines starting with `#` or `;` are comments
//! - a trailing `\` continues the value on the next line
//! - a repeated key keeps its last value

use crate::document::{ConfigDocument, DEFAULT_SECTION};
use crate::error::{ConfigError, Result};
use crate::ConfigParser;

/// Parser for the INI dialect used by model `.conf` files
#[derive(Debug, Default, Clone, Copy)]
pub struct IniParser;

/// A value still collecting continuation lines
struct Pending {
    key: String,
    value: String,
}

impl ConfigParser for IniParser {
    fn parse(&self, input: &str) -> Result<ConfigDocument> {
        let mut doc = ConfigDocument::new();
        let mut section = DEFAULT_SECTION.to_string();
        let mut pending: Option<Pending> = None;

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if let Some(mut open) = pending.take() {
                if line.is_empty() || is_comment(line) {
                    doc.set(&section, &open.key, open.value);
                    continue;
                }
                let (part, more) = strip_continuation(line);
                append_part(&mut open.value, part);
                if more {
                    pending = Some(open);
                } else {
                    doc.set(&section, &open.key, open.value);
                }
                continue;
            }

            if line.is_empty() || is_comment(line) {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                section = parse_header(header, line_no)?;
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: format!("expected `key = value`, found {:?}", line),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: "empty key".to_string(),
                });
            }

            let (value, more) = strip_continuation(value.trim());
            if more {
                pending = Some(Pending {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            } else {
                doc.set(&section, key, value);
            }
        }

        if let Some(open) = pending {
            doc.set(&section, &open.key, open.value);
        }
        Ok(doc)
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

fn parse_header(header: &str, line_no: usize) -> Result<String> {
    let Some(name) = header.strip_suffix(']') else {
        return Err(ConfigError::Parse {
            line: line_no,
            message: "unterminated section header".to_string(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::Parse {
            line: line_no,
            message: "empty section name".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Split off a trailing `\`, reporting whether the value continues
fn strip_continuation(text: &str) -> (&str, bool) {
    match text.strip_suffix('\\') {
        Some(rest) => (rest.trim_end(), true),
        None => (text, false),
    }
}

fn append_part(value: &mut String, part: &str) {
    if part.is_empty() {
        return;
    }
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(part);
}
