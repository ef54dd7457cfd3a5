//! Template renderer
//!
//! Plain `{name}` substitution over static templates. `{{` and `}}` produce
//! literal braces, which CMake's `${VAR}` syntax needs. There is no
//! expression evaluation, and a placeholder without a value is an error
//! rather than something left in the output.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::value_objects::is_identifier;

/// Template rendering failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template '{template}' references placeholder '{{{placeholder}}}' but no value was supplied")]
    MissingPlaceholder {
        template: &'static str,
        placeholder: String,
    },

    #[error("template '{template}' is malformed at byte {offset}: {reason}")]
    Malformed {
        template: &'static str,
        offset: usize,
        reason: String,
    },
}

/// Values for a render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars(BTreeMap<&'static str, String>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// A named static template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    text: &'static str,
}

enum Piece<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

impl Template {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Placeholder names in order of first use
    pub fn placeholders(&self) -> Result<Vec<&'static str>, TemplateError> {
        let mut names: Vec<&'static str> = Vec::new();
        for piece in self.pieces()? {
            if let Piece::Placeholder(name) = piece {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// Substitute every placeholder. Extra variables are ignored.
    pub fn render(&self, vars: &TemplateVars) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.text.len());
        for piece in self.pieces()? {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Placeholder(name) => {
                    let value =
                        vars.get(name)
                            .ok_or_else(|| TemplateError::MissingPlaceholder {
                                template: self.name,
                                placeholder: name.to_string(),
                            })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    fn pieces(&self) -> Result<Vec<Piece<'static>>, TemplateError> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut pieces = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                    // escaped brace: keep one of the pair
                    pieces.push(Piece::Text(&text[literal_start..=i]));
                    i += 2;
                    literal_start = i;
                }
                b'{' => {
                    pieces.push(Piece::Text(&text[literal_start..i]));
                    let close = text[i + 1..]
                        .find('}')
                        .map(|j| i + 1 + j)
                        .ok_or_else(|| self.malformed(i, "unterminated placeholder".to_string()))?;
                    let name = &text[i + 1..close];
                    if !is_identifier(name) {
                        return Err(self.malformed(i, format!("invalid placeholder name '{}'", name)));
                    }
                    pieces.push(Piece::Placeholder(name));
                    i = close + 1;
                    literal_start = i;
                }
                b'}' => return Err(self.malformed(i, "unmatched '}'".to_string())),
                _ => i += 1,
            }
        }
        pieces.push(Piece::Text(&text[literal_start..]));
        Ok(pieces)
    }

    fn malformed(&self, offset: usize, reason: String) -> TemplateError {
        TemplateError::Malformed {
            template: self.name,
            offset,
            reason,
        }
    }
}
