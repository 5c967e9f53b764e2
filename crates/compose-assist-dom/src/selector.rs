//! A small CSS selector subset used by the structural probes.
//!
//! Supported: type (`tr`), class (`.btC`), id (`#main`), attribute presence
//! (`[g_editable]`) and equality (`[role="dialog"]`), compounds of those
//! (`tr.btC`, `[role="textbox"][g_editable="true"]`) and comma-separated
//! lists. Combinators and pseudo-classes are rejected.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::node::ElementData;

/// Selector parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unsupported token {found:?} in selector {selector:?}")]
    Unsupported { selector: String, found: char },

    #[error("unterminated attribute or string in selector {0:?}")]
    Unterminated(String),
}

/// One attribute condition of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    pub name: String,
    /// `None` tests presence only.
    pub value: Option<String>,
}

/// A compound selector: every part must match the same element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeMatch>,
}

impl CompoundSelector {
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|attr| match &attr.value {
            Some(value) => element.attribute(&attr.name) == Some(value.as_str()),
            None => element.attributes.contains_key(&attr.name),
        })
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }
}

/// A parsed selector list. Matches when any compound matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut compounds = Vec::new();
        for part in split_list(trimmed)? {
            compounds.push(parse_compound(part.trim(), trimmed)?);
        }

        Ok(Self {
            source: trimmed.to_string(),
            compounds,
        })
    }

    /// Selector for a single class, e.g. a marker class the caller owns.
    pub fn class(name: &str) -> Self {
        Self {
            source: format!(".{name}"),
            compounds: vec![CompoundSelector {
                classes: vec![name.to_string()],
                ..Default::default()
            }],
        }
    }

    /// The selector text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn compounds(&self) -> &[CompoundSelector] {
        &self.compounds
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split on top-level commas, ignoring commas inside brackets or quotes.
fn split_list(source: &str) -> Result<Vec<&str>, SelectorError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if quote.is_some() || depth > 0 {
        return Err(SelectorError::Unterminated(source.to_string()));
    }
    parts.push(&source[start..]);

    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(SelectorError::Empty);
    }
    Ok(parts)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(part: &str, whole: &str) -> Result<CompoundSelector, SelectorError> {
    let chars: Vec<char> = part.chars().collect();
    let mut pos = 0;
    let mut compound = CompoundSelector::default();

    let unsupported = |found: char| SelectorError::Unsupported {
        selector: whole.to_string(),
        found,
    };

    if pos < chars.len() && is_ident_char(chars[pos]) {
        compound.tag = Some(take_ident(&chars, &mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        match chars[pos] {
            '.' => {
                pos += 1;
                let class = take_ident(&chars, &mut pos);
                if class.is_empty() {
                    return Err(unsupported('.'));
                }
                compound.classes.push(class);
            }
            '#' => {
                pos += 1;
                let id = take_ident(&chars, &mut pos);
                if id.is_empty() {
                    return Err(unsupported('#'));
                }
                compound.id = Some(id);
            }
            '[' => {
                pos += 1;
                compound.attributes.push(parse_attribute(&chars, &mut pos, whole)?);
            }
            other => return Err(unsupported(other)),
        }
    }

    if compound.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(compound)
}

fn parse_attribute(
    chars: &[char],
    pos: &mut usize,
    whole: &str,
) -> Result<AttributeMatch, SelectorError> {
    let skip_ws = |pos: &mut usize| {
        while *pos < chars.len() && chars[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
    };

    skip_ws(pos);
    let name = take_ident(chars, pos);
    if name.is_empty() {
        return Err(SelectorError::Unterminated(whole.to_string()));
    }
    skip_ws(pos);

    let value = match chars.get(*pos) {
        Some(']') => None,
        Some('=') => {
            *pos += 1;
            skip_ws(pos);
            let value = match chars.get(*pos) {
                Some(&q @ ('"' | '\'')) => {
                    *pos += 1;
                    let start = *pos;
                    while *pos < chars.len() && chars[*pos] != q {
                        *pos += 1;
                    }
                    if *pos >= chars.len() {
                        return Err(SelectorError::Unterminated(whole.to_string()));
                    }
                    let value: String = chars[start..*pos].iter().collect();
                    *pos += 1;
                    value
                }
                _ => {
                    let value = take_ident(chars, pos);
                    if value.is_empty() {
                        return Err(SelectorError::Unterminated(whole.to_string()));
                    }
                    value
                }
            };
            skip_ws(pos);
            Some(value)
        }
        Some(&other) => {
            return Err(SelectorError::Unsupported {
                selector: whole.to_string(),
                found: other,
            });
        }
        None => return Err(SelectorError::Unterminated(whole.to_string())),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(SelectorError::Unterminated(whole.to_string()));
    }
    *pos += 1;

    Ok(AttributeMatch {
        name: name.to_ascii_lowercase(),
        value,
    })
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
