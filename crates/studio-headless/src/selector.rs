#![forbid(unsafe_code)]

//! Minimal CSS selector support.
//!
//! Handles what the site queries: compound selectors made of an optional tag
//! name, an optional `#id` and any number of `.class` parts, joined by the
//! descendant combinator (whitespace). Anything else is rejected at parse
//! time so a typo in a selector shows up as an empty match rather than a
//! silently wrong one.

/// One compound selector, e.g. `li.active#first`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    /// Parse a single compound selector. Returns `None` for unsupported
    /// syntax or an empty string.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let mut compound = Self::default();
        let mut rest = text;

        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            let tag = &rest[..tag_end];
            if !is_ident(tag) {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if !is_ident(name) {
                return None;
            }
            match marker {
                '#' if compound.id.is_none() => compound.id = Some(name.to_owned()),
                '.' => compound.classes.push(name.to_owned()),
                _ => return None,
            }
            rest = &body[end..];
        }
        Some(compound)
    }

    /// Whether an element with these properties matches.
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        self.tag.as_deref().is_none_or(|t| t.eq_ignore_ascii_case(tag))
            && self.id.as_deref().is_none_or(|want| id == Some(want))
            && self.classes.iter().all(|c| classes.contains(c))
    }
}

/// A descendant chain of compounds, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(text: &str) -> Option<Self> {
        let parts = text
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    /// The compound the matched element itself must satisfy.
    pub fn subject(&self) -> &Compound {
        // parse() guarantees at least one part.
        &self.parts[self.parts.len() - 1]
    }

    /// Compounds that must be satisfied by ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Compound> {
        self.parts[..self.parts.len() - 1].iter().rev()
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
