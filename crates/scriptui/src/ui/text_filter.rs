//! Text filter
//!
//! Filter text is a comma separated list of terms:
//!
//! - `""`: pass everything
//! - `"xxx"`: pass text containing `xxx`
//! - `"xxx,yyy"`: pass text containing `xxx` or `yyy`
//! - `"-xxx"`: reject text containing `xxx`
//!
//! Matching ignores ASCII case.

use super::context::Context;
use crate::resource::{Resource, ResourceKind};

/// Longest filter text kept, in bytes
pub const MAX_FILTER_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Include(String),
    Exclude(String),
}

/// Include/exclude filter over text lines
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    text: String,
    terms: Vec<Term>,
    includes: usize,
}

impl TextFilter {
    /// Create a filter from its text
    pub fn new(filter: &str) -> Self {
        let mut text_filter = Self::default();
        text_filter.set(filter);
        text_filter
    }

    /// Replace the filter text and rebuild the terms
    pub fn set(&mut self, filter: &str) {
        let mut end = filter.len().min(MAX_FILTER_LEN);
        while !filter.is_char_boundary(end) {
            end -= 1;
        }
        self.text = filter[..end].to_owned();
        self.build();
    }

    /// Current filter text
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Reset to the empty filter
    pub fn clear(&mut self) {
        self.set("");
    }

    /// Whether any term is set
    pub fn is_active(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Whether `text` passes the filter
    pub fn pass_filter(&self, text: &str) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        let haystack = text.to_ascii_lowercase();
        for term in &self.terms {
            match term {
                Term::Exclude(needle) if haystack.contains(needle.as_str()) => return false,
                Term::Include(needle) if haystack.contains(needle.as_str()) => return true,
                _ => {}
            }
        }

        // Only exclusions: everything not rejected passes
        self.includes == 0
    }

    fn build(&mut self) {
        self.terms.clear();
        for raw in self.text.split(',') {
            let term = raw.trim();
            if term.is_empty() {
                continue;
            }
            match term.strip_prefix('-') {
                Some("") => {}
                Some(excluded) => self.terms.push(Term::Exclude(excluded.to_ascii_lowercase())),
                None => self.terms.push(Term::Include(term.to_ascii_lowercase())),
            }
        }
        self.includes = self
            .terms
            .iter()
            .filter(|term| matches!(term, Term::Include(_)))
            .count();
    }
}

impl Resource for TextFilter {
    fn attachable(&self, owner: &dyn Resource) -> bool {
        owner.as_any().is::<Context>()
    }
}

impl ResourceKind for TextFilter {
    const TYPE_NAME: &'static str = "UI_TextFilter";
}
