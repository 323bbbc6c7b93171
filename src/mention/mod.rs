//! `@`-mention extraction and highlighting.
//!
//! Mentions are tokens of the form `@handle` where `handle` is one or more
//! word characters. Tokens are resolved against the team directory by handle
//! first, then by display name, both case-insensitively; unresolved tokens
//! are silently dropped. The matching rule is deliberately naive: adjacent
//! mentions (`@a@b`) tokenize independently, and an email address embedded in
//! prose (`user@example.com`) yields a spurious `@example` token. Both follow
//! the non-overlapping leftmost-match behaviour of the scan and are kept
//! as-is rather than special-cased.

use crate::directory::{TeamDirectory, TeamMember};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::sync::Arc;

#[expect(
    clippy::expect_used,
    reason = "the mention pattern is a fixed literal known to compile"
)]
static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+)").expect("mention pattern compiles"));

/// Resolves `@`-mention tokens against a team directory.
#[derive(Debug, Clone)]
pub struct MentionParser {
    directory: Arc<TeamDirectory>,
}

impl MentionParser {
    /// Creates a parser over the given directory.
    #[must_use]
    pub const fn new(directory: Arc<TeamDirectory>) -> Self {
        Self { directory }
    }

    /// Extracts resolved mention emails from free text.
    ///
    /// Returns emails in first-occurrence order; duplicates are preserved.
    /// Tokens that resolve to no directory member are dropped.
    #[must_use]
    pub fn parse_mentions(&self, text: &str) -> Vec<String> {
        MENTION_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                let handle = caps.get(1).map_or("", |m| m.as_str());
                self.resolve(handle).map(|member| member.email.clone())
            })
            .collect()
    }

    /// Replaces every resolved mention token with an inline highlight
    /// fragment, leaving unresolved tokens verbatim.
    ///
    /// The `@` sigil stays outside the markup, so the rendered output
    /// contains no further `@word` pattern and applying the transform twice
    /// equals applying it once.
    #[must_use]
    pub fn render_with_mention_markup(&self, text: &str) -> String {
        MENTION_PATTERN
            .replace_all(text, |caps: &Captures<'_>| {
                let token = caps.get(0).map_or("", |m| m.as_str());
                let handle = caps.get(1).map_or("", |m| m.as_str());
                self.resolve(handle).map_or_else(
                    || token.to_owned(),
                    |member| format!("@<span class=\"mention\">{}</span>", member.name),
                )
            })
            .into_owned()
    }

    /// Suggests member handles for a partially typed mention.
    ///
    /// Returns ids of members whose handle or name contains the query after
    /// the leading `@`, case-insensitively. Input without a leading `@`
    /// yields nothing.
    #[must_use]
    pub fn suggestions(&self, input: &str) -> Vec<String> {
        let Some(raw_query) = input.strip_prefix('@') else {
            return Vec::new();
        };
        let query = raw_query.to_lowercase();
        self.directory
            .members()
            .iter()
            .filter(|m| m.id.to_lowercase().contains(&query) || m.name.to_lowercase().contains(&query))
            .map(|m| m.id.clone())
            .collect()
    }

    /// Formats stored tag emails for display as `@Name`, falling back to the
    /// raw email for addresses no longer in the directory.
    #[must_use]
    pub fn display_tags(&self, tags: &[String]) -> Vec<String> {
        tags.iter()
            .map(|tag| {
                self.directory
                    .find_by_email(tag)
                    .map_or_else(|| tag.clone(), |member| format!("@{}", member.name))
            })
            .collect()
    }

    /// Returns whether the text contains at least one resolvable mention.
    #[must_use]
    pub fn has_mentions(&self, text: &str) -> bool {
        !self.parse_mentions(text).is_empty()
    }

    fn resolve(&self, handle: &str) -> Option<&TeamMember> {
        self.directory
            .find_by_id(handle)
            .or_else(|| self.directory.find_by_name(handle))
    }
}
