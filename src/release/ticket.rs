//! Ticket identifier extraction from pull request descriptions.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::github::error::ReleaseError;

/// Pattern marking the VersionOne story a pull request delivers.
///
/// The literal prefix is case-sensitive; the identifier is one ASCII letter,
/// a hyphen, and any number of digits (including none).
pub const TICKET_PATTERN: &str = r"VersionOne Stories: (?P<ticket>[a-zA-Z]-[0-9]*)";

/// A ticket identifier such as `A-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Wraps an identifier without checking its shape.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Compiled ticket pattern.
#[derive(Debug, Clone)]
pub struct TicketExtractor {
    pattern: Regex,
}

impl TicketExtractor {
    /// Compiles [`TICKET_PATTERN`].
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidPattern`] if the pattern fails to
    /// compile.
    pub fn new() -> Result<Self, ReleaseError> {
        Self::with_pattern(TICKET_PATTERN)
    }

    /// Compiles `pattern`; the ticket is its last capture group.
    fn with_pattern(pattern: &str) -> Result<Self, ReleaseError> {
        Regex::new(pattern)
            .map(|compiled| Self { pattern: compiled })
            .map_err(|error| ReleaseError::InvalidPattern {
                message: error.to_string(),
            })
    }

    /// Returns the ticket from the first match in `body`, if any.
    ///
    /// The match may appear anywhere in the text. When the pattern has
    /// several groups the last one is the ticket; a pattern without groups
    /// yields the whole match.
    #[must_use]
    pub fn extract(&self, body: &str) -> Option<TicketId> {
        let captures = self.pattern.captures(body)?;
        let ticket = captures.iter().last().flatten()?;
        Some(TicketId(ticket.as_str().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::TicketExtractor;

    #[fixture]
    fn extractor() -> TicketExtractor {
        TicketExtractor::new().expect("ticket pattern should compile")
    }

    #[rstest]
    #[case::embedded("Fixes login.\n\nVersionOne Stories: A-123\nThanks", Some("A-123"))]
    #[case::at_start("VersionOne Stories: X-7", Some("X-7"))]
    #[case::zero_digits("VersionOne Stories: B-", Some("B-"))]
    #[case::lower_case_letter("VersionOne Stories: s-42 and more", Some("s-42"))]
    #[case::stops_at_non_digit("VersionOne Stories: C-12abc", Some("C-12"))]
    #[case::first_match_wins("VersionOne Stories: D-1 VersionOne Stories: E-2", Some("D-1"))]
    #[case::no_prefix("Refactor the parser", None)]
    #[case::prefix_case_differs("versionone stories: A-123", None)]
    #[case::missing_space("VersionOne Stories:A-123", None)]
    #[case::two_letters("VersionOne Stories: AB-12", None)]
    #[case::empty("", None)]
    fn extracts_ticket_from_body(
        extractor: TicketExtractor,
        #[case] body: &str,
        #[case] expected: Option<&str>,
    ) {
        let ticket = extractor.extract(body);

        assert_eq!(ticket.as_ref().map(|id| id.as_str()), expected);
    }

    #[rstest]
    fn non_ascii_digits_are_not_part_of_the_ticket(extractor: TicketExtractor) {
        let ticket = extractor.extract("VersionOne Stories: F-\u{0663}\u{0664}");

        assert_eq!(ticket.map(|id| id.to_string()), Some("F-".to_owned()));
    }

    #[rstest]
    fn custom_pattern_uses_last_group() {
        let extractor = TicketExtractor::with_pattern(r"(Story|Defect): ([A-Z]-\d+)")
            .expect("pattern should compile");

        let ticket = extractor.extract("Defect: D-99");

        assert_eq!(ticket.map(|id| id.to_string()), Some("D-99".to_owned()));
    }

    #[rstest]
    fn invalid_pattern_is_reported() {
        let result = TicketExtractor::with_pattern("(unclosed");

        assert!(result.is_err(), "expected an invalid pattern error");
    }
}
