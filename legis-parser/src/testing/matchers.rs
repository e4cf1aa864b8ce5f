//! Text matching for node assertions.

#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    /// Panics with `context` when `actual` does not match.
    pub fn assert(&self, actual: &str, context: &str) {
        let (verb, expected) = match self {
            TextMatch::Exact(expected) => ("be", expected),
            TextMatch::StartsWith(prefix) => ("start with", prefix),
            TextMatch::Contains(substring) => ("contain", substring),
        };
        assert!(
            self.matches(actual),
            "{context}: Expected text to {verb} '{expected}', but got '{actual}'"
        );
    }
}
