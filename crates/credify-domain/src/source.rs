//! Source module - cited evidence backing a verdict

/// A piece of evidence cited by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Headline or page title
    pub title: String,

    /// Link to the evidence
    pub url: String,

    /// Excerpt relevant to the claim
    pub snippet: String,
}

impl Source {
    /// Create a new source
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}
