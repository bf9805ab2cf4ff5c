//! Verdict module - the outcome category the service assigns to a claim

use std::fmt;

/// Outcome of a claim verification
///
/// The service speaks a closed vocabulary of four labels. Anything else it
/// sends is kept verbatim in [`Verdict::Other`] and presented as
/// [`Verdict::Unverified`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The claim is supported by the evidence
    True,

    /// The claim is contradicted by the evidence
    False,

    /// Parts of the claim hold, parts do not
    PartiallyTrue,

    /// Not enough evidence either way
    Unverified,

    /// A label outside the known vocabulary (raw wire value)
    Other(String),
}

impl Verdict {
    /// Parse a verdict from its wire label
    ///
    /// Never fails: unknown labels land in [`Verdict::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use credify_domain::Verdict;
    ///
    /// assert_eq!(Verdict::parse("PARTIALLY TRUE"), Verdict::PartiallyTrue);
    /// assert_eq!(Verdict::parse("MOSTLY FALSE"), Verdict::Other("MOSTLY FALSE".into()));
    /// ```
    pub fn parse(label: &str) -> Self {
        match label {
            "TRUE" => Verdict::True,
            "FALSE" => Verdict::False,
            "PARTIALLY TRUE" => Verdict::PartiallyTrue,
            "UNVERIFIED" => Verdict::Unverified,
            other => Verdict::Other(other.to_string()),
        }
    }

    /// The wire label as received (raw value for [`Verdict::Other`])
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::PartiallyTrue => "PARTIALLY TRUE",
            Verdict::Unverified => "UNVERIFIED",
            Verdict::Other(raw) => raw,
        }
    }

    /// The known verdict used for presentation
    ///
    /// Unknown labels collapse to [`Verdict::Unverified`].
    pub fn known(&self) -> Verdict {
        match self {
            Verdict::Other(_) => Verdict::Unverified,
            known => known.clone(),
        }
    }

    /// Whether the label came from outside the known vocabulary
    pub fn is_other(&self) -> bool {
        matches!(self, Verdict::Other(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Verdict {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<String> for Verdict {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(Verdict::parse("TRUE"), Verdict::True);
        assert_eq!(Verdict::parse("FALSE"), Verdict::False);
        assert_eq!(Verdict::parse("PARTIALLY TRUE"), Verdict::PartiallyTrue);
        assert_eq!(Verdict::parse("UNVERIFIED"), Verdict::Unverified);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(Verdict::parse("true").is_other());
        assert_eq!(Verdict::parse("true").known(), Verdict::Unverified);
    }

    #[test]
    fn test_other_keeps_raw_label() {
        let verdict = Verdict::parse("MISLEADING");
        assert_eq!(verdict.as_str(), "MISLEADING");
        assert_eq!(verdict.to_string(), "MISLEADING");
    }

    proptest! {
        #[test]
        fn prop_known_labels_roundtrip(idx in 0usize..4) {
            let labels = ["TRUE", "FALSE", "PARTIALLY TRUE", "UNVERIFIED"];
            let verdict = Verdict::parse(labels[idx]);
            prop_assert!(!verdict.is_other());
            prop_assert_eq!(verdict.as_str(), labels[idx]);
        }

        #[test]
        fn prop_unknown_labels_present_as_unverified(label in "\\PC*") {
            prop_assume!(!["TRUE", "FALSE", "PARTIALLY TRUE", "UNVERIFIED"].contains(&label.as_str()));
            let verdict = Verdict::parse(&label);
            prop_assert!(verdict.is_other());
            prop_assert_eq!(verdict.known(), Verdict::Unverified);
        }
    }
}
