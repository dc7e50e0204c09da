use crate::{UuidError, UuidResult};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Identifier of a single processed assessment, always in canonical hyphenated form.
///
/// # Construction
/// - [`AssessmentId::new`] allocates a fresh identifier while processing a submission.
/// - [`AssessmentId::parse`] validates an externally supplied identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssessmentId(Uuid);

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentId {
    /// Generates a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses an identifier that must already be in canonical form.
    ///
    /// Uppercase, braced, URN or unhyphenated spellings are rejected rather than normalised.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> UuidResult<Self> {
        let invalid = || {
            UuidError::InvalidInput(format!(
                "assessment id must be a lowercase hyphenated UUID, got: '{}'",
                input
            ))
        };

        if !Self::is_canonical(input) {
            return Err(invalid());
        }
        Uuid::parse_str(input).map(Self).map_err(|_| invalid())
    }

    /// Returns true if `input` is a lowercase hyphenated UUID (`8-4-4-4-12`).
    pub fn is_canonical(input: &str) -> bool {
        const HYPHENS: [usize; 4] = [8, 13, 18, 23];

        input.len() == 36
            && input.bytes().enumerate().all(|(i, b)| {
                if HYPHENS.contains(&i) {
                    b == b'-'
                } else {
                    matches!(b, b'0'..=b'9' | b'a'..=b'f')
                }
            })
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns `dir/<id>.<extension>`.
    pub fn file_path(&self, dir: &Path, extension: &str) -> PathBuf {
        dir.join(format!("{}.{}", self, extension))
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for AssessmentId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssessmentId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AssessmentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AssessmentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AssessmentId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_canonical_id() {
        let id = AssessmentId::new();
        let text = id.to_string();

        assert_eq!(text.len(), 36);
        assert!(AssessmentId::is_canonical(&text));
    }

    #[test]
    fn test_parse_valid_canonical_id() {
        let canonical = "550e8400-e29b-41d4-a716-446655440000";
        let id = AssessmentId::parse(canonical).unwrap();

        assert_eq!(id.to_string(), canonical);
    }

    #[test]
    fn test_parse_rejects_simple_form() {
        let result = AssessmentId::parse("550e8400e29b41d4a716446655440000");

        match result {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("lowercase hyphenated UUID"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_uppercase() {
        assert!(AssessmentId::parse("550E8400-E29B-41D4-A716-446655440000").is_err());
    }

    #[test]
    fn test_parse_rejects_path_segments() {
        assert!(AssessmentId::parse("../../../../etc/passwd").is_err());
        assert!(AssessmentId::parse("550e8400-e29b-41d4-a716-44665544000/").is_err());
    }

    #[test]
    fn test_file_path_uses_extension() {
        let id = AssessmentId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let path = id.file_path(Path::new("data/reports"), "pdf");

        assert_eq!(
            path,
            Path::new("data/reports/550e8400-e29b-41d4-a716-446655440000.pdf")
        );
    }

    #[test]
    fn test_serde_round_trip_keeps_string_form() {
        let id = AssessmentId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
        let back: AssessmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
