//! Subjects — the content items engagement is recorded against.
//!
//! The four content kinds are disjoint id spaces: an id only means anything
//! together with its kind. A subject is therefore always carried as a tagged
//! `SubjectRef { kind, id }` pair, never as a bare id, and resolution always
//! branches on the stored kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of content a subject refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Video,
    Tweet,
    Book,
    Comment,
}

impl SubjectKind {
    /// All supported kinds, in a fixed order.
    pub const ALL: [SubjectKind; 4] = [
        SubjectKind::Video,
        SubjectKind::Tweet,
        SubjectKind::Book,
        SubjectKind::Comment,
    ];

    /// The lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Video => "video",
            SubjectKind::Tweet => "tweet",
            SubjectKind::Book => "book",
            SubjectKind::Comment => "comment",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(SubjectKind::Video),
            "tweet" => Ok(SubjectKind::Tweet),
            "book" => Ok(SubjectKind::Book),
            "comment" => Ok(SubjectKind::Comment),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown subject kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

/// A tagged reference to one content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub id: String,
}

impl SubjectRef {
    pub fn new(kind: SubjectKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in SubjectKind::ALL {
            assert_eq!(kind.as_str().parse::<SubjectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "podcast".parse::<SubjectKind>().unwrap_err();
        assert_eq!(err, UnknownKind("podcast".to_string()));
    }

    #[test]
    fn kind_serde_uses_lowercase() {
        let json = serde_json::to_string(&SubjectKind::Book).unwrap();
        assert_eq!(json, "\"book\"");
        let back: SubjectKind = serde_json::from_str("\"comment\"").unwrap();
        assert_eq!(back, SubjectKind::Comment);
    }

    #[test]
    fn same_id_different_kind_is_a_different_subject() {
        let book = SubjectRef::new(SubjectKind::Book, "42");
        let video = SubjectRef::new(SubjectKind::Video, "42");
        assert_ne!(book, video);
    }
}
