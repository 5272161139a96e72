//! Group identity types and the reference syntax users type on the CLI.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix that marks a reference as a literal group ID rather than a name.
pub const GROUP_ID_PREFIX: &str = "id^";

/// Server-assigned canonical identifier of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Display name of a group. Not unique: several groups may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One group from the directory listing of the current identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    /// Groups created outside this tool may have no name.
    #[serde(default)]
    pub name: Option<GroupName>,
    pub is_admin: bool,
    pub is_member: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl GroupRecord {
    /// Name to show for this group, falling back to its ID.
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(GroupName::as_str)
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// A user-supplied group reference.
///
/// `id^<value>` is an escaped reference: the remainder is taken verbatim as a
/// canonical ID and never looked up. Anything else is a bare name that must be
/// resolved against the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupReference {
    Id(GroupId),
    Name(GroupName),
}

impl GroupReference {
    /// Split a raw reference on the escape marker. Validation of reserved
    /// characters happens at the CLI boundary before this is called.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(GROUP_ID_PREFIX) {
            Some(id) => GroupReference::Id(GroupId::new(id)),
            None => GroupReference::Name(GroupName::new(raw)),
        }
    }

    /// Whether the raw string uses the `id^` escape marker.
    pub fn is_escaped(raw: &str) -> bool {
        raw.starts_with(GROUP_ID_PREFIX)
    }

    /// The reference as the user would type it, without the `id^` marker.
    pub fn value(&self) -> &str {
        match self {
            GroupReference::Id(id) => id.as_str(),
            GroupReference::Name(name) => name.as_str(),
        }
    }
}

impl fmt::Display for GroupReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupReference::Id(id) => write!(f, "{}{}", GROUP_ID_PREFIX, id),
            GroupReference::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for GroupReference {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_reference_strips_marker() {
        let reference = GroupReference::parse("id^xyz");
        assert_eq!(reference, GroupReference::Id(GroupId::new("xyz")));
        assert_eq!(reference.value(), "xyz");
        assert_eq!(reference.to_string(), "id^xyz");
    }

    #[test]
    fn test_bare_reference_is_name() {
        let reference = GroupReference::parse("engineering");
        assert_eq!(reference, GroupReference::Name(GroupName::new("engineering")));
        assert!(!GroupReference::is_escaped("engineering"));
    }

    #[test]
    fn test_marker_only_matches_prefix() {
        let reference = GroupReference::parse("myid^thing");
        assert!(matches!(reference, GroupReference::Name(_)));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let now = Utc::now();
        let record = GroupRecord {
            id: GroupId::new("gid"),
            name: None,
            is_admin: true,
            is_member: true,
            created: now,
            updated: now,
        };
        assert_eq!(record.display_name(), "gid");
    }
}
