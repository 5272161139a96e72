//! Values exchanged with the remote key service.
//!
//! The service performs all cryptography; these types only carry identifiers,
//! opaque byte payloads, and per-grantee outcomes back to the commands.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::group::{GroupId, GroupName, GroupRecord};

/// Account identifier of a user (an email address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric identifier of one of the user's device keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier embedded in the header of an encrypted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Users and groups a document is shared with, applied to every file in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessList {
    #[serde(default)]
    pub users: Vec<UserId>,
    #[serde(default)]
    pub groups: Vec<GroupId>,
}

impl AccessList {
    pub fn new(users: Vec<UserId>, groups: Vec<GroupId>) -> Self {
        Self { users, groups }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

/// Either side of an access grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Grantee {
    User(UserId),
    Group(GroupId),
}

/// A grantee the service refused, with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFailure {
    pub grantee: Grantee,
    pub error: String,
}

/// Per-grantee outcome of a grant or revoke on one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessResult {
    #[serde(default)]
    pub succeeded: Vec<Grantee>,
    #[serde(default)]
    pub failed: Vec<AccessFailure>,
}

/// A user the service refused to add or remove from a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEditFailure {
    pub user: UserId,
    pub error: String,
}

/// Outcome of a membership or admin change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEditResult {
    #[serde(default)]
    pub succeeded: Vec<UserId>,
    #[serde(default)]
    pub failed: Vec<MemberEditFailure>,
}

/// Full details of a single group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetails {
    #[serde(flatten)]
    pub record: GroupRecord,
    /// Only visible to admins and members.
    #[serde(default)]
    pub admins: Option<Vec<UserId>>,
    #[serde(default)]
    pub members: Option<Vec<UserId>>,
}

/// A device key authorized for the current account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    #[serde(default)]
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub is_current: bool,
}

/// Result of encrypting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedDocument {
    pub id: DocumentId,
    pub data: Vec<u8>,
    pub grants: AccessResult,
}

/// Result of decrypting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedDocument {
    pub id: DocumentId,
    pub name: Option<String>,
    pub data: Vec<u8>,
}

/// How the current user came to have access to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAssociation {
    Owner,
    FromUser,
    FromGroup,
}

impl fmt::Display for DocumentAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::FromUser => write!(f, "shared with you"),
            Self::FromGroup => write!(f, "shared with a group you're in"),
        }
    }
}

/// Metadata of an encrypted document, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: DocumentId,
    #[serde(default)]
    pub name: Option<String>,
    pub association: DocumentAssociation,
    pub visible_to: VisibleTo,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Users and groups with access to a document, as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleTo {
    #[serde(default)]
    pub users: Vec<UserId>,
    #[serde(default)]
    pub groups: Vec<VisibleGroup>,
}

/// A group with document access; the service includes its name when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleGroup {
    pub id: GroupId,
    #[serde(default)]
    pub name: Option<GroupName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grantee_wire_shape() {
        let grantee = Grantee::Group(GroupId::new("g1"));
        let json = serde_json::to_value(&grantee).unwrap();
        assert_eq!(json, serde_json::json!({"type": "group", "id": "g1"}));
    }

    #[test]
    fn test_group_details_flattens_record() {
        let json = serde_json::json!({
            "id": "g1",
            "name": "ops",
            "is_admin": true,
            "is_member": false,
            "created": "2024-01-01T00:00:00Z",
            "updated": "2024-01-02T00:00:00Z",
            "admins": ["a@example.com"]
        });
        let details: GroupDetails = serde_json::from_value(json).unwrap();
        assert_eq!(details.record.id, GroupId::new("g1"));
        assert_eq!(details.admins.map(|a| a.len()), Some(1));
        assert!(details.members.is_none());
    }

    #[test]
    fn test_empty_access_list() {
        assert!(AccessList::default().is_empty());
        let list = AccessList::new(vec![UserId::new("a@b.co")], Vec::new());
        assert!(!list.is_empty());
    }
}
