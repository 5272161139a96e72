//! Collaborator contracts for the remote key-management service.
//!
//! `GroupDirectory` is the one call the resolution engine needs. `KeyService`
//! adds the per-item operations that commands fan out through the batch
//! executor. Every method may fail with `KeyshareError::Remote`; callers inside
//! a batch turn that into a `BatchOutcome::Failure` for their item.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{
    AccessList, AccessResult, DecryptedDocument, Device, DeviceId, DocumentId, DocumentMetadata,
    EncryptedDocument, GroupDetails, MemberEditResult, UserId,
};
use crate::error::Result;
use crate::group::{GroupId, GroupName, GroupRecord};

/// Lists the groups the current identity belongs to.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Every group the current identity is an admin or member of, in the
    /// order the service returns them.
    async fn list_groups(&self) -> Result<Vec<GroupRecord>>;
}

#[async_trait]
impl<T: GroupDirectory + ?Sized> GroupDirectory for Arc<T> {
    async fn list_groups(&self) -> Result<Vec<GroupRecord>> {
        (**self).list_groups().await
    }
}

#[async_trait]
impl<T: GroupDirectory + ?Sized> GroupDirectory for &T {
    async fn list_groups(&self) -> Result<Vec<GroupRecord>> {
        (**self).list_groups().await
    }
}

/// Remote operations on documents, groups, and devices.
#[async_trait]
pub trait KeyService: GroupDirectory {
    // --- Documents ---

    /// Encrypt `data` and share it with `access` in addition to the caller.
    async fn document_encrypt(
        &self,
        data: &[u8],
        name: Option<&str>,
        access: &AccessList,
    ) -> Result<EncryptedDocument>;

    /// Decrypt a document the caller has access to.
    async fn document_decrypt(&self, encrypted: &[u8]) -> Result<DecryptedDocument>;

    /// Read the document ID from an encrypted document's header.
    async fn document_id(&self, encrypted: &[u8]) -> Result<DocumentId>;

    async fn document_metadata(&self, id: &DocumentId) -> Result<DocumentMetadata>;

    async fn document_grant(&self, id: &DocumentId, access: &AccessList) -> Result<AccessResult>;

    async fn document_revoke(&self, id: &DocumentId, access: &AccessList)
        -> Result<AccessResult>;

    // --- Groups ---

    async fn group_create(&self, name: &GroupName) -> Result<GroupRecord>;

    async fn group_get(&self, id: &GroupId) -> Result<GroupDetails>;

    async fn group_rename(&self, id: &GroupId, name: &GroupName) -> Result<GroupRecord>;

    async fn group_delete(&self, id: &GroupId) -> Result<GroupId>;

    async fn group_add_members(&self, id: &GroupId, users: &[UserId]) -> Result<MemberEditResult>;

    async fn group_remove_members(
        &self,
        id: &GroupId,
        users: &[UserId],
    ) -> Result<MemberEditResult>;

    async fn group_add_admins(&self, id: &GroupId, users: &[UserId]) -> Result<MemberEditResult>;

    async fn group_remove_admins(&self, id: &GroupId, users: &[UserId])
        -> Result<MemberEditResult>;

    // --- Users and devices ---

    /// For each user, whether they have public keys and can be shared with.
    async fn user_key_exists(&self, users: &[UserId]) -> Result<Vec<(UserId, bool)>>;

    async fn device_list(&self) -> Result<Vec<Device>>;

    /// Delete a device key. `None` deletes the device making the request.
    async fn device_delete(&self, id: Option<DeviceId>) -> Result<DeviceId>;

    async fn change_passphrase(&self, current: &str, new: &str) -> Result<()>;
}
