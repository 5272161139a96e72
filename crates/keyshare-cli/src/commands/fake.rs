//! In-memory key service for command unit tests.

use async_trait::async_trait;
use chrono::Utc;

use keyshare_core::service::{
    AccessList, AccessResult, DecryptedDocument, Device, DeviceId, DocumentId, DocumentMetadata,
    EncryptedDocument, GroupDetails, MemberEditFailure, MemberEditResult, UserId,
};
use keyshare_core::{
    GroupDirectory, GroupId, GroupName, GroupRecord, KeyService, KeyshareError, Result,
};

pub fn group(id: &str, name: Option<&str>, is_admin: bool) -> GroupRecord {
    let now = Utc::now();
    GroupRecord {
        id: GroupId::new(id),
        name: name.map(GroupName::new),
        is_admin,
        is_member: true,
        created: now,
        updated: now,
    }
}

#[derive(Default)]
pub struct FakeService {
    pub groups: Vec<GroupRecord>,
    /// Users every membership edit reports as failed.
    pub rejected_users: Vec<UserId>,
    /// Device IDs the service does not know.
    pub missing_devices: Vec<u64>,
}

impl FakeService {
    fn edit(&self, users: &[UserId]) -> Result<MemberEditResult> {
        let (failed, succeeded): (Vec<UserId>, Vec<UserId>) = users
            .iter()
            .cloned()
            .partition(|user| self.rejected_users.contains(user));
        Ok(MemberEditResult {
            succeeded,
            failed: failed
                .into_iter()
                .map(|user| MemberEditFailure {
                    user,
                    error: "User does not exist".to_string(),
                })
                .collect(),
        })
    }
}

fn unsupported<T>() -> Result<T> {
    Err(KeyshareError::Remote("unsupported".to_string()))
}

#[async_trait]
impl GroupDirectory for FakeService {
    async fn list_groups(&self) -> Result<Vec<GroupRecord>> {
        Ok(self.groups.clone())
    }
}

#[async_trait]
impl KeyService for FakeService {
    async fn document_encrypt(
        &self,
        _data: &[u8],
        _name: Option<&str>,
        _access: &AccessList,
    ) -> Result<EncryptedDocument> {
        unsupported()
    }

    async fn document_decrypt(&self, _encrypted: &[u8]) -> Result<DecryptedDocument> {
        unsupported()
    }

    async fn document_id(&self, _encrypted: &[u8]) -> Result<DocumentId> {
        unsupported()
    }

    async fn document_metadata(&self, _id: &DocumentId) -> Result<DocumentMetadata> {
        unsupported()
    }

    async fn document_grant(&self, _id: &DocumentId, _access: &AccessList) -> Result<AccessResult> {
        unsupported()
    }

    async fn document_revoke(
        &self,
        _id: &DocumentId,
        _access: &AccessList,
    ) -> Result<AccessResult> {
        unsupported()
    }

    async fn group_create(&self, _name: &GroupName) -> Result<GroupRecord> {
        unsupported()
    }

    async fn group_get(&self, id: &GroupId) -> Result<GroupDetails> {
        let record = self
            .groups
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| KeyshareError::Remote("Group not found".to_string()))?;
        Ok(GroupDetails {
            record,
            admins: None,
            members: None,
        })
    }

    async fn group_rename(&self, _id: &GroupId, _name: &GroupName) -> Result<GroupRecord> {
        unsupported()
    }

    async fn group_delete(&self, id: &GroupId) -> Result<GroupId> {
        Ok(id.clone())
    }

    async fn group_add_members(&self, _id: &GroupId, users: &[UserId]) -> Result<MemberEditResult> {
        self.edit(users)
    }

    async fn group_remove_members(
        &self,
        _id: &GroupId,
        users: &[UserId],
    ) -> Result<MemberEditResult> {
        self.edit(users)
    }

    async fn group_add_admins(&self, _id: &GroupId, users: &[UserId]) -> Result<MemberEditResult> {
        self.edit(users)
    }

    async fn group_remove_admins(
        &self,
        _id: &GroupId,
        users: &[UserId],
    ) -> Result<MemberEditResult> {
        self.edit(users)
    }

    async fn user_key_exists(&self, users: &[UserId]) -> Result<Vec<(UserId, bool)>> {
        Ok(users
            .iter()
            .map(|user| (user.clone(), !self.rejected_users.contains(user)))
            .collect())
    }

    async fn device_list(&self) -> Result<Vec<Device>> {
        Ok(Vec::new())
    }

    async fn device_delete(&self, id: Option<DeviceId>) -> Result<DeviceId> {
        match id {
            Some(DeviceId(raw)) if self.missing_devices.contains(&raw) => {
                Err(KeyshareError::Remote("Device not found".to_string()))
            }
            Some(id) => Ok(id),
            None => Ok(DeviceId(1)),
        }
    }

    async fn change_passphrase(&self, _current: &str, _new: &str) -> Result<()> {
        Ok(())
    }
}
