//! JSON-over-HTTP adapter for the remote key service.
//!
//! Every request carries the device token as a bearer credential. Binary
//! payloads travel base64-encoded. Non-2xx responses become
//! `KeyshareError::Remote` with the service's message when it sends one.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use keyshare_core::service::{
    AccessList, AccessResult, DecryptedDocument, Device, DeviceId, DocumentId, DocumentMetadata,
    EncryptedDocument, GroupDetails, MemberEditResult, UserId,
};
use keyshare_core::{
    GroupDirectory, GroupId, GroupName, GroupRecord, KeyService, KeyshareError, Result,
};

use crate::app::DeviceCredentials;

/// Key service reached over HTTPS.
pub struct HttpKeyService {
    client: Client,
    base_url: Url,
    token: String,
    segment_id: u64,
    device_id: DeviceId,
}

impl HttpKeyService {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: &DeviceCredentials,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid service URL '{}': {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Invalid service URL '{}'", base_url));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            client,
            base_url,
            token: credentials.token.clone(),
            segment_id: credentials.segment_id,
            device_id: DeviceId(credentials.device_id),
        })
    }

    /// The device these credentials belong to.
    pub fn current_device(&self) -> DeviceId {
        self.device_id
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.base_url, segments)
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.get(self.endpoint(segments)?))
    }

    fn post<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<RequestBuilder> {
        Ok(self.client.post(self.endpoint(segments)?).json(body))
    }

    fn put<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<RequestBuilder> {
        Ok(self.client.put(self.endpoint(segments)?).json(body))
    }

    fn delete(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.delete(self.endpoint(segments)?))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.token)
            .header("Keyshare-Segment", self.segment_id.to_string())
            .send()
            .await
            .map_err(|e| KeyshareError::Remote(format!("Request failed: {}", e)))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "service response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(KeyshareError::Remote(error_message(status, &body)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| KeyshareError::Remote(format!("Malformed service response: {}", e)))
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| KeyshareError::Remote(format!("Invalid service URL '{}'", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Deserialize)]
struct ServiceError {
    message: String,
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ServiceError>(body) {
        Ok(err) => err.message,
        Err(_) if status == StatusCode::UNAUTHORIZED => {
            "Device credentials were rejected by the service.".to_string()
        }
        Err(_) => format!("Service request failed with status {}", status),
    }
}

fn decode(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data)
        .map_err(|e| KeyshareError::Remote(format!("Malformed document payload: {}", e)))
}

#[derive(Deserialize)]
struct Listing<T> {
    result: Vec<T>,
}

#[derive(Serialize)]
struct EncryptRequest<'a> {
    data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    grant: &'a AccessList,
}

#[derive(Deserialize)]
struct EncryptResponse {
    id: DocumentId,
    data: String,
    #[serde(default)]
    grants: AccessResult,
}

#[derive(Serialize)]
struct DocumentPayload {
    data: String,
}

#[derive(Deserialize)]
struct DecryptResponse {
    id: DocumentId,
    #[serde(default)]
    name: Option<String>,
    data: String,
}

#[derive(Deserialize)]
struct IdResponse<T> {
    id: T,
}

#[derive(Serialize)]
struct NameRequest<'a> {
    name: &'a GroupName,
}

#[derive(Serialize)]
struct UsersRequest<'a> {
    users: &'a [UserId],
}

#[derive(Deserialize)]
struct KeyLookup {
    id: UserId,
    has_keys: bool,
}

#[derive(Serialize)]
struct PassphraseRequest<'a> {
    current: &'a str,
    new: &'a str,
}

#[async_trait]
impl GroupDirectory for HttpKeyService {
    async fn list_groups(&self) -> Result<Vec<GroupRecord>> {
        let listing: Listing<GroupRecord> = self.send(self.get(&["groups"])?).await?;
        Ok(listing.result)
    }
}

#[async_trait]
impl KeyService for HttpKeyService {
    async fn document_encrypt(
        &self,
        data: &[u8],
        name: Option<&str>,
        access: &AccessList,
    ) -> Result<EncryptedDocument> {
        let body = EncryptRequest {
            data: STANDARD.encode(data),
            name,
            grant: access,
        };
        let response: EncryptResponse = self
            .send(self.post(&["documents", "encrypt"], &body)?)
            .await?;
        Ok(EncryptedDocument {
            id: response.id,
            data: decode(&response.data)?,
            grants: response.grants,
        })
    }

    async fn document_decrypt(&self, encrypted: &[u8]) -> Result<DecryptedDocument> {
        let body = DocumentPayload {
            data: STANDARD.encode(encrypted),
        };
        let response: DecryptResponse = self
            .send(self.post(&["documents", "decrypt"], &body)?)
            .await?;
        Ok(DecryptedDocument {
            id: response.id,
            name: response.name,
            data: decode(&response.data)?,
        })
    }

    async fn document_id(&self, encrypted: &[u8]) -> Result<DocumentId> {
        let body = DocumentPayload {
            data: STANDARD.encode(encrypted),
        };
        let response: IdResponse<DocumentId> = self
            .send(self.post(&["documents", "inspect"], &body)?)
            .await?;
        Ok(response.id)
    }

    async fn document_metadata(&self, id: &DocumentId) -> Result<DocumentMetadata> {
        self.send(self.get(&["documents", id.as_str()])?).await
    }

    async fn document_grant(&self, id: &DocumentId, access: &AccessList) -> Result<AccessResult> {
        self.send(self.post(&["documents", id.as_str(), "grant"], access)?)
            .await
    }

    async fn document_revoke(
        &self,
        id: &DocumentId,
        access: &AccessList,
    ) -> Result<AccessResult> {
        self.send(self.post(&["documents", id.as_str(), "revoke"], access)?)
            .await
    }

    async fn group_create(&self, name: &GroupName) -> Result<GroupRecord> {
        self.send(self.post(&["groups"], &NameRequest { name })?)
            .await
    }

    async fn group_get(&self, id: &GroupId) -> Result<GroupDetails> {
        self.send(self.get(&["groups", id.as_str()])?).await
    }

    async fn group_rename(&self, id: &GroupId, name: &GroupName) -> Result<GroupRecord> {
        self.send(self.put(&["groups", id.as_str()], &NameRequest { name })?)
            .await
    }

    async fn group_delete(&self, id: &GroupId) -> Result<GroupId> {
        let response: IdResponse<GroupId> =
            self.send(self.delete(&["groups", id.as_str()])?).await?;
        Ok(response.id)
    }

    async fn group_add_members(&self, id: &GroupId, users: &[UserId]) -> Result<MemberEditResult> {
        self.send(self.post(&["groups", id.as_str(), "members"], &UsersRequest { users })?)
            .await
    }

    async fn group_remove_members(
        &self,
        id: &GroupId,
        users: &[UserId],
    ) -> Result<MemberEditResult> {
        let path = ["groups", id.as_str(), "members", "remove"];
        self.send(self.post(&path, &UsersRequest { users })?).await
    }

    async fn group_add_admins(&self, id: &GroupId, users: &[UserId]) -> Result<MemberEditResult> {
        self.send(self.post(&["groups", id.as_str(), "admins"], &UsersRequest { users })?)
            .await
    }

    async fn group_remove_admins(
        &self,
        id: &GroupId,
        users: &[UserId],
    ) -> Result<MemberEditResult> {
        let path = ["groups", id.as_str(), "admins", "remove"];
        self.send(self.post(&path, &UsersRequest { users })?).await
    }

    async fn user_key_exists(&self, users: &[UserId]) -> Result<Vec<(UserId, bool)>> {
        let listing: Listing<KeyLookup> = self
            .send(self.post(&["users", "keys"], &UsersRequest { users })?)
            .await?;
        Ok(listing
            .result
            .into_iter()
            .map(|lookup| (lookup.id, lookup.has_keys))
            .collect())
    }

    async fn device_list(&self) -> Result<Vec<Device>> {
        let listing: Listing<Device> = self.send(self.get(&["devices"])?).await?;
        Ok(listing.result)
    }

    async fn device_delete(&self, id: Option<DeviceId>) -> Result<DeviceId> {
        let target = id.map(|id| id.to_string());
        let segment = target.as_deref().unwrap_or("current");
        let response: IdResponse<DeviceId> =
            self.send(self.delete(&["devices", segment])?).await?;
        Ok(response.id)
    }

    async fn change_passphrase(&self, current: &str, new: &str) -> Result<()> {
        let body = PassphraseRequest { current, new };
        self.send_empty(self.put(&["users", "passphrase"], &body)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_and_escapes_segments() {
        let base = Url::parse("https://api.keyshare.dev/api/1/").unwrap();
        let url = endpoint(&base, &["groups", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.keyshare.dev/api/1/groups/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let base = Url::parse("http://localhost:8080/api").unwrap();
        let url = endpoint(&base, &["devices", "current"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/devices/current");
    }

    #[test]
    fn test_error_message_prefers_service_text() {
        let message = error_message(StatusCode::NOT_FOUND, r#"{"message":"Group not found"}"#);
        assert_eq!(message, "Group not found");

        let message = error_message(StatusCode::UNAUTHORIZED, "");
        assert!(message.contains("rejected"));

        let message = error_message(StatusCode::BAD_GATEWAY, "<html>");
        assert!(message.contains("502"));
    }
}
