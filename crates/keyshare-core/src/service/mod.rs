//! Remote service contracts and the value types they exchange.

mod traits;
pub mod types;

pub use traits::{GroupDirectory, KeyService};
pub use types::{
    AccessFailure, AccessList, AccessResult, DecryptedDocument, Device, DeviceId,
    DocumentAssociation, DocumentId, DocumentMetadata, EncryptedDocument, GroupDetails, Grantee,
    MemberEditFailure, MemberEditResult, UserId, VisibleGroup, VisibleTo,
};
