//! Request and response documents of the mailing-list service
//!
//! Every request starts with a `header` holding the credentials. Every
//! response carries `errorCode` and `errorMessage` next to its payload;
//! a zero code means success.

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::{ApiUserId, EmailAddressId, MailingListId};
use domain_settings::Credentials;

use crate::contact::ContactRecord;

/// The remote procedures this integration calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcOperation {
    GetMailingLists,
    CreateEmailAddress,
}

impl RpcOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcOperation::GetMailingLists => "GetMailingLists",
            RpcOperation::CreateEmailAddress => "CreateEmailAddress",
        }
    }
}

impl fmt::Display for RpcOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials block sent with every request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcHeader {
    pub user_id: ApiUserId,
    pub user_token: String,
}

impl From<&Credentials> for RpcHeader {
    fn from(credentials: &Credentials) -> Self {
        Self {
            user_id: credentials.user_id,
            user_token: credentials.user_token.clone(),
        }
    }
}

impl fmt::Debug for RpcHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcHeader")
            .field("user_id", &self.user_id)
            .field("user_token", &"<redacted>")
            .finish()
    }
}

/// Outcome fields present on every response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcStatus {
    pub error_code: i64,
    #[serde(default)]
    pub error_message: String,
}

impl RpcStatus {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

/// Implemented by every response document
pub trait RpcResponse {
    fn status(&self) -> &RpcStatus;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMailingListsRequest {
    pub header: RpcHeader,
    /// Always zero: all lists regardless of category
    pub category_id: u64,
}

impl GetMailingListsRequest {
    pub fn all(credentials: &Credentials) -> Self {
        Self {
            header: credentials.into(),
            category_id: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingListItem {
    pub mailing_list_id: MailingListId,
    pub mailing_list_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMailingListsResponse {
    #[serde(flatten)]
    pub status: RpcStatus,
    #[serde(default)]
    pub mailing_list_type_items: Option<Vec<MailingListItem>>,
}

impl RpcResponse for GetMailingListsResponse {
    fn status(&self) -> &RpcStatus {
        &self.status
    }
}

/// Source tag attached to a created contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailAddressRequest {
    pub header: RpcHeader,
    pub mailing_list_id: MailingListId,
    pub email_address_type: ContactRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<ContactSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailAddressResponse {
    #[serde(flatten)]
    pub status: RpcStatus,
    #[serde(default)]
    pub email_address_id: Option<EmailAddressId>,
}

impl RpcResponse for CreateEmailAddressResponse {
    fn status(&self) -> &RpcStatus {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials::new(Some(ApiUserId::new(7)), Some("secret")).unwrap()
    }

    #[test]
    fn test_lookup_request_shape() {
        let json = serde_json::to_value(GetMailingListsRequest::all(&credentials())).unwrap();
        assert_eq!(
            json,
            json!({ "header": { "userId": 7, "userToken": "secret" }, "categoryId": 0 })
        );
    }

    #[test]
    fn test_header_debug_hides_token() {
        let debug = format!("{:?}", RpcHeader::from(&credentials()));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_lookup_response_with_null_items() {
        let response: GetMailingListsResponse = serde_json::from_value(json!({
            "errorCode": 0,
            "errorMessage": "",
            "mailingListTypeItems": null
        }))
        .unwrap();

        assert!(response.status().is_success());
        assert_eq!(response.mailing_list_type_items, None);
    }

    #[test]
    fn test_create_response_with_error() {
        let response: CreateEmailAddressResponse = serde_json::from_value(json!({
            "errorCode": 225,
            "errorMessage": "Email address already exists"
        }))
        .unwrap();

        assert!(!response.status().is_success());
        assert_eq!(response.email_address_id, None);
    }
}
