//! Mailing-list service client
//!
//! Wraps an `RpcTransport` with the two operations the checkout integration
//! needs. Neither returns an error: every failure is logged here and turned
//! into an empty result or a `SubmissionOutcome` the caller may ignore.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};

use core_kernel::{EmailAddressId, PortError, SubmissionId};
use domain_settings::{Credentials, Settings, SiteContext};

use crate::checkout::CheckoutFields;
use crate::contact::ContactRecord;
use crate::error::RpcError;
use crate::mailing_list::MailingLists;
use crate::ports::RpcTransport;
use crate::rpc::{
    ContactSource, CreateEmailAddressRequest, CreateEmailAddressResponse, GetMailingListsRequest,
    GetMailingListsResponse, RpcOperation, RpcResponse,
};

/// Why a checkout did not produce a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("customer did not opt in")]
    NotOptedIn,

    #[error("checkout field {0} is empty")]
    MissingCustomerField(&'static str),

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("setting {0} is not configured")]
    MissingSetting(&'static str),
}

/// What happened to a checkout submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// No call was made
    Skipped(SkipReason),
    /// The contact was created; the service may omit the id
    Created(Option<EmailAddressId>),
    /// The service answered with a non-zero error code
    Rejected { code: i64, message: String },
    /// The service could not be reached or answered garbage
    Failed(String),
}

impl SubmissionOutcome {
    /// Short machine-readable name, used in API responses
    pub fn status(&self) -> &'static str {
        match self {
            SubmissionOutcome::Skipped(_) => "skipped",
            SubmissionOutcome::Created(_) => "created",
            SubmissionOutcome::Rejected { .. } => "rejected",
            SubmissionOutcome::Failed(_) => "failed",
        }
    }
}

/// Client for the mailing-list service
#[derive(Clone)]
pub struct MailingListClient {
    transport: Arc<dyn RpcTransport>,
}

impl MailingListClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Sends one typed request and checks the response status
    async fn call<Req, Resp>(&self, operation: RpcOperation, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + RpcResponse,
    {
        let payload = serde_json::to_value(request).map_err(|e| {
            PortError::transformation(format!("cannot encode {} request: {}", operation, e))
        })?;

        let raw = self.transport.invoke(operation, payload).await?;

        let response: Resp = serde_json::from_value(raw).map_err(|e| {
            PortError::transformation(format!("malformed {} response: {}", operation, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Rejected {
                operation,
                code: status.error_code,
                message: status.error_message.clone(),
            });
        }

        Ok(response)
    }

    /// Fetches every list the account can use, ordered by id
    ///
    /// Returns an empty collection when credentials are missing or the
    /// lookup fails for any reason.
    pub async fn fetch_lists(&self, credentials: Option<&Credentials>) -> MailingLists {
        let Some(credentials) = credentials else {
            debug!("API credentials not configured, skipping mailing list lookup");
            return MailingLists::default();
        };

        let request = GetMailingListsRequest::all(credentials);
        match self
            .call::<_, GetMailingListsResponse>(RpcOperation::GetMailingLists, &request)
            .await
        {
            Ok(response) => {
                let lists = MailingLists::from_pairs(
                    response
                        .mailing_list_type_items
                        .unwrap_or_default()
                        .into_iter()
                        .map(|item| (item.mailing_list_id, item.mailing_list_name)),
                );
                debug!(count = lists.len(), "Fetched mailing lists");
                lists
            }
            Err(e) => {
                warn!(error = %e, "Could not fetch mailing lists");
                MailingLists::default()
            }
        }
    }

    /// Adds the customer of a completed checkout to the configured list
    ///
    /// Does nothing unless the customer opted in, the required customer
    /// fields are present and the integration is fully configured.
    pub async fn submit(
        &self,
        settings: &Settings,
        checkout: &CheckoutFields,
        site: &SiteContext,
    ) -> SubmissionOutcome {
        let span = info_span!("checkout_submission", submission_id = %SubmissionId::new());
        self.submit_inner(settings, checkout, site).instrument(span).await
    }

    async fn submit_inner(
        &self,
        settings: &Settings,
        checkout: &CheckoutFields,
        site: &SiteContext,
    ) -> SubmissionOutcome {
        let request = match prepare_contact_request(settings, checkout, &site.language_code()) {
            Ok(request) => request,
            Err(reason) => {
                debug!(%reason, "Not adding checkout customer to mailing list");
                return SubmissionOutcome::Skipped(reason);
            }
        };

        match self
            .call::<_, CreateEmailAddressResponse>(RpcOperation::CreateEmailAddress, &request)
            .await
        {
            Ok(response) => {
                match response.email_address_id {
                    Some(id) => info!(email_address_id = %id, "Email address created with ID {}", id),
                    None => info!("Email address created without an ID"),
                }
                SubmissionOutcome::Created(response.email_address_id)
            }
            Err(RpcError::Rejected { code, message, .. }) => {
                warn!(error_code = code, "Email address not created: {}", message);
                SubmissionOutcome::Rejected { code, message }
            }
            Err(e) => {
                warn!(error = %e, "Mailing-list service call failed");
                SubmissionOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Builds the `CreateEmailAddress` request for a checkout
///
/// Checks, in order: the opt-in, the required customer fields, then the
/// credentials and target list.
///
/// # Errors
///
/// Returns the first gate that did not pass.
pub fn prepare_contact_request(
    settings: &Settings,
    checkout: &CheckoutFields,
    language: &str,
) -> Result<CreateEmailAddressRequest, SkipReason> {
    if !checkout.opted_in() {
        return Err(SkipReason::NotOptedIn);
    }

    let contact = ContactRecord::from_checkout(checkout, settings.exports_address(), language)?;

    if settings.api_user_id.map_or(true, |id| id.get() == 0) {
        return Err(SkipReason::MissingSetting("apiUserId"));
    }
    let credentials = settings
        .credentials()
        .ok_or(SkipReason::MissingSetting("apiUserToken"))?;
    let mailing_list_id = settings
        .target_list()
        .ok_or(SkipReason::MissingSetting("mailingListId"))?;

    let sources = settings
        .source()
        .map(|name| ContactSource {
            name: name.to_string(),
        })
        .into_iter()
        .collect();

    Ok(CreateEmailAddressRequest {
        header: (&credentials).into(),
        mailing_list_id,
        email_address_type: contact,
        sources,
    })
}
