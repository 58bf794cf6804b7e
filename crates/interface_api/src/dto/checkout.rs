//! Checkout DTOs

use serde::Serialize;

use core_kernel::EmailAddressId;
use domain_contact::SubmissionOutcome;
use domain_settings::CheckoutOptInField;

#[derive(Debug, Serialize)]
pub struct OptInFieldResponse {
    /// Absent while the integration is unconfigured
    pub field: Option<CheckoutOptInField>,
}

/// Diagnostic summary of a checkout submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address_id: Option<EmailAddressId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<SubmissionOutcome> for CheckoutResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        let status = outcome.status();
        let (email_address_id, detail) = match outcome {
            SubmissionOutcome::Created(id) => (id, None),
            SubmissionOutcome::Skipped(reason) => (None, Some(reason.to_string())),
            SubmissionOutcome::Rejected { message, .. } => (None, Some(message)),
            SubmissionOutcome::Failed(message) => (None, Some(message)),
        };

        Self {
            status,
            email_address_id,
            detail,
        }
    }
}
