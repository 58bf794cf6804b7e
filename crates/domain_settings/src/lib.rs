//! Integration Settings Domain
//!
//! This crate owns the single settings record of the checkout mailing-list
//! integration: the API credentials, the target list, the opt-in label, the
//! address export flag and the source tag.
//!
//! # Lifecycle
//!
//! - Created on the first settings save
//! - Read on every checkout and every settings page view
//! - Changed only by settings form submissions, which merge into the
//!   existing record instead of replacing it
//!
//! An empty or partially filled record is a normal state: consumers treat
//! missing values as "feature disabled".
//!
//! # Examples
//!
//! ```rust
//! use domain_settings::{Settings, SettingsSubmission};
//!
//! let existing = Settings {
//!     source_name: Some("Acme".to_string()),
//!     ..Default::default()
//! };
//!
//! let merged = SettingsSubmission::from_form([("checkboxLabel", "Join!")])
//!     .merge_into(existing);
//!
//! assert_eq!(merged.source_name.as_deref(), Some("Acme"));
//! assert_eq!(merged.checkbox_label.as_deref(), Some("Join!"));
//! assert_eq!(merged.export_address, Some(false));
//! ```

pub mod settings;
pub mod submission;
pub mod view;
pub mod i18n;
pub mod error;
pub mod ports;

pub use settings::{Settings, Credentials, SiteContext};
pub use submission::{SettingsSubmission, coerce_numeric};
pub use view::{SettingsView, CheckoutOptInField, OPT_IN_FIELD};
pub use error::SettingsError;
pub use ports::{SettingsPort, SettingsPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockSettingsPort;
