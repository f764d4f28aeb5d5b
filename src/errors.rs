use thiserror::Error;

use crate::domain::entities::billing_result::BillingResult;

/// Failures surfaced to the user during a billing session. None of them are
/// fatal; the `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("Problem setting up in-app billing: {0}")]
    SetupFailed(BillingResult),
    #[error("Failed to query inventory: {0}")]
    InventoryQueryFailed(BillingResult),
    #[error("Error purchasing: {0}")]
    PurchaseFailed(BillingResult),
    #[error("Error purchasing. No purchase was returned.")]
    PurchaseMissing,
    #[error("Error purchasing. Authenticity verification failed.")]
    PayloadVerificationFailed,
    #[error("Subscriptions not supported on your device yet. Sorry!")]
    SubscriptionsUnsupported,
    #[error("In-app billing is not set up yet. Please try again later.")]
    NotReady,
    #[error("A purchase is already in progress.")]
    PurchaseInProgress,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{name} is not valid base64: {source}")]
    InvalidBase64 {
        name: &'static str,
        #[source]
        source: base64::DecodeError,
    },
    #[error("{name} is not a valid integer: {value}")]
    InvalidInteger { name: &'static str, value: String },
}
