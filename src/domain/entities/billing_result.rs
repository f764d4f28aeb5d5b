use std::fmt;

/// Response codes reported by the billing service, plus the helper-level
/// codes (negative values) produced on the client side of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingResponse {
    Ok,
    UserCanceled,
    ServiceUnavailable,
    BillingUnavailable,
    ItemUnavailable,
    DeveloperError,
    Error,
    ItemAlreadyOwned,
    ItemNotOwned,

    RemoteException,
    BadResponse,
    VerificationFailed,
    SendIntentFailed,
    UserCancelled,
    UnknownPurchaseResponse,
    MissingToken,
    UnknownError,
    SubscriptionsNotAvailable,
    InvalidConsumption,

    /// Any code not covered above, kept verbatim.
    Other(i32),
}

impl BillingResponse {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::UserCanceled,
            2 => Self::ServiceUnavailable,
            3 => Self::BillingUnavailable,
            4 => Self::ItemUnavailable,
            5 => Self::DeveloperError,
            6 => Self::Error,
            7 => Self::ItemAlreadyOwned,
            8 => Self::ItemNotOwned,
            -1001 => Self::RemoteException,
            -1002 => Self::BadResponse,
            -1003 => Self::VerificationFailed,
            -1004 => Self::SendIntentFailed,
            -1005 => Self::UserCancelled,
            -1006 => Self::UnknownPurchaseResponse,
            -1007 => Self::MissingToken,
            -1008 => Self::UnknownError,
            -1009 => Self::SubscriptionsNotAvailable,
            -1010 => Self::InvalidConsumption,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::UserCanceled => 1,
            Self::ServiceUnavailable => 2,
            Self::BillingUnavailable => 3,
            Self::ItemUnavailable => 4,
            Self::DeveloperError => 5,
            Self::Error => 6,
            Self::ItemAlreadyOwned => 7,
            Self::ItemNotOwned => 8,
            Self::RemoteException => -1001,
            Self::BadResponse => -1002,
            Self::VerificationFailed => -1003,
            Self::SendIntentFailed => -1004,
            Self::UserCancelled => -1005,
            Self::UnknownPurchaseResponse => -1006,
            Self::MissingToken => -1007,
            Self::UnknownError => -1008,
            Self::SubscriptionsNotAvailable => -1009,
            Self::InvalidConsumption => -1010,
            Self::Other(code) => *code,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::UserCanceled => "User Canceled",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::BillingUnavailable => "Billing Unavailable",
            Self::ItemUnavailable => "Item unavailable",
            Self::DeveloperError => "Developer Error",
            Self::Error => "Error",
            Self::ItemAlreadyOwned => "Item Already Owned",
            Self::ItemNotOwned => "Does not own item",
            Self::RemoteException => "Remote exception during initialization",
            Self::BadResponse => "Bad response received",
            Self::VerificationFailed => "Purchase signature verification failed",
            Self::SendIntentFailed => "Send intent failed",
            Self::UserCancelled => "User cancelled",
            Self::UnknownPurchaseResponse => "Unknown purchase response",
            Self::MissingToken => "Missing token",
            Self::UnknownError => "Unknown error",
            Self::SubscriptionsNotAvailable => "Subscriptions not available",
            Self::InvalidConsumption => "Invalid consumption attempt",
            Self::Other(_) => "Unknown",
        }
    }
}

/// Outcome of a single request to the billing library: a response code and
/// a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingResult {
    pub response: BillingResponse,
    pub message: String,
}

impl BillingResult {
    pub fn new(response: BillingResponse, message: impl Into<String>) -> Self {
        Self {
            response,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(BillingResponse::Ok, message)
    }

    pub fn is_success(&self) -> bool {
        self.response == BillingResponse::Ok
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

impl fmt::Display for BillingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (response: {}:{})",
            self.message,
            self.response.code(),
            self.response.description()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_back_to_themselves() {
        for code in [0, 1, 3, 7, 8, -1002, -1005, -1009] {
            assert_eq!(BillingResponse::from_code(code).code(), code);
        }
        assert_eq!(BillingResponse::from_code(42), BillingResponse::Other(42));
    }

    #[test]
    fn only_ok_is_success() {
        assert!(BillingResult::ok("Setup successful.").is_success());
        let failure = BillingResult::new(BillingResponse::BillingUnavailable, "Billing v3 missing");
        assert!(failure.is_failure());
    }

    #[test]
    fn display_includes_code_and_description() {
        let result = BillingResult::new(BillingResponse::UserCancelled, "User canceled.");
        assert_eq!(
            result.to_string(),
            "User canceled. (response: -1005:User cancelled)"
        );
    }
}
