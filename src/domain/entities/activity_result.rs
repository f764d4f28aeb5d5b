use std::collections::HashMap;

/// Platform result code for a flow the user completed.
pub const RESULT_OK: i32 = -1;
/// Platform result code for a flow the user backed out of.
pub const RESULT_CANCELED: i32 = 0;

pub const RESPONSE_CODE: &str = "RESPONSE_CODE";
pub const INAPP_PURCHASE_DATA: &str = "INAPP_PURCHASE_DATA";
pub const INAPP_DATA_SIGNATURE: &str = "INAPP_DATA_SIGNATURE";

/// Result of an external flow, forwarded by the hosting screen. The data
/// payload is opaque to the session and only interpreted by the billing
/// library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityResult {
    pub request_code: i32,
    pub result_code: i32,
    pub data: Option<ActivityResultData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityResultData {
    extras: HashMap<String, String>,
}

impl ActivityResultData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

impl ActivityResult {
    pub fn new(request_code: i32, result_code: i32, data: Option<ActivityResultData>) -> Self {
        Self {
            request_code,
            result_code,
            data,
        }
    }
}
