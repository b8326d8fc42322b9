use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON error payload returned by every failing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self { error: error.into(), code }
    }
}
