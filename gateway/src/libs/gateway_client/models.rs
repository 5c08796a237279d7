use engine::ResolverError;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// Response envelope shared by every gateway route.
///
/// `code == 0` is a successful lookup; `data` is absent or null when the
/// service has no mapping.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning a non-zero code into a rejection that
    /// carries the gateway's message.
    pub fn into_result(self) -> Result<Option<T>, ResolverError> {
        if self.code == 0 {
            Ok(self.data)
        } else {
            Err(ResolverError::Rejected(self.msg))
        }
    }
}
