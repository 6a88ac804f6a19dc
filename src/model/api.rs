use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
    /// Underlying cause of a 500 response, outside production only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }
}

/// Result of a like, unlike or has-liked call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusDto {
    /// Whether the liker has liked the content after the call.
    pub liked: bool,
    /// Whether this call changed anything; false for repeats and lookups.
    pub changed: bool,
    /// Current like counter of the content.
    pub likes: i64,
}

/// Distinguishes an absent field from an explicit `null` in partial updates.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]`: a missing field
/// stays `None`, `null` becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
