use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Info {
    pub status: String,
    pub message: String,
    /// `mock` or `production`
    pub mode: String,
    /// `development` or `production`
    pub env: String,
}
