use serde::{Deserialize, Serialize};

/// Request body for a bulk price adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPriceChangeRequest {
    /// Products to adjust; an absent list is rejected like an empty one
    #[serde(default)]
    pub product_ids: Option<Vec<i64>>,

    /// Signed percent delta, `10.0` is +10%
    pub percentage: f64,

    #[serde(default)]
    pub include_tax: bool,
}

impl BulkPriceChangeRequest {
    pub fn product_ids(&self) -> &[i64] {
        self.product_ids.as_deref().unwrap_or_default()
    }
}
