use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflows::mortgage::financials::lenient_amount;

/// Model estimate of a property's market value in CHF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEstimate {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub estimated_value: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub low_estimate: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub high_estimate: Decimal,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
}

impl PropertyEstimate {
    /// Fills a missing or inverted range from the point estimate.
    pub(crate) fn normalized(mut self) -> Self {
        if self.low_estimate.is_zero() || self.low_estimate > self.estimated_value {
            self.low_estimate = self.estimated_value;
        }
        if self.high_estimate < self.estimated_value {
            self.high_estimate = self.estimated_value;
        }
        self
    }
}
