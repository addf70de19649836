use std::collections::BTreeMap;

use crate::core::{AppError, Result};

/// Rates applied when no `TAX_POLICY` override is configured
const STANDARD_RATES: [(&str, f64); 4] = [
    ("ELECTRONICS", 1.10),
    ("CLOTHING", 1.08),
    ("FOOD", 1.05),
    ("BOOKS", 1.00),
];

/// Read-only mapping from product category to tax-rate multiplier.
///
/// Keys are matched exactly (case-sensitive). A rate of `1.10` means the
/// price is multiplied by 1.10, i.e. 10% tax.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxPolicy {
    rates: BTreeMap<String, f64>,
}

impl TaxPolicy {
    /// Build a policy from `(category, rate)` pairs
    pub fn from_rates<I, K>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut table = BTreeMap::new();

        for (category, rate) in rates {
            let category = category.into();
            if category.trim().is_empty() {
                return Err(AppError::configuration("Tax category cannot be empty"));
            }
            if !rate.is_finite() || rate < 0.0 {
                return Err(AppError::configuration(format!(
                    "Invalid tax rate {} for category {}",
                    rate, category
                )));
            }
            if table.insert(category.clone(), rate).is_some() {
                return Err(AppError::configuration(format!(
                    "Duplicate tax category: {}",
                    category
                )));
            }
        }

        Ok(Self { rates: table })
    }

    /// The built-in rate table
    pub fn standard() -> Self {
        Self {
            rates: STANDARD_RATES
                .iter()
                .map(|(category, rate)| (category.to_string(), *rate))
                .collect(),
        }
    }

    /// Parse `CATEGORY=RATE[,CATEGORY=RATE...]`
    pub fn parse(spec: &str) -> Result<Self> {
        let mut pairs = Vec::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (category, rate) = entry.split_once('=').ok_or_else(|| {
                AppError::configuration(format!("Invalid tax policy entry: {}", entry))
            })?;

            let rate: f64 = rate.trim().parse().map_err(|_| {
                AppError::configuration(format!("Invalid tax rate in entry: {}", entry))
            })?;

            pairs.push((category.trim().to_string(), rate));
        }

        if pairs.is_empty() {
            return Err(AppError::configuration("Tax policy has no entries"));
        }

        Self::from_rates(pairs)
    }

    /// Look up the multiplier for a category
    pub fn rate_for(&self, category: &str) -> Option<f64> {
        self.rates.get(category).copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
