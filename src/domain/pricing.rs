//! Price value objects and aggregate statistics

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{PriceWatchError, PriceWatchResult};

/// A non-negative, finite price as observed on a product page
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> PriceWatchResult<Self> {
        if !value.is_finite() {
            return Err(PriceWatchError::parse(&value.to_string(), "price is not a finite number"));
        }
        if value < 0.0 {
            return Err(PriceWatchError::parse(&value.to_string(), "price is negative"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceWatchError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Mean, minimum and maximum over a non-empty price sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl PricingSummary {
    /// Difference between the highest and lowest observed price
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Qualitative assessment of the price gap across sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    NoData,
    WideGap,
    AcceptableGap,
}

impl PricingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::WideGap => "wide_gap",
            Self::AcceptableGap => "acceptable_gap",
        }
    }

    /// Human-readable advice shown next to the label
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::NoData => "No pricing data available",
            Self::WideGap => "Price gap too wide, consider adjusting",
            Self::AcceptableGap => "Price gap within acceptable range",
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
