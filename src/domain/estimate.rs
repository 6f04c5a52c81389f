use serde::{Deserialize, Serialize};

use super::OrderItem;

pub const BASE_PREP_MINUTES: u32 = 10;
pub const MINUTES_PER_ITEM: u32 = 3;
pub const PREP_ROUNDING_MINUTES: u32 = 5;

/// Suggests a preparation time: a fixed base plus a per-unit cost, rounded
/// up to the next multiple of five minutes.
pub fn suggest_prep_minutes(items: &[OrderItem]) -> u32 {
    let raw = BASE_PREP_MINUTES.saturating_add(total_quantity(items).saturating_mul(MINUTES_PER_ITEM));
    round_up_to(raw, PREP_ROUNDING_MINUTES)
}

/// Units across all lines, saturating at `u32::MAX`.
pub fn total_quantity(items: &[OrderItem]) -> u32 {
    items.iter().fold(0u32, |acc, item| acc.saturating_add(item.quantity))
}

fn round_up_to(value: u32, step: u32) -> u32 {
    value.div_ceil(step).saturating_mul(step)
}

/// Preparation time choices offered when accepting an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrepTimeChoice {
    Suggested,
    Quick,
    Standard,
    Busy,
    Custom(u32),
}

impl PrepTimeChoice {
    pub fn label(&self, suggested: u32) -> String {
        match self {
            PrepTimeChoice::Suggested => format!("{} mins (Suggested)", suggested),
            PrepTimeChoice::Quick => "10 mins (Quick Order)".to_string(),
            PrepTimeChoice::Standard => "15 mins (Standard)".to_string(),
            PrepTimeChoice::Busy => "20 mins (Busy)".to_string(),
            PrepTimeChoice::Custom(_) => "Custom".to_string(),
        }
    }

    /// Minutes for this choice, given the order's suggested time.
    ///
    /// # Errors
    /// A custom time of zero minutes is rejected.
    pub fn resolve(&self, suggested: u32) -> Result<u32, String> {
        match self {
            PrepTimeChoice::Suggested => Ok(suggested),
            PrepTimeChoice::Quick => Ok(10),
            PrepTimeChoice::Standard => Ok(15),
            PrepTimeChoice::Busy => Ok(20),
            PrepTimeChoice::Custom(0) => Err("Custom preparation time must be at least 1 minute".to_string()),
            PrepTimeChoice::Custom(minutes) => Ok(*minutes),
        }
    }
}
