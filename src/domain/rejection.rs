use serde::{Deserialize, Serialize};

/// Reasons a vendor can give when turning down an incoming order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    TooBusy,
    OutOfStock,
    ClosingSoon,
    TechnicalIssues,
    /// Free-text reason typed by the vendor.
    Other(String),
}

impl RejectionReason {
    /// The fixed catalog, in the order the dashboard lists it.
    pub const CATALOG: [RejectionReason; 4] = [
        RejectionReason::TooBusy,
        RejectionReason::OutOfStock,
        RejectionReason::ClosingSoon,
        RejectionReason::TechnicalIssues,
    ];

    /// The text recorded on the order.
    pub fn label(&self) -> &str {
        match self {
            RejectionReason::TooBusy => "Too busy - Kitchen at capacity",
            RejectionReason::OutOfStock => "Items out of stock",
            RejectionReason::ClosingSoon => "Closing soon",
            RejectionReason::TechnicalIssues => "Technical/Equipment issues",
            RejectionReason::Other(text) => text,
        }
    }
}

impl From<RejectionReason> for String {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::Other(text) => text,
            fixed => fixed.label().to_string(),
        }
    }
}
