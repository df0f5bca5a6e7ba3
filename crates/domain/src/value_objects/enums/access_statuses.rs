use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// What a creator may currently do, derived from their subscription.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Trial,
    Expiring,
    Active,
    #[default]
    Inactive,
}

impl AccessStatus {
    pub fn has_access(&self) -> bool {
        !matches!(self, AccessStatus::Inactive)
    }
}

impl Display for AccessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            AccessStatus::Trial => "trial",
            AccessStatus::Expiring => "expiring",
            AccessStatus::Active => "active",
            AccessStatus::Inactive => "inactive",
        };
        write!(f, "{}", status)
    }
}
