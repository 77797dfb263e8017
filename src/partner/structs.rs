//! Public data structures returned by the partner client.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::partner::response_structs::PartnerUserStatsForGameResultContainer;

/// Steam application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u32);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a `SetUserStatsForGame` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerUserStatsForGame {
    /// Result code reported by Steam, `1` on success
    pub result: u32,
    /// Number of stats stored by the call
    pub total_stats: u32,
}

impl From<PartnerUserStatsForGameResultContainer> for PartnerUserStatsForGame {
    fn from(container: PartnerUserStatsForGameResultContainer) -> Self {
        PartnerUserStatsForGame {
            result: container.result,
            total_stats: container.total_stats,
        }
    }
}

impl fmt::Display for PartnerUserStatsForGame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "result={}, total_stats={}", self.result, self.total_stats)
    }
}
