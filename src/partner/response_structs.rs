//! Response structures for partner web API endpoints.
//!
//! This module contains the wire shapes deserialized from the JSON bodies
//! returned by the Steam partner web API. They are converted to the public
//! types of [`crate::partner::structs`] before leaving the crate.

use serde::Deserialize;
use std::fmt;

/// Envelope around every partner response: `{"Data": {...}}`.
#[derive(Deserialize, Debug)]
pub struct ResponseEnvelope<T> {
    /// Payload of the response.
    #[serde(rename = "Data")]
    pub data: T,
}

/// Payload of `ISteamUserStats/SetUserStatsForGame/v1`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PartnerUserStatsForGameResultContainer {
    /// Result code reported by Steam, `1` on success.
    pub result: u32,
    /// Number of stats stored by the call.
    #[serde(rename = "totalstats", default)]
    pub total_stats: u32,
}

impl fmt::Display for PartnerUserStatsForGameResultContainer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "result={}, totalstats={}", self.result, self.total_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_envelope() {
        let json = r#"{"Data": {"result": 1, "totalstats": 3}}"#;
        let envelope: ResponseEnvelope<PartnerUserStatsForGameResultContainer> =
            serde_json::from_str(json).unwrap();

        assert_eq!(envelope.data.result, 1);
        assert_eq!(envelope.data.total_stats, 3);
    }

    #[test]
    fn test_total_stats_defaults_to_zero() {
        let container: PartnerUserStatsForGameResultContainer =
            serde_json::from_str(r#"{"result": 8}"#).unwrap();

        assert_eq!(container.result, 8);
        assert_eq!(container.total_stats, 0);
    }

    #[test]
    fn test_missing_data_is_rejected() {
        let result = serde_json::from_str::<
            ResponseEnvelope<PartnerUserStatsForGameResultContainer>,
        >(r#"{"result": 1}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let container = PartnerUserStatsForGameResultContainer {
            result: 1,
            total_stats: 2,
        };

        assert_eq!(container.to_string(), "result=1, totalstats=2");
    }
}
