//! Steam partner web API client.
//!
//! This module wraps the `ISteamUserStats/SetUserStatsForGame` endpoint of
//! the partner-only Steam web API: it builds the request URL, sends it over
//! HTTP and maps the JSON response to a typed result.
//!
//! # Modules
//!
//! - `error` - Errors surfaced by the client
//! - `interface` - The [`SteamPartner`] facade and its configuration
//! - `parameter` - Query string parameters and conditional insertion
//! - `request` - URL building, HTTP transport and deserialization
//! - `response_structs` - Wire shapes of the JSON responses
//! - `structs` - Public result types
//!
//! # Examples
//!
//! ```no_run
//! use steam_partner::partner::{AppId, PartnerConfig, SteamPartner};
//!
//! # async fn example() -> Result<(), steam_partner::partner::PartnerError> {
//! let config = PartnerConfig {
//!     api_key: Some("publisher-key".to_owned()),
//!     ..PartnerConfig::new(AppId(480))
//! };
//! let partner = SteamPartner::new(config, None)?;
//! let achievements = [("ACH_TRAVEL_FAR_ACCUM".to_owned(), 3)];
//! partner.set_partner_user_stats_for_game(76561197960287930, &achievements).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod interface;
mod parameter;
mod request;
mod response_structs;
mod structs;

pub use crate::partner::error::PartnerError;
pub use crate::partner::interface::{
    AchievementMode, PartnerConfig, STEAM_PARTNER_API_BASE_URL, SteamPartner,
};
pub use crate::partner::parameter::{Parameter, ParameterList, ParameterValue};
pub use crate::partner::request::{
    HttpTransport, PartnerRequest, Transport, ValueEncoding,
    build_request_command, strip_control_characters,
};
pub use crate::partner::structs::{AppId, PartnerUserStatsForGame};
