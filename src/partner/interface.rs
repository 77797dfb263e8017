//! Facade over the partner web API.
//!
//! This module provides the [`SteamPartner`] struct, the single entry point
//! used to push per-user stats for a game.

use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::partner::error::PartnerError;
use crate::partner::parameter::{Parameter, ParameterList};
use crate::partner::request::{HttpTransport, PartnerRequest, Transport, ValueEncoding};
use crate::partner::response_structs::{
    PartnerUserStatsForGameResultContainer, ResponseEnvelope,
};
use crate::partner::structs::{AppId, PartnerUserStatsForGame};

/// Default partner web API base URL.
pub const STEAM_PARTNER_API_BASE_URL: &str = "http://partner.steam-api.com/";

const USER_STATS_INTERFACE: &str = "ISteamUserStats";
const SET_USER_STATS_FOR_GAME: &str = "SetUserStatsForGame";

/// Which of the supplied achievements are sent by
/// [`SteamPartner::set_partner_user_stats_for_game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementMode {
    /// Only the first entry is sent as `name[0]`/`value[0]`, while `count`
    /// still reports the number of entries supplied.
    #[default]
    FirstOnly,
    /// Every entry is sent as `name[i]`/`value[i]`.
    All,
}

/// Settings of a [`SteamPartner`] client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerConfig {
    /// Partner web API base URL
    pub base_url: String,
    /// Publisher web API key, sent as `key` when set
    pub api_key: Option<String>,
    /// Application the stats belong to
    pub app_id: AppId,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    /// Query string value encoding
    pub value_encoding: ValueEncoding,
    /// Achievements sent per submission
    pub achievement_mode: AchievementMode,
}

impl PartnerConfig {
    /// Create a [PartnerConfig] for `app_id` pointing to [`STEAM_PARTNER_API_BASE_URL`].
    pub fn new(app_id: AppId) -> Self {
        PartnerConfig {
            base_url: STEAM_PARTNER_API_BASE_URL.to_owned(),
            api_key: None,
            app_id,
            timeout: None,
            value_encoding: ValueEncoding::default(),
            achievement_mode: AchievementMode::default(),
        }
    }
}

/// Client for the Steam partner web API.
///
/// The client only holds immutable state, so concurrent calls through a
/// shared reference are independent.
///
/// # Examples
///
/// ```no_run
/// use steam_partner::partner::{AppId, PartnerConfig, SteamPartner};
///
/// # async fn example() -> Result<(), steam_partner::partner::PartnerError> {
/// let partner = SteamPartner::new(PartnerConfig::new(AppId(480)), None)?;
/// let achievements = [("ACH_WIN_ONE_GAME".to_owned(), 1)];
/// let stats = partner
///     .set_partner_user_stats_for_game(76561197960287930, &achievements)
///     .await?;
/// println!("{}", stats);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SteamPartner<T: Transport = HttpTransport> {
    /// Request sender
    request: PartnerRequest<T>,
    /// Publisher web API key
    api_key: Option<String>,
    /// Application the stats belong to
    app_id: AppId,
    /// Achievements sent per submission
    achievement_mode: AchievementMode,
}

impl SteamPartner<HttpTransport> {
    /// Create a new [SteamPartner] sending requests with `reqwest`.
    ///
    /// # Arguments
    ///
    /// * `config` - The client settings.
    /// * `client` - A reusable HTTP client, or `None` to create one per request.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError::Configuration`] if the base URL is empty.
    pub fn new(config: PartnerConfig, client: Option<Client>) -> Result<Self, PartnerError> {
        let transport = HttpTransport::new(client, config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SteamPartner<T> {
    /// Create a new [SteamPartner] on top of a custom [`Transport`].
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError::Configuration`] if the base URL is empty.
    pub fn with_transport(config: PartnerConfig, transport: T) -> Result<Self, PartnerError> {
        let request = PartnerRequest::new(&config.base_url, config.value_encoding, transport)?;

        Ok(SteamPartner {
            request,
            api_key: config.api_key,
            app_id: config.app_id,
            achievement_mode: config.achievement_mode,
        })
    }

    /// Request `ISteamUserStats/SetUserStatsForGame/v1` to store achievement values of a user.
    ///
    /// The query string is `appid`, `steamid`, `count` then the indexed
    /// `name[i]`/`value[i]` pairs, preceded by `key` when an API key is set.
    /// `count` is always the number of `achievements`. In
    /// [`AchievementMode::FirstOnly`] only the caller's first entry is sent.
    ///
    /// Each call is a new submission on the server side.
    ///
    /// # Arguments
    ///
    /// * `steam_id` - The 64-bit Steam id of the user.
    /// * `achievements` - Achievement names and their values, in the order they are sent.
    ///
    /// # Errors
    ///
    /// * [`PartnerError::EmptyAchievements`] if `achievements` is empty.
    /// * [`PartnerError::Transport`] if the request fails.
    /// * [`PartnerError::Parse`] if the response is not the expected JSON.
    pub async fn set_partner_user_stats_for_game(
        &self,
        steam_id: u64,
        achievements: &[(String, u32)],
    ) -> Result<PartnerUserStatsForGame, PartnerError> {
        let parameters = self.user_stats_parameters(steam_id, achievements)?;
        info!(
            "submit {} achievement(s) of {} for app {}",
            achievements.len(),
            steam_id,
            self.app_id
        );

        let endpoint = endpoint_path(USER_STATS_INTERFACE, SET_USER_STATS_FOR_GAME, 1);
        let response: ResponseEnvelope<PartnerUserStatsForGameResultContainer> = self
            .request
            .send_partner_request(&endpoint, &parameters)
            .await?;
        debug!("response from {} -> {}", &endpoint, &response.data);

        Ok(response.data.into())
    }

    /// Assembles the ordered query parameters of a `SetUserStatsForGame` call.
    fn user_stats_parameters(
        &self,
        steam_id: u64,
        achievements: &[(String, u32)],
    ) -> Result<Vec<Parameter>, PartnerError> {
        if achievements.is_empty() {
            return Err(PartnerError::EmptyAchievements);
        }

        let mut parameters: Vec<Parameter> = Vec::new();
        parameters.add_if_has_value(&self.api_key, "key");
        parameters.add_if_has_value(&self.app_id, "appid");
        parameters.add_if_has_value(&steam_id, "steamid");
        parameters.add_if_has_value(&achievements.len(), "count");

        let sent = match self.achievement_mode {
            AchievementMode::FirstOnly => 1,
            AchievementMode::All => achievements.len(),
        };
        for (index, (name, value)) in achievements.iter().take(sent).enumerate() {
            parameters.add_if_has_value(name, &format!("name[{}]", index));
            parameters.add_if_has_value(value, &format!("value[{}]", index));
        }

        Ok(parameters)
    }
}

/// Path of a versioned web API method, e.g. `ISteamUserStats/SetUserStatsForGame/v1`.
fn endpoint_path(interface: &str, method: &str, version: u32) -> String {
    format!("{}/{}/v{}", interface, method, version)
}
