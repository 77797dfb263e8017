//! steam-partner - A client for the Steam partner web API.
//!
//! Publishers use the partner-only Steam web API to push per-player
//! statistics. This crate wraps its `SetUserStatsForGame` endpoint.
//!
//! # Architecture
//!
//! - [`partner`] - Request building, HTTP transport and the [`partner::SteamPartner`] facade
//! - [`config`] - YAML configuration loading with environment variable support

pub mod config;
pub mod partner;
