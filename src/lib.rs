//! # ffl_scrape
//!
//! Scrape the legacy ESPN fantasy football site into strongly-typed
//! teams, rosters, and matchups.
//!
//! The site serves semi-structured HTML, so the heart of this crate is
//! its extraction layer: a registry of named page extractors
//! ([`extract`]) that encode each page's positional, markup-coupled
//! structure — row ordering, fixed column positions, header-delimited
//! starters/bench sections, and textual heuristics like the
//! `"Last, TEAM position"` name format. [`LeagueClient`] is the thin
//! orchestrator in front of it: fetch, validate, parse, dispatch.
//!
//! ## Usage
//!
//! ```no_run
//! use ffl_scrape::LeagueClient;
//!
//! # async fn run() -> Result<(), ffl_scrape::Error> {
//! let client = LeagueClient::new(123456)?;
//!
//! let teams = client.fantasy_teams().await?;
//! let roster = client.roster(Some(teams[0].id)).await?;
//! let matchups = client.matchups(None).await?;
//!
//! println!(
//!     "week {}: {} starters, {} matchups",
//!     roster.week,
//!     roster.starters.len(),
//!     matchups.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetch**: GET the page with the league id (and optional team or
//!    week parameters) plus the session cookie for private leagues
//! 2. **Parse**: load the body into a `scraper::Html` document
//! 3. **Dispatch**: look up the page key in the [`ExtractorRegistry`]
//! 4. **Extract**: the page extractor walks its scoped elements and
//!    builds the typed records in [`models`]
//!
//! Row-level damage (missing markers, empty id cells, non-numeric
//! columns) is absorbed during extraction so one broken row never costs
//! the page; document-level damage (missing root structure, unknown page
//! key, transport failure) surfaces as [`Error`].

pub mod client;
mod dom;
pub mod error;
pub mod extract;
pub mod models;

pub use client::LeagueClient;
pub use error::{Error, ExtractError};
pub use extract::{ExtractContext, ExtractorRegistry, PageData, PageExtractor};
pub use models::{
    Matchup, Player, PlayerMatchup, PlayerSeasonStatistics, Roster, RosterSlot, Team, TeamMatchup,
};
