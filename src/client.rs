//! Fetch+parse client for the league site.
//!
//! [`LeagueClient`] is the thin orchestrator in front of the extraction
//! layer: it issues the GET request for a page, checks status and body,
//! loads the document, and dispatches to the registry. It owns no parse
//! state, so a single client can serve concurrent calls.
//!
//! # Request Shape
//!
//! Every request goes to `http://games.espn.com/ffl/<fragment>` with the
//! `leagueId` query parameter, `Accept: text/html`, and a fixed browser
//! User-Agent (the site serves a different page to unknown agents).
//! Non-public leagues additionally need the session cookie, passed
//! verbatim via [`LeagueClient::with_cookie`].

use reqwest::header::{ACCEPT, COOKIE, USER_AGENT};
use reqwest::StatusCode;
use scraper::Html;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::Error;
use crate::extract::{ExtractorRegistry, PageData};
use crate::models::{Matchup, Roster, Team};

const BASE_URL: &str = "http://games.espn.com/ffl/";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/54.0.2840.99 Safari/537.36";

/// Client for one fantasy league.
///
/// # Examples
///
/// ```no_run
/// use ffl_scrape::LeagueClient;
///
/// # async fn run() -> Result<(), ffl_scrape::Error> {
/// let client = LeagueClient::new(123456)?.with_cookie("espn_s2=...; SWID=...");
///
/// for team in client.fantasy_teams().await? {
///     println!("{:>3}  {} ({})", team.id, team.name, team.owner_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct LeagueClient {
    http: reqwest::Client,
    base_url: Url,
    league_id: u32,
    cookie: Option<String>,
    registry: ExtractorRegistry,
}

impl LeagueClient {
    /// Client for the given league id, with the built-in extractors.
    pub fn new(league_id: u32) -> Result<Self, Error> {
        Ok(LeagueClient {
            http: reqwest::Client::builder().build()?,
            base_url: Url::parse(BASE_URL)?,
            league_id,
            cookie: None,
            registry: ExtractorRegistry::new(),
        })
    }

    /// Session cookie to send with every request. Required for
    /// non-public leagues.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Override the site base URL; the default is the live site. Mostly
    /// useful for pointing at a local fixture server.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Replace the extractor registry, e.g. to add custom extractors
    /// alongside the built-ins.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The registry this client dispatches to.
    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Fetch all fantasy teams within the league.
    #[instrument(level = "info", skip(self), fields(league_id = self.league_id))]
    pub async fn fantasy_teams(&self) -> Result<Vec<Team>, Error> {
        self.get_and_extract("owners", "leaguesetup/ownerinfo", Vec::new())
            .await?
            .into_teams()
            .ok_or(Error::UnexpectedPayload { page: "owners" })
    }

    /// Fetch the active roster for `team_id`, or for the session's
    /// default team when `None`.
    #[instrument(level = "info", skip(self), fields(league_id = self.league_id))]
    pub async fn roster(&self, team_id: Option<u32>) -> Result<Roster, Error> {
        let mut query = Vec::new();
        if let Some(team_id) = team_id {
            query.push(("teamId", team_id.to_string()));
        }

        self.get_and_extract("clubhouse", "clubhouse", query)
            .await?
            .into_roster()
            .ok_or(Error::UnexpectedPayload { page: "clubhouse" })
    }

    /// Fetch the matchups for `week` (1 through N), or for the current
    /// week when `None`.
    #[instrument(level = "info", skip(self), fields(league_id = self.league_id))]
    pub async fn matchups(&self, week: Option<u32>) -> Result<Vec<Matchup>, Error> {
        let mut query = Vec::new();
        if let Some(week) = week {
            query.push(("matchupIdPeriod", week.to_string()));
        }

        self.get_and_extract("scoreboard", "scoreboard", query)
            .await?
            .into_matchups()
            .ok_or(Error::UnexpectedPayload { page: "scoreboard" })
    }

    async fn get_and_extract(
        &self,
        page: &'static str,
        fragment: &str,
        query: Vec<(&str, String)>,
    ) -> Result<PageData, Error> {
        let body = self.fetch_page(fragment, &query).await?;
        let document = Html::parse_document(&body);

        let result = self.registry.dispatch(page, &document)?;
        let data = result.ok_or(Error::NoData { page })?;

        info!(page, "page extracted");
        Ok(data)
    }

    async fn fetch_page(&self, fragment: &str, query: &[(&str, String)]) -> Result<String, Error> {
        let url = self.base_url.join(fragment)?;

        let mut request = self
            .http
            .get(url.clone())
            .query(&[("leagueId", self.league_id.to_string())])
            .query(query)
            .header(ACCEPT, "text/html")
            .header(USER_AGENT, BROWSER_USER_AGENT);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        debug!(%url, "requesting page");
        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(Error::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_builtin_registry() {
        let client = LeagueClient::new(123456).unwrap();
        assert_eq!(
            client.registry().known_keys(),
            vec!["clubhouse", "owners", "scoreboard"]
        );
    }

    #[test]
    fn test_page_fragments_join_onto_base_url() {
        let client = LeagueClient::new(123456).unwrap();

        let owners = client.base_url.join("leaguesetup/ownerinfo").unwrap();
        assert_eq!(
            owners.as_str(),
            "http://games.espn.com/ffl/leaguesetup/ownerinfo"
        );

        let scoreboard = client.base_url.join("scoreboard").unwrap();
        assert_eq!(scoreboard.as_str(), "http://games.espn.com/ffl/scoreboard");
    }

    #[tokio::test]
    async fn test_unreachable_host_surfaces_transport_error() {
        // Nothing listens on the discard port; the connect fails before
        // any parsing happens.
        let base = Url::parse("http://127.0.0.1:9/").unwrap();
        let client = LeagueClient::new(1).unwrap().with_base_url(base);

        let err = client.fantasy_teams().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
