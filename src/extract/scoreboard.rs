//! Scoreboard page extractor: the week's head-to-head matchups.
//!
//! Each pairing is one `table.matchup`. Within a block the first team row
//! is the away team and the second is the home team — nothing in the
//! markup labels them, the order is the convention. A shared
//! `.scoringDetails` sub-block carries the live numbers for both teams,
//! addressed by element ids interpolated with the team id
//! (`team_ip_4`, `team_ytp_4`, `team_pmr_4`, `team_liveproj_4`).
//!
//! The team id itself comes from the row's `id` attribute, which embeds it
//! as the second `_`-separated segment (e.g. `team_4`).

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{info, warn};

use crate::dom;
use crate::error::ExtractError;
use crate::extract::{ExtractContext, PageData, PageExtractor};
use crate::models::{Matchup, Team, TeamMatchup};

static MATCHUP_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table.matchup").unwrap());
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TEAM_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse(".team > .name > a").unwrap());
static TEAM_ABBREV: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".team > .name > .abbrev").unwrap());
static RECORD: Lazy<Selector> = Lazy::new(|| Selector::parse(".record").unwrap());
static OWNERS: Lazy<Selector> = Lazy::new(|| Selector::parse(".owners").unwrap());
static SCORE: Lazy<Selector> = Lazy::new(|| Selector::parse(".score").unwrap());
static SCORING_DETAILS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".scoringDetails").unwrap());

/// Extracts every [`Matchup`] on the scoreboard, in block order.
pub struct ScoreboardExtractor;

impl PageExtractor for ScoreboardExtractor {
    fn name(&self) -> &'static str {
        "scoreboard"
    }

    fn extract(&self, cx: &ExtractContext<'_>) -> Result<Option<PageData>, ExtractError> {
        let blocks: Vec<ElementRef<'_>> = cx.select(&MATCHUP_TABLE).collect();
        if blocks.is_empty() {
            return Ok(None);
        }

        let mut matchups = Vec::new();
        for block in blocks {
            match parse_matchup(block) {
                Some(matchup) => matchups.push(matchup),
                None => warn!("matchup block missing a parsable team row, skipping"),
            }
        }

        info!(count = matchups.len(), "extracted scoreboard matchups");
        Ok(Some(PageData::Matchups(matchups)))
    }
}

/// One matchup block into home/away teams. Away is the first row, home
/// the second; `None` drops the whole block when either row is missing
/// or carries no parsable team id.
fn parse_matchup(block: ElementRef<'_>) -> Option<Matchup> {
    let mut rows = block.select(&TR);
    let away_row = rows.next()?;
    let home_row = rows.next()?;
    let details = block.select(&SCORING_DETAILS).next();

    Some(Matchup {
        home_team: parse_matchup_team(home_row, details)?,
        away_team: parse_matchup_team(away_row, details)?,
    })
}

fn parse_matchup_team(
    row: ElementRef<'_>,
    details: Option<ElementRef<'_>>,
) -> Option<TeamMatchup> {
    // The row id embeds the team id, e.g. "team_4".
    let id_attr = row.value().attr("id")?;
    let team_id: u32 = id_attr.split('_').nth(1).and_then(dom::parse_num)?;

    let record = dom::trim_parens(&dom::first_text(row, &RECORD));
    let team = Team {
        id: team_id,
        short_name: dom::trim_parens(&dom::first_text(row, &TEAM_ABBREV)),
        name: dom::first_text(row, &TEAM_NAME),
        owner_name: dom::first_text(row, &OWNERS),
        // The scoreboard never shows divisions.
        division: None,
        record: (!record.is_empty()).then_some(record),
    };

    Some(TeamMatchup {
        team,
        current_points: dom::parse_num(&dom::first_text(row, &SCORE)),
        in_play: live_value(details, "team_ip_", team_id),
        yet_to_play: live_value(details, "team_ytp_", team_id),
        mins_left: live_value(details, "team_pmr_", team_id),
        projected_points: live_value(details, "team_liveproj_", team_id),
    })
}

/// Live-scoring value for one team from the shared details block, found by
/// interpolating the team id into the element-id template.
fn live_value<T: std::str::FromStr>(
    details: Option<ElementRef<'_>>,
    id_prefix: &str,
    team_id: u32,
) -> Option<T> {
    let details = details?;
    let element = dom::element_by_id(details, &format!("{id_prefix}{team_id}"))?;
    dom::parse_num(&dom::collected_text(element))
}
