//! Clubhouse page extractor: one team's weekly roster.
//!
//! The roster lives in a single `.playerTableTable`. Its rows are a flat
//! sequence the extractor walks as a small state machine: rows before the
//! first `tableHead` header are preamble, the first header opens the
//! starters section (and names the week), the second header opens the
//! bench, which runs to the end of the table. Player rows are marked by
//! the `pncPlayerRow` class; anything else is ignored.
//!
//! Per player row, by 1-based column position:
//!
//! | Column | Field |
//! |--------|-------|
//! | 5 | real-life opponent |
//! | 8-11 | season rank / total / average / last game points |
//! | 13 | projected or current points |
//! | 14 | opponent rank (`--` means no game this week) |
//! | 15-17 | percent start / own / own delta |
//!
//! Slot, player name, and kickoff come from class markers inside the row
//! (`.playerSlot`, `.playertablePlayerName`, `.gameStatusDiv`).

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{info, warn};

use crate::dom;
use crate::error::ExtractError;
use crate::extract::{ExtractContext, PageData, PageExtractor};
use crate::models::{Player, PlayerMatchup, PlayerSeasonStatistics, Roster, RosterSlot};

static ROSTER_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".playerTableTable").unwrap());
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static PLAYER_SLOT: Lazy<Selector> = Lazy::new(|| Selector::parse(".playerSlot").unwrap());
static PLAYER_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".playertablePlayerName").unwrap());
static GAME_STATUS: Lazy<Selector> = Lazy::new(|| Selector::parse(".gameStatusDiv").unwrap());

/// Opponent-rank cell text for a player with no scheduled game.
const NO_MATCHUP_PLACEHOLDER: &str = "--";

/// Which list a player row lands in, driven by header rows seen so far.
enum Section {
    BeforeHeader,
    Starters,
    Bench,
}

/// Extracts the [`Roster`] from a clubhouse page.
pub struct ClubhouseExtractor;

impl PageExtractor for ClubhouseExtractor {
    fn name(&self) -> &'static str {
        "clubhouse"
    }

    fn extract(&self, cx: &ExtractContext<'_>) -> Result<Option<PageData>, ExtractError> {
        let Some(table) = cx.select(&ROSTER_TABLE).next() else {
            return Ok(None);
        };

        let mut roster = Roster {
            starters: Vec::new(),
            bench: Vec::new(),
            week: 0,
        };
        let mut section = Section::BeforeHeader;

        for row in table.select(&TR) {
            // Rows are classified purely by class-attribute substrings.
            let Some(class) = row.value().attr("class") else {
                continue;
            };

            if class.contains("tableHead") {
                section = match section {
                    Section::BeforeHeader => {
                        roster.week = parse_week(row);
                        Section::Starters
                    }
                    _ => Section::Bench,
                };
                continue;
            }

            if class.contains("pncPlayerRow") {
                let slot = parse_roster_slot(row);
                match section {
                    Section::BeforeHeader => {
                        warn!(slot = %slot.slot, "player row before the roster header, ignoring")
                    }
                    Section::Starters => roster.starters.push(slot),
                    Section::Bench => roster.bench.push(slot),
                }
            }
        }

        info!(
            week = roster.week,
            starters = roster.starters.len(),
            bench = roster.bench.len(),
            "extracted roster"
        );
        Ok(Some(PageData::Roster(roster)))
    }
}

/// Week number from a header row's second `th`, e.g. `"WEEK 7"` -> 7.
/// 0 when the header text doesn't carry one.
fn parse_week(header_row: ElementRef<'_>) -> u32 {
    header_row
        .select(&TH)
        .nth(1)
        .map(dom::collected_text)
        .and_then(|text| text.split_whitespace().nth(1).and_then(dom::parse_num))
        .unwrap_or(0)
}

fn parse_roster_slot(row: ElementRef<'_>) -> RosterSlot {
    let cells: Vec<ElementRef<'_>> = row.select(&TD).collect();

    RosterSlot {
        slot: dom::first_text(row, &PLAYER_SLOT),
        player: parse_player(row, &cells),
        // Slot + player + action + separator precede the opponent column.
        opponent: dom::cell_text(&cells, 4),
        game_start: dom::first_text(row, &GAME_STATUS),
        matchup: parse_player_matchup(&cells),
    }
}

/// Split the name cell into player name and NFL team.
///
/// Human players render as `"Last, TEAM position"`; everything else
/// (empty slots, bye-week notes, defenses without a comma) keeps the full
/// text as the name with team `"N/A"`.
fn parse_player(row: ElementRef<'_>, cells: &[ElementRef<'_>]) -> Player {
    let raw = dom::first_text(row, &PLAYER_NAME);

    let (name, team) = match raw.find(',') {
        Some(idx) if idx > 0 => {
            let (name, rest) = raw.split_at(idx);
            let team = rest[1..].trim().split_whitespace().next().unwrap_or("N/A");
            (name.trim().to_string(), team.to_string())
        }
        _ => (raw.clone(), "N/A".to_string()),
    };

    Player {
        id: Player::PLACEHOLDER_ID,
        name,
        team,
        season_statistics: PlayerSeasonStatistics {
            player_rank: dom::parse_num(&dom::cell_text(cells, 7)),
            total_points: dom::parse_num(&dom::cell_text(cells, 8)),
            average_points: dom::parse_num(&dom::cell_text(cells, 9)),
            last_game_points: dom::parse_num(&dom::cell_text(cells, 10)),
        },
    }
}

/// Weekly matchup columns; `None` when the opponent-rank cell carries the
/// page's no-game placeholder.
fn parse_player_matchup(cells: &[ElementRef<'_>]) -> Option<PlayerMatchup> {
    let rank_text = dom::cell_text(cells, 13);
    if rank_text == NO_MATCHUP_PLACEHOLDER {
        return None;
    }

    let Some(opponent_rank) = dom::leading_digit_run(&rank_text) else {
        warn!(cell = %rank_text, "opponent rank cell has no digit run, dropping player matchup");
        return None;
    };

    Some(PlayerMatchup {
        projected_or_current_points: dom::parse_num(&dom::cell_text(cells, 12)),
        opponent_rank,
        percent_start: dom::parse_num(&dom::cell_text(cells, 14)),
        percent_own: dom::parse_num(&dom::cell_text(cells, 15)),
        percent_own_delta: dom::parse_num(&dom::cell_text(cells, 16)),
    })
}
