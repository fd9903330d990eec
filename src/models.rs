//! Data models for league pages and their extracted representations.
//!
//! This module defines the core data structures produced by the extraction
//! layer:
//! - [`Team`]: a league member as listed on the owners page
//! - [`Roster`] / [`RosterSlot`]: a team's weekly lineup, split into starters and bench
//! - [`Matchup`] / [`TeamMatchup`]: a head-to-head pairing from the scoreboard page
//! - Player types: [`Player`], [`PlayerSeasonStatistics`], [`PlayerMatchup`]
//!
//! Every value is built fresh from a single HTML snapshot and never mutated
//! afterwards. Numeric fields that the page renders as non-numeric text
//! (`--`, blanks) are `None` rather than a silent zero, so callers can tell
//! "not played yet" apart from "scored nothing".

use serde::{Deserialize, Serialize};

/// A fantasy team within the league.
///
/// Teams come from the owners page (`leaguesetup/ownerinfo`), where
/// `division` is populated, or from a scoreboard row, where `record` is
/// populated instead. Identity is `id`, unique within a league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team id, unique within the league.
    pub id: u32,
    /// Short name (abbreviation) for the team.
    pub short_name: String,
    /// Full team name.
    pub name: String,
    /// Display name of the team's owner.
    pub owner_name: String,
    /// Division the team plays in. Not present on the scoreboard page.
    pub division: Option<String>,
    /// Current record as rendered by the site, e.g. `"5-2-0"` (W-L-D).
    pub record: Option<String>,
}

/// A team within the scope of a weekly matchup.
///
/// Wraps a [`Team`] with the live-scoring fields the scoreboard page shows
/// for each side of a pairing. All of them are optional: they are only
/// rendered while games are in progress, and some leagues hide projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatchup {
    /// The underlying team identity.
    #[serde(flatten)]
    pub team: Team,
    /// Current fantasy points for the team.
    pub current_points: Option<f32>,
    /// Live projected points for the team.
    pub projected_points: Option<f32>,
    /// Game minutes left across the team's starters.
    pub mins_left: Option<u32>,
    /// Number of starters yet to play.
    pub yet_to_play: Option<u32>,
    /// Number of starters currently in play.
    pub in_play: Option<u32>,
}

/// A head-to-head pairing of two teams for a given week.
///
/// The scoreboard renders the away team in the first table row and the home
/// team in the second; that positional convention is the only thing that
/// distinguishes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    /// Home side of the pairing.
    pub home_team: TeamMatchup,
    /// Away side of the pairing.
    pub away_team: TeamMatchup,
}

/// A team's weekly roster, split into starters and bench.
///
/// Both lists preserve the page's display order; the clubhouse page lists
/// every starter before the bench header, so `starters` is fully populated
/// before the first `bench` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Starting lineup, in page order.
    pub starters: Vec<RosterSlot>,
    /// Benched players, in page order.
    pub bench: Vec<RosterSlot>,
    /// Matchup week the roster represents; 0 when the header didn't parse.
    pub week: u32,
}

/// A single slot within a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSlot {
    /// Slot label, e.g. `QB`, `RB`, `FLEX`, `Bench`.
    pub slot: String,
    /// The player occupying the slot.
    pub player: Player,
    /// Real-life opponent as free text, e.g. `"@ NYJ"`. May be empty.
    pub opponent: String,
    /// Free-text kickoff descriptor, e.g. `"Sun 1:00"`.
    pub game_start: String,
    /// Weekly matchup statistics; `None` when the player has no scheduled
    /// game (the page renders `--` in the opponent-rank column).
    pub matchup: Option<PlayerMatchup>,
}

/// An NFL player occupying a roster slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Player id. The clubhouse markup does not expose a reliable player
    /// id, so this is always [`Player::PLACEHOLDER_ID`].
    pub id: u32,
    /// Player name as rendered, minus the team/position suffix.
    pub name: String,
    /// NFL team abbreviation, or `"N/A"` for non-player rows such as an
    /// empty bye-week slot.
    pub team: String,
    /// Season-long statistics for the player.
    pub season_statistics: PlayerSeasonStatistics,
}

impl Player {
    /// Stand-in id used for every player; the markup carries no usable one.
    pub const PLACEHOLDER_ID: u32 = 1;
}

/// Season-long statistics columns from the clubhouse table.
///
/// Each field is `None` when its column held non-numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonStatistics {
    /// Rank of the player within their position (1 is best).
    pub player_rank: Option<u32>,
    /// Cumulative fantasy points this season.
    pub total_points: Option<f32>,
    /// Average fantasy points per game.
    pub average_points: Option<f32>,
    /// Points scored in the player's last game.
    pub last_game_points: Option<f32>,
}

/// Weekly matchup statistics for a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchup {
    /// Projected points before kickoff, current points after.
    pub projected_or_current_points: Option<f32>,
    /// Rank of the opposing defense against the player's position
    /// (1 is toughest, 32 is weakest).
    pub opponent_rank: u32,
    /// Percent of all league teams starting the player this week.
    pub percent_start: Option<f32>,
    /// Percent of all league teams owning the player.
    pub percent_own: Option<f32>,
    /// Weekly ownership delta; can be negative.
    pub percent_own_delta: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_team() -> Team {
        Team {
            id: 4,
            short_name: "HAWK".to_string(),
            name: "Hawkeye Heroes".to_string(),
            owner_name: "Jane Smith".to_string(),
            division: Some("East".to_string()),
            record: None,
        }
    }

    #[test]
    fn test_team_serde_round_trip() {
        let team = sample_team();
        let json = serde_json::to_string(&team).unwrap();
        let back: Team = serde_json::from_str(&json).unwrap();
        assert_eq!(back, team);
    }

    #[test]
    fn test_team_matchup_flattens_team_fields() {
        let matchup_team = TeamMatchup {
            team: sample_team(),
            current_points: Some(74.5),
            projected_points: None,
            mins_left: Some(120),
            yet_to_play: Some(3),
            in_play: None,
        };

        let value = serde_json::to_value(&matchup_team).unwrap();
        // Team fields sit at the top level of the serialized form.
        assert_eq!(value["id"], 4);
        assert_eq!(value["short_name"], "HAWK");
        assert_eq!(value["current_points"], 74.5);
        assert!(value["projected_points"].is_null());
    }

    #[test]
    fn test_unparsed_numeric_fields_serialize_as_null() {
        let stats = PlayerSeasonStatistics {
            player_rank: None,
            total_points: Some(112.0),
            average_points: None,
            last_game_points: None,
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"player_rank\":null"));
        assert!(json.contains("\"total_points\":112.0"));
    }

    #[test]
    fn test_player_placeholder_id() {
        assert_eq!(Player::PLACEHOLDER_ID, 1);
    }

    #[test]
    fn test_roster_deserialization() {
        let json = r#"{
            "starters": [],
            "bench": [],
            "week": 7
        }"#;

        let roster: Roster = serde_json::from_str(json).unwrap();
        assert_eq!(roster.week, 7);
        assert!(roster.starters.is_empty());
        assert!(roster.bench.is_empty());
    }
}
