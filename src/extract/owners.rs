//! Owners page extractor: the league member table.
//!
//! The owners page (`leaguesetup/ownerinfo`) lists every team in the
//! league in one `table.tableBody`, one `tr.ownerRow` per team. Fields
//! are read by fixed column position:
//!
//! | Column | Field |
//! |--------|-------|
//! | 1 | team id |
//! | 2 | short name |
//! | 3 | team name |
//! | 4 | division |
//! | 5 | owner name |
//!
//! Decorative rows reuse the `ownerRow` class with an empty id cell; those
//! are skipped, not errors.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{debug, info};

use crate::dom;
use crate::error::ExtractError;
use crate::extract::{ExtractContext, PageData, PageExtractor};
use crate::models::Team;

static OWNER_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table.tableBody").unwrap());
static OWNER_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.ownerRow").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Extracts every [`Team`] in the league, in row order.
pub struct OwnersExtractor;

impl PageExtractor for OwnersExtractor {
    fn name(&self) -> &'static str {
        "owners"
    }

    fn extract(&self, cx: &ExtractContext<'_>) -> Result<Option<PageData>, ExtractError> {
        let Some(table) = cx.select(&OWNER_TABLE).next() else {
            return Ok(None);
        };

        let mut teams = Vec::new();
        for row in table.select(&OWNER_ROW) {
            match parse_owner_row(row) {
                Some(team) => teams.push(team),
                None => debug!("skipping owner row without a team id"),
            }
        }

        info!(count = teams.len(), "extracted league teams");
        Ok(Some(PageData::Teams(teams)))
    }
}

/// One `ownerRow` into a [`Team`]; `None` for rows whose id cell is empty
/// or non-numeric.
fn parse_owner_row(row: ElementRef<'_>) -> Option<Team> {
    let cells: Vec<ElementRef<'_>> = row.select(&TD).collect();

    let id_text = dom::cell_text(&cells, 0);
    if id_text.is_empty() {
        return None;
    }
    let id = id_text.parse().ok()?;

    let division = dom::cell_text(&cells, 3);
    Some(Team {
        id,
        short_name: dom::cell_text(&cells, 1),
        name: dom::cell_text(&cells, 2),
        owner_name: dom::cell_text(&cells, 4),
        division: (!division.is_empty()).then_some(division),
        // The record column only exists on the scoreboard page.
        record: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractorRegistry;
    use scraper::Html;

    /// Three valid rows plus one header-only row reusing the row marker.
    const OWNERS_PAGE: &str = r#"
        <html><body>
        <table class="tableBody">
          <tr class="tableHead"><td colspan="5">League Members</td></tr>
          <tr class="ownerRow">
            <td>  </td><td></td><td>DIVISION: EAST</td><td></td><td></td>
          </tr>
          <tr class="ownerRow">
            <td>1</td><td>HAWK</td><td>Hawkeye Heroes</td><td>East</td><td>Jane Smith</td>
          </tr>
          <tr class="ownerRow">
            <td>2</td><td>GRID</td><td>Gridiron Giants</td><td>East</td><td>Bob Jones</td>
          </tr>
          <tr class="ownerRow">
            <td>7</td><td>BLITZ</td><td>Blitz Brigade</td><td></td><td>Ann Lee</td>
          </tr>
        </table>
        </body></html>"#;

    fn extract(html: &str) -> Option<PageData> {
        let registry = ExtractorRegistry::new();
        let document = Html::parse_document(html);
        registry.dispatch("owners", &document).unwrap()
    }

    #[test]
    fn test_three_valid_rows_yield_three_teams_in_order() {
        let teams = extract(OWNERS_PAGE).unwrap().into_teams().unwrap();

        assert_eq!(teams.len(), 3);
        assert_eq!(
            teams.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2, 7]
        );
    }

    #[test]
    fn test_owner_row_fields_by_column_position() {
        let teams = extract(OWNERS_PAGE).unwrap().into_teams().unwrap();

        let team = &teams[0];
        assert_eq!(team.short_name, "HAWK");
        assert_eq!(team.name, "Hawkeye Heroes");
        assert_eq!(team.division.as_deref(), Some("East"));
        assert_eq!(team.owner_name, "Jane Smith");
        assert_eq!(team.record, None);
    }

    #[test]
    fn test_empty_division_cell_is_none() {
        let teams = extract(OWNERS_PAGE).unwrap().into_teams().unwrap();
        assert_eq!(teams[2].division, None);
    }

    #[test]
    fn test_missing_table_is_no_data() {
        let result = extract("<html><body><p>season over</p></body></html>");
        assert!(result.is_none());
    }

    #[test]
    fn test_table_without_owner_rows_is_empty_not_none() {
        let html = r#"<html><body><table class="tableBody">
            <tr class="tableHead"><td>League Members</td></tr>
        </table></body></html>"#;

        let teams = extract(html).unwrap().into_teams().unwrap();
        assert!(teams.is_empty());
    }

    #[test]
    fn test_non_numeric_id_row_is_skipped() {
        let html = r#"<html><body><table class="tableBody">
            <tr class="ownerRow">
              <td>n/a</td><td>X</td><td>X</td><td>X</td><td>X</td>
            </tr>
            <tr class="ownerRow">
              <td>3</td><td>OK</td><td>Okay Team</td><td>West</td><td>Pat Doe</td>
            </tr>
        </table></body></html>"#;

        let teams = extract(html).unwrap().into_teams().unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id, 3);
    }

    #[test]
    fn test_reparsing_is_idempotent() {
        let registry = ExtractorRegistry::new();
        let document = Html::parse_document(OWNERS_PAGE);

        let first = registry.dispatch("owners", &document).unwrap();
        let second = registry.dispatch("owners", &document).unwrap();
        assert_eq!(first, second);
    }
}
