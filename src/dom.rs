//! DOM and text helpers shared by the page extractors.
//!
//! The extraction rules lean on three kinds of structural knowledge:
//! fixed column positions, class-attribute markers, and `id`-attribute
//! templates. The helpers here keep the extractors themselves close to
//! the shape of those rules: collect the cells once, address them by
//! index, and turn cell text into numbers without ever coercing a parse
//! failure into a zero.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// All text of an element (descendants included), whitespace-trimmed.
pub(crate) fn collected_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// True when the element's `class` attribute contains `marker` as a
/// substring. Row classification on these pages is substring-based: a
/// header row's class is e.g. `playerTableBgRowHead tableHead`.
pub(crate) fn class_contains(element: ElementRef<'_>, marker: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|class| class.contains(marker))
}

/// Text of the cell at `index` (0-based), or an empty string when the row
/// has fewer cells. Columns on these pages are addressed by position, not
/// header name; a short row reads as empty cells rather than a panic.
pub(crate) fn cell_text(cells: &[ElementRef<'_>], index: usize) -> String {
    cells.get(index).map(|cell| collected_text(*cell)).unwrap_or_default()
}

/// Text of the first element under `scope` matching `selector`, or an
/// empty string when nothing matches.
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope.select(selector).next().map(collected_text).unwrap_or_default()
}

/// First descendant of `scope` whose `id` attribute equals `id`.
///
/// The scoreboard's scoring-details block addresses per-team values by
/// interpolated element ids (`team_ip_4`, `team_pmr_4`, ...); walking the
/// subtree keeps that lookup free of dynamic selector parsing.
pub(crate) fn element_by_id<'a>(scope: ElementRef<'a>, id: &str) -> Option<ElementRef<'a>> {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().attr("id") == Some(id))
}

/// Parse trimmed text as a number; `None` for anything non-numeric.
pub(crate) fn parse_num<T: FromStr>(text: &str) -> Option<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// First run of ASCII digits in the text, e.g. `"3rd"` -> `3`.
pub(crate) fn leading_digit_run(text: &str) -> Option<u32> {
    DIGIT_RUN.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Trim surrounding whitespace and parentheses, e.g. `"(5-2-0)"` -> `"5-2-0"`.
pub(crate) fn trim_parens(text: &str) -> String {
    text.trim().trim_matches(|c| c == '(' || c == ')').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_element<'a>(document: &'a Html, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_collected_text_joins_descendants() {
        // Table elements outside a <table> get dropped by the HTML5
        // fragment parser, so tests go through full documents.
        let document =
            Html::parse_document("<table><tr><td>  Smith, <em>NE</em> QB </td></tr></table>");
        let cell = first_element(&document, "td");
        assert_eq!(collected_text(cell), "Smith, NE QB");
    }

    #[test]
    fn test_class_contains_is_substring_match() {
        let document = Html::parse_document(
            r#"<table><tr class="playerTableBgRowHead tableHead"><td></td></tr></table>"#,
        );
        let row = first_element(&document, "tr");
        assert!(class_contains(row, "tableHead"));
        assert!(!class_contains(row, "pncPlayerRow"));
    }

    #[test]
    fn test_cell_text_out_of_range_is_empty() {
        let document = Html::parse_document("<table><tr><td>only</td></tr></table>");
        let row = first_element(&document, "tr");
        let cells: Vec<_> = row.select(&Selector::parse("td").unwrap()).collect();
        assert_eq!(cell_text(&cells, 0), "only");
        assert_eq!(cell_text(&cells, 5), "");
    }

    #[test]
    fn test_element_by_id_finds_nested_element() {
        let document =
            Html::parse_document(r#"<div><span><b id="team_ip_4">2</b></span></div>"#);
        let scope = first_element(&document, "div");
        let found = element_by_id(scope, "team_ip_4").unwrap();
        assert_eq!(collected_text(found), "2");
        assert!(element_by_id(scope, "team_ip_9").is_none());
    }

    #[test]
    fn test_parse_num_rejects_placeholders() {
        assert_eq!(parse_num::<f32>(" 12.5 "), Some(12.5));
        assert_eq!(parse_num::<f32>("-1.4"), Some(-1.4));
        assert_eq!(parse_num::<u32>("17"), Some(17));
        assert_eq!(parse_num::<f32>("--"), None);
        assert_eq!(parse_num::<u32>(""), None);
    }

    #[test]
    fn test_leading_digit_run() {
        assert_eq!(leading_digit_run("3rd"), Some(3));
        assert_eq!(leading_digit_run("16th"), Some(16));
        assert_eq!(leading_digit_run("--"), None);
    }

    #[test]
    fn test_trim_parens() {
        assert_eq!(trim_parens("(5-2-0)"), "5-2-0");
        assert_eq!(trim_parens(" (GB) "), "GB");
        assert_eq!(trim_parens("plain"), "plain");
    }
}
