//! Page extractors for turning fetched league pages into typed records.
//!
//! Each page the site serves gets one extractor, registered under the page
//! key the client dispatches on:
//!
//! | Page key | Module | Produces | Notes |
//! |----------|--------|----------|-------|
//! | `owners` | [`owners`] | `Vec<Team>` | League member table |
//! | `clubhouse` | [`clubhouse`] | `Roster` | Starters/bench state machine |
//! | `scoreboard` | [`scoreboard`] | `Vec<Matchup>` | Positional home/away rows |
//!
//! # Common Patterns
//!
//! Extractors encode the pages' brittle structural knowledge on purpose:
//! columns are addressed by ordinal position, rows are classified by
//! class-attribute substrings, and home/away is a row-order convention.
//! Tests pin that layout against fixtures of the real pages; if the site
//! reorders columns the fixtures are the only warning anyone gets.
//!
//! Every extractor:
//! - returns `Ok(None)` when the page's root structural marker is absent
//!   (distinct from an empty result set)
//! - skips malformed rows with a `tracing` warning instead of failing the
//!   whole page
//! - reads from an [`ExtractContext`] and may delegate a sub-tree to
//!   another registered extractor via [`ExtractContext::extract_fragment`]

pub mod clubhouse;
pub mod owners;
pub mod scoreboard;

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;
use crate::models::{Matchup, Roster, Team};

/// A named extractor for one page of the site.
///
/// Implementations hold no per-call state; `extract` is a pure function of
/// the context, so one instance serves concurrent dispatches.
pub trait PageExtractor: Send + Sync {
    /// The page key this extractor is registered under.
    fn name(&self) -> &'static str;

    /// Run the extraction against `cx`'s scope.
    ///
    /// `Ok(None)` means the page's root structural marker was absent —
    /// the layout changed or the page is legitimately empty.
    fn extract(&self, cx: &ExtractContext<'_>) -> Result<Option<PageData>, ExtractError>;
}

/// Typed result of a dispatch, one variant per page key.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    /// Owners page: every team in the league, in row order.
    Teams(Vec<Team>),
    /// Clubhouse page: one team's weekly roster.
    Roster(Roster),
    /// Scoreboard page: the week's matchups, in block order.
    Matchups(Vec<Matchup>),
}

impl PageData {
    /// The teams payload, if this is one.
    pub fn into_teams(self) -> Option<Vec<Team>> {
        match self {
            PageData::Teams(teams) => Some(teams),
            _ => None,
        }
    }

    /// The roster payload, if this is one.
    pub fn into_roster(self) -> Option<Roster> {
        match self {
            PageData::Roster(roster) => Some(roster),
            _ => None,
        }
    }

    /// The matchups payload, if this is one.
    pub fn into_matchups(self) -> Option<Vec<Matchup>> {
        match self {
            PageData::Matchups(matchups) => Some(matchups),
            _ => None,
        }
    }
}

/// Name-to-extractor mapping, built once and read-only afterwards.
///
/// [`ExtractorRegistry::new`] registers the three built-in page extractors
/// explicitly; there is no runtime discovery. The registry is safe to
/// share across threads — dispatch never mutates it.
pub struct ExtractorRegistry {
    extractors: HashMap<&'static str, Box<dyn PageExtractor>>,
}

impl ExtractorRegistry {
    /// Registry with the three built-in page extractors.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(owners::OwnersExtractor));
        registry.register(Box::new(clubhouse::ClubhouseExtractor));
        registry.register(Box::new(scoreboard::ScoreboardExtractor));
        registry
    }

    /// Registry with no extractors; useful for tests and custom stacks.
    pub fn empty() -> Self {
        ExtractorRegistry {
            extractors: HashMap::new(),
        }
    }

    /// Register `extractor` under its own name, replacing any previous
    /// extractor with that name.
    pub fn register(&mut self, extractor: Box<dyn PageExtractor>) {
        self.extractors.insert(extractor.name(), extractor);
    }

    /// All registered page keys, sorted for stable diagnostics.
    pub fn known_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.extractors.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    fn get(&self, name: &str) -> Option<&dyn PageExtractor> {
        self.extractors.get(name).map(Box::as_ref)
    }

    /// Look up `name` and run it against the whole document.
    pub fn dispatch(
        &self,
        name: &str,
        document: &Html,
    ) -> Result<Option<PageData>, ExtractError> {
        let extractor = self
            .get(name)
            .ok_or_else(|| ExtractError::unknown_extractor(name, self.known_keys()))?;
        extractor.extract(&ExtractContext::new(self, document.root_element()))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        ExtractorRegistry::new()
    }
}

/// One extractor invocation's view of the document.
///
/// Carries nothing but the element scope the extractor may read and an
/// immutable reference to the registry it can delegate to; creating one
/// is cheap enough to do per fragment.
pub struct ExtractContext<'a> {
    registry: &'a ExtractorRegistry,
    scope: ElementRef<'a>,
}

impl<'a> ExtractContext<'a> {
    fn new(registry: &'a ExtractorRegistry, scope: ElementRef<'a>) -> Self {
        ExtractContext { registry, scope }
    }

    /// Elements under this context's scope matching `selector`, in
    /// document order.
    pub fn select<'s>(&self, selector: &'s Selector) -> scraper::element_ref::Select<'a, 's> {
        self.scope.select(selector)
    }

    /// The element this context is scoped to.
    pub fn scope(&self) -> ElementRef<'a> {
        self.scope
    }

    /// Look up `name` in the registry and run it against a new context
    /// scoped to `sub_scope`.
    ///
    /// This is how an extractor delegates part of its region to another
    /// named extractor without ever holding mutable parser state.
    pub fn extract_fragment(
        &self,
        name: &str,
        sub_scope: ElementRef<'a>,
    ) -> Result<Option<PageData>, ExtractError> {
        let extractor = self
            .registry
            .get(name)
            .ok_or_else(|| ExtractError::unknown_extractor(name, self.registry.known_keys()))?;
        extractor.extract(&ExtractContext::new(self.registry, sub_scope))
    }
}
