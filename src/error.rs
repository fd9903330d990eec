//! Error types for dispatch, transport, and page-level failures.
//!
//! Row-level anomalies (missing markers, empty id cells, non-numeric
//! columns) are absorbed inside the extractors — skipped with a warning or
//! signaled as field-level `None` — and never show up here. What does
//! surface is everything that invalidates a whole call: an unknown page
//! key, a failed request, or a page with no recognizable root structure.

use thiserror::Error;

/// Failure raised by the extraction layer itself.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Dispatch (or fragment delegation) asked for a page key that no
    /// registered extractor claims. Carries every registered key so the
    /// message is usable as a diagnostic.
    #[error("unable to find extractor '{requested}', available extractors -> [{}]", .known.join(", "))]
    UnknownExtractor {
        /// The page key that was requested.
        requested: String,
        /// All registered keys, sorted.
        known: Vec<String>,
    },
}

impl ExtractError {
    pub(crate) fn unknown_extractor(requested: &str, known: Vec<&'static str>) -> Self {
        ExtractError::UnknownExtractor {
            requested: requested.to_string(),
            known: known.into_iter().map(String::from).collect(),
        }
    }
}

/// Failure raised by the fetch+parse client.
#[derive(Debug, Error)]
pub enum Error {
    /// The extraction layer rejected the dispatch.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The HTTP request could not be built or completed.
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    /// A page URL could not be assembled from the base URL.
    #[error("invalid request url")]
    InvalidUrl(#[from] url::ParseError),

    /// The site answered with something other than 200.
    #[error("got unexpected status code '{status}' from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The site answered 200 with an empty body.
    #[error("got unexpected empty body from {url}")]
    EmptyBody { url: String },

    /// The page fetched fine but its root structural marker is missing —
    /// the layout changed, the wrong page came back, or the content is
    /// legitimately empty (e.g. an off-season scoreboard). The site gives
    /// no way to tell these apart.
    #[error("extractor '{page}' found no data in the page")]
    NoData { page: &'static str },

    /// An extractor returned a payload of a kind the page key does not
    /// produce. Unreachable with the built-in registry; possible when a
    /// caller registers a custom extractor under a built-in key.
    #[error("extractor '{page}' returned a payload of the wrong kind")]
    UnexpectedPayload { page: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extractor_message_lists_known_keys() {
        let err = ExtractError::unknown_extractor("nonexistent", vec!["clubhouse", "owners", "scoreboard"]);
        let msg = err.to_string();
        assert!(msg.contains("'nonexistent'"));
        assert!(msg.contains("clubhouse, owners, scoreboard"));
    }

    #[test]
    fn test_status_error_display() {
        let err = Error::UnexpectedStatus {
            status: 404,
            url: "http://games.espn.com/ffl/scoreboard".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "got unexpected status code '404' from http://games.espn.com/ffl/scoreboard"
        );
    }

    #[test]
    fn test_no_data_error_display() {
        let err = Error::NoData { page: "owners" };
        assert_eq!(err.to_string(), "extractor 'owners' found no data in the page");
    }
}
