use serde::Deserialize;

use crate::Result;

/// One page of the `appreviews` endpoint, as Steam sends it.
/// Only the fields the scraper reads are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPage {
    /// `1` means the query went through. Anything else (or a missing field) ends pagination.
    #[serde(default)]
    pub success: i64,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
    /// Token for the next page. Steam echoes it even on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ReviewPage {
    pub fn is_success(&self) -> bool {
        self.success == 1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    pub recommendationid: String,
    pub timestamp_created: i64,
    pub voted_up: bool,
    pub review: String,
}

/// A single normalized review, ready to be written out as one CSV line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: String,
    pub timestamp: i64,
    pub vote: bool,
    pub text: String,
}

impl From<RawReview> for ReviewRow {
    fn from(raw: RawReview) -> Self {
        ReviewRow {
            id: raw.recommendationid,
            timestamp: raw.timestamp_created,
            vote: raw.voted_up,
            text: normalize_text(&raw.review),
        }
    }
}

/// Decodes a response body into a `ReviewPage`.
pub(crate) fn parse_page(body: &str) -> Result<ReviewPage> {
    Ok(serde_json::from_str(body)?)
}

/// Replaces every `\r` and `\n` with a space and trims the ends,
/// so a review always fits on one line.
#[inline]
pub fn normalize_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_line_breaks_and_trims() {
        assert_eq!(normalize_text("  great\r\ngame\n"), "great  game");
        assert_eq!(normalize_text("\n\n"), "");
        assert_eq!(normalize_text("a,b \"c\""), "a,b \"c\"");
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = ["", " x ", "one\rtwo\nthree", "\r\n tail \r\n", "no breaks"];
        for input in inputs {
            let once = normalize_text(input);
            let twice = normalize_text(&once);
            assert_eq!(once, twice);
            assert!(!once.contains(['\r', '\n']));
            assert_eq!(once, once.trim());
        }
    }

    #[test]
    fn parse_full_page() {
        let body = r#"{
            "success": 1,
            "query_summary": {"num_reviews": 2},
            "reviews": [
                {"recommendationid": "101", "timestamp_created": 1700000000, "voted_up": true,
                 "review": "Fun\nwith friends", "votes_up": 3},
                {"recommendationid": "102", "timestamp_created": 1700000100, "voted_up": false,
                 "review": "  meh  "}
            ],
            "cursor": "AoJwq+jC"
        }"#;

        let page = parse_page(body).unwrap();
        assert!(page.is_success());
        assert_eq!(page.cursor.as_deref(), Some("AoJwq+jC"));

        let rows: Vec<ReviewRow> = page.reviews.into_iter().map(ReviewRow::from).collect();
        assert_eq!(
            rows,
            vec![
                ReviewRow { id: "101".into(), timestamp: 1700000000, vote: true, text: "Fun with friends".into() },
                ReviewRow { id: "102".into(), timestamp: 1700000100, vote: false, text: "meh".into() },
            ]
        );
    }

    #[test]
    fn parse_failed_page_without_reviews() {
        let page = parse_page(r#"{"success": 2}"#).unwrap();
        assert!(!page.is_success());
        assert!(page.reviews.is_empty());
        assert!(page.cursor.is_none());

        let page = parse_page("{}").unwrap();
        assert!(!page.is_success());
    }

    #[test]
    fn parse_garbage_is_decode_error() {
        let err = parse_page("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }
}
