//! Keyword matching for bookmark searches.
//!
//! Keywords are split on whitespace and lowercased; a record matches when every
//! token matches its search keyword or its site name. A token matches a field
//! as a substring, or fuzzily when the matched characters sit close together,
//! so "sunst" finds "sunset" but "cat" does not find "chocolate". An empty
//! keyword matches everything.

use super::models::ImageRecord;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Extra characters tolerated inside a fuzzy match span.
const MAX_FUZZY_GAP: usize = 1;

/// Compiled keyword query.
pub struct KeywordQuery {
    tokens: Vec<String>,
    matcher: SkimMatcherV2,
}

impl KeywordQuery {
    /// Tokenizes `keyword`.
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        Self {
            tokens: keyword.split_whitespace().map(str::to_lowercase).collect(),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Returns `true` if the query has no tokens and therefore matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tests a single record against the query.
    #[must_use]
    pub fn matches(&self, record: &ImageRecord) -> bool {
        if self.is_empty() {
            return true;
        }

        let keyword = record.keyword.to_lowercase();
        let site = record.display_sitename.to_lowercase();

        self.tokens
            .iter()
            .all(|token| self.matches_field(&keyword, token) || self.matches_field(&site, token))
    }

    /// Substring match, or a fuzzy match whose span leaves at most one extra
    /// character between the matched ones.
    fn matches_field(&self, field: &str, token: &str) -> bool {
        if field.contains(token) {
            return true;
        }

        self.matcher
            .fuzzy_indices(field, token)
            .and_then(|(_, indices)| Some(indices.last()? - indices.first()? + 1))
            .is_some_and(|span| span <= token.chars().count() + MAX_FUZZY_GAP)
    }
}

impl std::fmt::Debug for KeywordQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordQuery")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Returns the records matching `keyword`, preserving their order.
#[must_use]
pub fn filter_records(records: &[ImageRecord], keyword: &str) -> Vec<ImageRecord> {
    let query = KeywordQuery::new(keyword);
    records
        .iter()
        .filter(|record| query.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, keyword: &str, site: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            keyword: keyword.to_string(),
            collection: "blog".to_string(),
            thumbnail_url: String::new(),
            image_url: id.to_string(),
            width: 100,
            height: 100,
            display_sitename: site.to_string(),
            doc_url: String::new(),
            datetime: chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00+09:00").unwrap(),
            saved_at: 0,
        }
    }

    #[test]
    fn empty_keyword_matches_everything() {
        let records = vec![record("a", "cat", "Daum"), record("b", "dog", "Naver")];
        assert_eq!(filter_records(&records, "   ").len(), 2);
    }

    #[test]
    fn matches_keyword_case_insensitively() {
        let records = vec![record("a", "Cat", "Daum"), record("b", "dog", "Naver")];
        let found = filter_records(&records, "CAT");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn matches_site_name() {
        let records = vec![record("a", "cat", "Daum blog"), record("b", "dog", "tistory")];
        let found = filter_records(&records, "tistory");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b");
    }

    #[test]
    fn every_token_must_match() {
        let records = vec![record("a", "cat", "Daum"), record("b", "cat", "Naver")];
        let found = filter_records(&records, "cat naver");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b");
    }

    #[test]
    fn scattered_letters_do_not_match() {
        let records = vec![record("a", "chocolate", "x"), record("b", "cat", "x")];
        let found = filter_records(&records, "cat");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b");
    }

    #[test]
    fn tolerates_a_missing_letter() {
        let records = vec![record("a", "sunset", "x"), record("b", "mountain", "x")];
        let found = filter_records(&records, "sunst");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn preserves_store_order() {
        let records = vec![
            record("c", "cat", "x"),
            record("a", "cat", "x"),
            record("b", "cat", "x"),
        ];
        let ids: Vec<_> = filter_records(&records, "cat")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
