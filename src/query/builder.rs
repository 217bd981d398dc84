//! Catalog query construction from raw request parameters.
//!
//! Turns the untyped query string of `GET /products` into a MongoDB filter
//! document plus a pagination window. The filter document is built once and
//! shared by the page fetch and the match count, so the count always reflects
//! the full filtered set regardless of the requested page.

use std::collections::BTreeMap;
use std::collections::HashMap;

use mongodb::bson::{Bson, Document};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DEFAULT_PAGE_NUMBER, RESULTS_PER_PAGE};

/// Raw query string parameters, as extracted from the request.
pub type RawParams = BTreeMap<String, String>;

/// Parameters that drive search or pagination and never become field filters.
const RESERVED_PARAMS: &[&str] = &["keyword", "page", "limit"];

/// Allow-list translating `field[op]` suffixes to MongoDB operators.
/// Anything outside this table is discarded rather than forwarded.
static COMPARISON_OPERATORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("gt", "$gt"),
        ("gte", "$gte"),
        ("lt", "$lt"),
        ("lte", "$lte"),
    ])
});

/// Matches bracketed operator keys such as `price[gte]`.
static OPERATOR_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\[([A-Za-z]+)\]$").expect("operator key pattern")
});

/// Composable catalog query.
///
/// `search`, `filter` and `paginate` each narrow the query independently and
/// may be chained in any order.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    filter: Document,
    skip: u64,
    limit: Option<i64>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply all three narrowing steps from one parameter map.
    pub fn from_params(params: &RawParams) -> Self {
        Self::new().search(params).filter(params).paginate(params)
    }

    /// Keyword search: case-insensitive partial match on the product name.
    ///
    /// The keyword is escaped so regex metacharacters in user input match
    /// literally. Absent or empty keywords leave the query untouched.
    pub fn search(mut self, params: &RawParams) -> Self {
        if let Some(keyword) = params.get("keyword").filter(|k| !k.is_empty()) {
            let mut pattern = Document::new();
            pattern.insert("$regex", regex::escape(keyword));
            pattern.insert("$options", "i");
            self.filter.insert("name", pattern);
        }
        self
    }

    /// Field filtering from the remaining parameters.
    ///
    /// Bare keys become equality matches. Keys of the form `field[op]` are
    /// translated through the comparison allow-list; unknown suffixes drop
    /// the parameter entirely. Comparison values must parse as numbers, and
    /// a value that does not parse yields a clause matching no documents.
    pub fn filter(mut self, params: &RawParams) -> Self {
        for (key, value) in params {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                continue;
            }

            match parse_operator_key(key) {
                Some((field, op)) => {
                    let Some(mongo_op) = COMPARISON_OPERATORS.get(op) else {
                        continue;
                    };
                    let clause = match value.parse::<f64>() {
                        Ok(number) => (*mongo_op, Bson::Double(number)),
                        Err(_) => ("$in", Bson::Array(Vec::new())),
                    };
                    self.comparison(field, clause.0, clause.1);
                }
                None => {
                    self.filter.insert(key.as_str(), value.as_str());
                }
            }
        }
        self
    }

    /// Fixed-size pagination window.
    ///
    /// Pages are 1-indexed; missing, unparsable or zero page numbers fall
    /// back to the first page. Only the window moves, the filter document is
    /// untouched so match counts stay page-independent.
    pub fn paginate(mut self, params: &RawParams) -> Self {
        let page = params
            .get("page")
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE_NUMBER);

        self.skip = RESULTS_PER_PAGE as u64 * (page - 1);
        self.limit = Some(RESULTS_PER_PAGE);
        self
    }

    /// Filter document for both the page fetch and the match count.
    pub fn filter_doc(&self) -> Document {
        self.filter.clone()
    }

    /// Documents skipped before the current page.
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Page size, when pagination was applied.
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Merge a comparison clause into the field's operator sub-document, so
    /// `price[gte]` and `price[lte]` land under one `price` key.
    fn comparison(&mut self, field: &str, mongo_op: &str, value: Bson) {
        match self.filter.get_document_mut(field) {
            Ok(subdoc) => {
                subdoc.insert(mongo_op, value);
            }
            Err(_) => {
                let mut subdoc = Document::new();
                subdoc.insert(mongo_op, value);
                self.filter.insert(field, subdoc);
            }
        }
    }
}

/// Split `field[op]` keys; plain keys return `None`.
fn parse_operator_key(key: &str) -> Option<(&str, &str)> {
    let captures = OPERATOR_KEY.captures(key)?;
    let field = captures.get(1)?;
    let op = captures.get(2)?;
    Some((
        &key[field.start()..field.end()],
        &key[op.start()..op.end()],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn keyword_becomes_case_insensitive_name_regex() {
        let query = ProductQuery::new().search(&params(&[("keyword", "laptop")]));
        let filter = query.filter_doc();
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "laptop");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn keyword_metacharacters_match_literally() {
        let query = ProductQuery::new().search(&params(&[("keyword", "usb-c (2m)")]));
        let filter = query.filter_doc();
        let pattern = filter
            .get_document("name")
            .unwrap()
            .get_str("$regex")
            .unwrap();
        assert_eq!(pattern, regex::escape("usb-c (2m)"));
    }

    #[test]
    fn empty_keyword_is_ignored() {
        let query = ProductQuery::new().search(&params(&[("keyword", "")]));
        assert!(query.filter_doc().is_empty());
    }

    #[test]
    fn reserved_params_never_become_field_filters() {
        let query = ProductQuery::new().filter(&params(&[
            ("keyword", "mouse"),
            ("page", "2"),
            ("limit", "50"),
            ("category", "Electronics"),
        ]));
        let filter = query.filter_doc();
        assert!(filter.get("keyword").is_none());
        assert!(filter.get("page").is_none());
        assert!(filter.get("limit").is_none());
        assert_eq!(filter.get_str("category").unwrap(), "Electronics");
    }

    #[test]
    fn operator_suffixes_merge_under_one_field() {
        let query = ProductQuery::new().filter(&params(&[
            ("price[gte]", "100"),
            ("price[lte]", "500"),
        ]));
        let filter = query.filter_doc();
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 100.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 500.0);
    }

    #[test]
    fn unknown_operator_suffix_drops_the_parameter() {
        let query = ProductQuery::new().filter(&params(&[("price[regex]", ".*")]));
        assert!(query.filter_doc().get("price").is_none());
    }

    #[test]
    fn bare_keys_filter_by_equality() {
        let query = ProductQuery::new().filter(&params(&[("category", "Laptop")]));
        assert_eq!(query.filter_doc().get_str("category").unwrap(), "Laptop");
    }

    #[test]
    fn unparsable_comparison_value_matches_nothing() {
        let query = ProductQuery::new().filter(&params(&[("price[gt]", "cheap")]));
        let filter = query.filter_doc();
        let clause = filter.get_document("price").unwrap();
        assert_eq!(clause.get_array("$in").unwrap().len(), 0);
    }

    #[test]
    fn pagination_window_is_fixed_size_and_one_indexed() {
        let third = ProductQuery::new().paginate(&params(&[("page", "3")]));
        assert_eq!(third.skip(), 18);
        assert_eq!(third.limit(), Some(RESULTS_PER_PAGE));

        let first = ProductQuery::new().paginate(&params(&[]));
        assert_eq!(first.skip(), 0);

        let zero = ProductQuery::new().paginate(&params(&[("page", "0")]));
        assert_eq!(zero.skip(), 0);

        let garbage = ProductQuery::new().paginate(&params(&[("page", "two")]));
        assert_eq!(garbage.skip(), 0);
    }

    #[test]
    fn pagination_leaves_the_filter_untouched() {
        let raw = params(&[("keyword", "desk"), ("price[lt]", "300"), ("page", "4")]);
        let unpaged = ProductQuery::new().search(&raw).filter(&raw);
        let paged = ProductQuery::new().search(&raw).filter(&raw).paginate(&raw);
        assert_eq!(unpaged.filter_doc(), paged.filter_doc());
    }

    #[test]
    fn narrowing_steps_compose_in_any_order() {
        let raw = params(&[
            ("keyword", "chair"),
            ("category", "Furniture"),
            ("price[gte]", "50"),
            ("page", "2"),
        ]);
        let forward = ProductQuery::new().search(&raw).filter(&raw).paginate(&raw);
        let reversed = ProductQuery::new().paginate(&raw).filter(&raw).search(&raw);

        // Key-wise comparison: document equality is insertion-order sensitive
        let (a, b) = (forward.filter_doc(), reversed.filter_doc());
        assert_eq!(a.len(), b.len());
        for key in ["name", "category", "price"] {
            assert_eq!(a.get(key), b.get(key), "clause mismatch on {}", key);
        }
        assert_eq!(forward.skip(), reversed.skip());
        assert_eq!(forward.limit(), reversed.limit());
    }
}
