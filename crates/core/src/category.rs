//! Project-idea classification by priority-ordered keyword matching.
//!
//! Categories are scanned in ascending ID order and the first one with a
//! matching keyword wins, so lower IDs take priority when a description
//! mentions several domains ("a web API" is an API, not a web app).

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// ID of the catch-all "Other" category in the default seed.
pub const FALLBACK_CATEGORY_ID: DbId = 5;

/// Default category table, in priority order. Mirrors the seed migration and
/// is used whenever the category store cannot be read.
const DEFAULT_CATEGORIES: &[(DbId, &str, &[&str])] = &[
    (
        1,
        "API",
        &[
            "api",
            "rest",
            "graphql",
            "grpc",
            "endpoint",
            "backend",
            "microservice",
            "server",
        ],
    ),
    (
        2,
        "Web App",
        &[
            "web app", "website", "web", "frontend", "react", "vue", "svelte", "dashboard",
        ],
    ),
    (
        3,
        "CLI Tool",
        &["command line", "command-line", "cli", "terminal", "shell"],
    ),
    (
        4,
        "Mobile",
        &["react native", "mobile", "ios", "android", "flutter", "app"],
    ),
    (FALLBACK_CATEGORY_ID, "Other", &[]),
];

/// A gallery category with its classification keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub keywords: Vec<String>,
}

/// The compiled-in category set.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, keywords)| Category {
            id: *id,
            name: (*name).to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        })
        .collect()
}

/// One scannable category: its ID and lower-cased keywords in supplied order.
#[derive(Debug, Clone)]
struct CategoryRule {
    id: DbId,
    keywords: Vec<String>,
}

/// Classifies free text into a category ID.
///
/// Rules are held as an ordered list rather than a map: iteration order is
/// the priority rule.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    rules: Vec<CategoryRule>,
    fallback_id: DbId,
}

impl CategoryMatcher {
    /// Build a matcher from a category set.
    ///
    /// The fallback is the highest-ID category without keywords (or the
    /// highest ID overall if every category has keywords). An empty set
    /// falls back to [`default_categories`].
    pub fn new(categories: &[Category]) -> Self {
        if categories.is_empty() {
            return Self::with_defaults();
        }

        let fallback_id = categories
            .iter()
            .filter(|c| c.keywords.is_empty())
            .map(|c| c.id)
            .max()
            .or_else(|| categories.iter().map(|c| c.id).max())
            .unwrap_or(FALLBACK_CATEGORY_ID);

        let mut rules: Vec<CategoryRule> = categories
            .iter()
            .filter(|c| c.id != fallback_id)
            .map(|c| CategoryRule {
                id: c.id,
                keywords: c.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        rules.sort_by_key(|r| r.id);

        Self { rules, fallback_id }
    }

    /// Matcher over the compiled-in default categories.
    pub fn with_defaults() -> Self {
        Self::new(&default_categories())
    }

    pub fn fallback_id(&self) -> DbId {
        self.fallback_id
    }

    /// Return the ID of the first category (by ascending ID) with a keyword
    /// present in `text`, or the fallback ID.
    pub fn classify(&self, text: &str) -> DbId {
        if text.is_empty() {
            return self.fallback_id;
        }

        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| keyword_matches(&text, k)))
            .map(|rule| rule.id)
            .unwrap_or(self.fallback_id)
    }
}

/// Phrases match by containment; single tokens only at word boundaries.
fn keyword_matches(text: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    if keyword.contains(' ') {
        return text.contains(keyword);
    }
    matches_whole_word(text, keyword) || matches_at_boundary(text, keyword)
}

/// A whitespace-delimited word, stripped of surrounding punctuation, equals
/// the token.
fn matches_whole_word(text: &str, token: &str) -> bool {
    text.split_whitespace()
        .any(|word| word.trim_matches(|c: char| !c.is_alphanumeric()) == token)
}

/// Some occurrence of the token has no alphanumeric neighbour on either side.
/// Catches joined forms such as `api-server` or `rest_api`.
fn matches_at_boundary(text: &str, token: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = text[from..].find(token) {
        let start = from + pos;
        let end = start + token.len();

        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }

        // Step one character so overlapping occurrences are also checked.
        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}
