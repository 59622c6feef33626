//! Search query to category predicate encoding.

use crate::error::FilterError;

/// Separator between category terms in a search query.
const TERM_SEPARATOR: char = '+';

/// Characters that would break a textual array literal in a backend.
const FORBIDDEN: &[char] = &['{', '}', ',', '"', '\\'];

/// A category-membership predicate.
///
/// An entry matches when its category set contains every term. The empty
/// predicate matches everything.
///
/// # Example
///
/// ```
/// use hopper_core::CategoryPredicate;
///
/// let predicate = CategoryPredicate::encode("+Cat1+cat2").unwrap();
/// assert_eq!(predicate.categories(), ["cat1", "cat2"]);
/// assert!(CategoryPredicate::encode("").unwrap().is_match_all());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CategoryPredicate {
    categories: Vec<String>,
}

impl CategoryPredicate {
    /// A predicate that matches every entry.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Encode a raw search query.
    ///
    /// Terms are separated by `+`, trimmed and lowercased. Duplicates
    /// collapse. A blank query means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when the query has separators but no terms,
    /// or when a term holds a character the stores cannot match on.
    pub fn encode(search: &str) -> Result<Self, FilterError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(Self::match_all());
        }

        let mut categories: Vec<String> = Vec::new();
        for term in search.split(TERM_SEPARATOR) {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            if let Some(c) = term.chars().find(|c| FORBIDDEN.contains(c) || c.is_control()) {
                return Err(FilterError::InvalidTerm {
                    term: term.to_string(),
                    reason: format!("character {:?} is not allowed", c),
                });
            }

            let term = term.to_lowercase();
            if !categories.contains(&term) {
                categories.push(term);
            }
        }

        if categories.is_empty() {
            return Err(FilterError::Empty {
                query: search.to_string(),
            });
        }

        Ok(Self { categories })
    }

    /// Returns true if this predicate places no constraint.
    pub fn is_match_all(&self) -> bool {
        self.categories.is_empty()
    }

    /// The lowercased categories an entry must carry.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Check a category set against this predicate, ignoring case.
    pub fn matches<S: AsRef<str>>(&self, entry_categories: &[S]) -> bool {
        self.categories.iter().all(|required| {
            entry_categories
                .iter()
                .any(|c| c.as_ref().to_lowercase() == *required)
        })
    }
}
