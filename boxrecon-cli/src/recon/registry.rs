//! Facility unit registry and name resolution
//!
//! The registry maps normalized match keys to canonical unit names. Entry
//! order is significant: exact-match resolution and the token-joined fuzzy
//! pass both return the first qualifying entry.

use super::similarity::similarity;

/// The production units. Keys are pre-normalized (see [`super::text::normalize`]).
pub const DEFAULT_UNITS: &[(&str, &str)] = &[
    ("cidade nova", "Cidade Nova"),
    ("castelo", "Castelo"),
    ("raja", "Raja"),
    ("buritis", "Buritis"),
    ("nova cachoeirinha", "Nova Cachoeirinha"),
];

/// Ordered mapping from normalized unit key to canonical display name.
///
/// Built once per run and passed explicitly into extraction and the engine.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    units: Vec<(String, String)>,
}

impl LocationRegistry {
    /// Build a registry from ordered `(key, canonical name)` pairs.
    pub fn new(units: impl IntoIterator<Item = (String, String)>) -> Self {
        LocationRegistry {
            units: units.into_iter().collect(),
        }
    }

    /// Registry with the production units.
    pub fn with_default_units() -> Self {
        LocationRegistry::new(
            DEFAULT_UNITS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Canonical names in registry order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(_, name)| name.as_str())
    }

    /// First registry key that is a substring of the candidate.
    pub fn match_exact(&self, candidate: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|(key, _)| candidate.contains(key.as_str()))
            .map(|(_, name)| name.as_str())
    }

    /// Best fuzzy match for the candidate at or above `cutoff`.
    ///
    /// First the whole candidate is scored against every key and the best
    /// qualifying key wins; failing that, the token-joined candidate is
    /// compared per key and the first hit in registry order wins.
    pub fn match_fuzzy(&self, candidate: &str, cutoff: f64) -> Option<&str> {
        let mut best: Option<(f64, &str)> = None;
        for (key, name) in &self.units {
            let score = similarity(candidate, key);
            if score >= cutoff && best.is_none_or(|(top, _)| score > top) {
                best = Some((score, name.as_str()));
            }
        }
        if let Some((_, name)) = best {
            return Some(name);
        }

        let joined = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
        for (key, name) in &self.units {
            if similarity(&joined, key) >= cutoff {
                return Some(name.as_str());
            }
        }
        None
    }

    /// Resolve a normalized candidate: exact substring pass, then fuzzy
    /// fallback at `cutoff`.
    pub fn resolve(&self, candidate: &str, cutoff: f64) -> Option<&str> {
        self.match_exact(candidate)
            .or_else(|| self.match_fuzzy(candidate, cutoff))
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        LocationRegistry::with_default_units()
    }
}
