//! Plugin Registry
//!
//! Built once, then shared read-only between evaluations. Lookup is by
//! exact name: `C` (binomial) and `c` are different functions.

use crate::{EvaluationState, FunctionMeta, FunctionPlugin};
use quotient_core::{EvalError, Value};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

/// Central plugin registry
pub struct PluginRegistry {
    /// Every name and alias
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
    /// Canonical names in registration order
    canonical: Vec<&'static str>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self { functions: HashMap::new(), canonical: Vec::new() }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let meta = f.meta();
        let plugin: Arc<dyn FunctionPlugin> = Arc::new(f);
        for name in meta.names() {
            if self.functions.insert(name.to_string(), plugin.clone()).is_some() {
                tracing::debug!(name, "function replaced");
            }
        }
        self.canonical.retain(|existing| *existing != meta.name);
        self.canonical.push(meta.name);
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of distinct functions, not counting aliases.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    pub fn call_function(
        &self,
        name: &str,
        name_range: Range<usize>,
        state: &EvaluationState,
    ) -> Result<Value, EvalError> {
        match self.get_function(name) {
            Some(f) => {
                tracing::trace!(name, arguments = state.argument_count(), "dispatch");
                f.call(state)
            }
            None => Err(self.unknown_function(name, name_range)),
        }
    }

    /// Unknown-function error, with the closest names as a suggestion.
    pub fn unknown_function(&self, name: &str, range: Range<usize>) -> EvalError {
        let similar = self.find_similar_functions(name);
        let err = EvalError::unknown_function(name, range);
        if similar.is_empty() {
            return err;
        }
        let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
        err.with_suggestion(format!("Similar: {}", suggestions.join(", ")))
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, &func_name.to_lowercase());
                (score >= 15).then(|| (func_name.clone(), score))
            })
            .collect();

        // Highest score first, then alphabetical for stable output
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Calculate similarity score between two strings
    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        // Exact prefix match is best
        if candidate.starts_with(query) {
            score += 100;
        }
        // Contains the query
        else if candidate.contains(query) {
            score += 50;
        }
        // Query contains the candidate
        else if candidate.chars().count() > 2 && query.contains(candidate) {
            score += 30;
        }

        // Count shared characters
        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        // Penalize length difference
        let len_diff = query.chars().count().abs_diff(candidate.chars().count());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    // ========== Introspection ==========

    /// Metadata of every function, sorted by name, optionally one category.
    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        let mut metas: Vec<FunctionMeta> = self
            .canonical
            .iter()
            .filter_map(|name| self.get_function(name))
            .map(|f| f.meta())
            .filter(|meta| category.map_or(true, |c| meta.category == c))
            .collect();
        metas.sort_by(|a, b| a.name.cmp(b.name));
        metas
    }

    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> =
            self.list_functions(None).iter().map(|meta| meta.category).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn help(&self, name: Option<&str>) -> serde_json::Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> serde_json::Value {
        match self.get_function(name) {
            Some(f) => {
                let meta = f.meta();
                json!({
                    "name": meta.name,
                    "aliases": meta.aliases,
                    "description": meta.description,
                    "usage": meta.usage,
                    "arguments": meta.arity.to_string(),
                    "category": meta.category,
                    "examples": meta.examples,
                })
            }
            None => {
                let err = self.unknown_function(name, 0..name.chars().count());
                json!({ "error": err.to_string() })
            }
        }
    }

    fn general_help(&self) -> serde_json::Value {
        let mut by_category: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for meta in self.list_functions(None) {
            by_category.entry(meta.category).or_default().push(meta.name);
        }
        json!({
            "functions": by_category,
            "usage": "Call help with a function name for details.",
        })
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry").field("functions", &self.canonical).finish()
    }
}
