use crate::api::ApiError;
use crate::models::Record;

/// Outcome of applying a completed fetch to a store.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Items were replaced wholesale; carries the new count.
    Replaced(usize),
    /// The latest fetch failed; stale items are retained.
    Failed(ApiError),
    /// A newer fetch was issued after this one; the completion is dropped.
    Stale,
}

/// Client-side cache of a remote collection plus its loading state.
///
/// Each fetch is tagged with a monotonically increasing token; a completion
/// is applied only when it belongs to the latest issued fetch, so the latest
/// intent wins regardless of arrival order.
#[derive(Debug)]
pub struct CollectionStore<T> {
    pub items: Vec<T>,
    pub loading: bool,
    issued: u64,
}

impl<T: Record> CollectionStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            issued: 0,
        }
    }

    /// Marks a fetch as in flight and returns its fence token.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.issued
    }

    pub fn apply(&mut self, token: u64, result: Result<Vec<T>, ApiError>) -> FetchOutcome {
        if token != self.issued {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                FetchOutcome::Replaced(count)
            }
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Visible subset under the client-side text filter: case-insensitive
    /// substring match on id, recomputed from the in-memory items only.
    pub fn visible(&self, text_filter: &str) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| matches_filter(item.id(), text_filter))
            .collect()
    }
}

impl<T: Record> Default for CollectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn matches_filter(id: &str, text_filter: &str) -> bool {
    id.to_lowercase().contains(&text_filter.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Space;
    use chrono::Utc;
    use serde_json::Value;

    fn space(id: &str) -> Space {
        Space {
            id: id.into(),
            created_at: Utc::now(),
            configs: Value::Null,
        }
    }

    #[test]
    fn empty_filter_shows_everything() {
        let mut store = CollectionStore::new();
        let token = store.begin_fetch();
        store.apply(token, Ok(vec![space("alpha"), space("beta")]));
        assert_eq!(store.visible("").len(), 2);
    }

    #[test]
    fn filter_matches_case_insensitively_and_yields_a_subset() {
        let mut store = CollectionStore::new();
        let token = store.begin_fetch();
        store.apply(
            token,
            Ok(vec![space("Alpha-1"), space("beta-2"), space("ALPHA-3")]),
        );
        let visible = store.visible("alpha");
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|s| s.id.to_lowercase().contains("alpha")));
        assert!(store.visible("xyz").is_empty());
        assert_eq!(store.items.len(), 3);
    }

    #[test]
    fn failed_fetch_retains_stale_items() {
        let mut store = CollectionStore::new();
        let token = store.begin_fetch();
        store.apply(token, Ok(vec![space("alpha")]));

        let token = store.begin_fetch();
        assert!(store.loading);
        let outcome = store.apply(
            token,
            Err(ApiError::Transport("connection refused".into())),
        );
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(!store.loading);
        assert_eq!(store.items.len(), 1);
    }

    #[test]
    fn stale_completion_is_fenced_out() {
        let mut store = CollectionStore::new();
        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // First request arrives after the second was issued: dropped.
        let outcome = store.apply(first, Ok(vec![space("old")]));
        assert!(matches!(outcome, FetchOutcome::Stale));
        assert!(store.loading);
        assert!(store.items.is_empty());

        let outcome = store.apply(second, Ok(vec![space("new")]));
        assert!(matches!(outcome, FetchOutcome::Replaced(1)));
        assert!(!store.loading);
        assert_eq!(store.items[0].id, "new");
    }
}
