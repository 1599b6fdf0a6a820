//! Free-text search over the in-memory record list.
//!
//! Search is a case-insensitive substring match, not an index.

use serde::Serialize;

use crate::data::ComparisonRecord;

/// Records whose name, description, category, tags or procurement context
/// contain `query`, in dataset order. A blank query matches nothing.
pub fn search<'a, I>(records: I, query: &str) -> Vec<&'a ComparisonRecord>
where
    I: IntoIterator<Item = &'a ComparisonRecord>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    records
        .into_iter()
        .filter(|r| record_matches(r, &needle))
        .collect()
}

fn record_matches(record: &ComparisonRecord, needle: &str) -> bool {
    [&record.name, &record.description, &record.category, &record.procurement_context]
        .into_iter()
        .chain(record.tags.iter())
        .any(|text| text.to_lowercase().contains(needle))
}

/// Search box state, driven by discrete input events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum SearchState {
    /// Nothing typed
    #[default]
    Idle,
    /// Text typed, not yet submitted
    QueryEntered { query: String },
    /// A submitted query and the ids it matched
    ResultsShown { query: String, ids: Vec<String> },
}

/// Input to the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The text field changed
    Input(String),
    /// The form was submitted
    Submit,
    /// The field was cleared
    Clear,
}

impl SearchState {
    /// Advance the state machine by one event.
    ///
    /// Submitting a blank query returns to `Idle`. Typing after results are
    /// shown starts a new query.
    pub fn apply<'a, I>(self, event: SearchEvent, records: I) -> SearchState
    where
        I: IntoIterator<Item = &'a ComparisonRecord>,
    {
        match (self, event) {
            (_, SearchEvent::Clear) => SearchState::Idle,
            (_, SearchEvent::Input(text)) if text.trim().is_empty() => SearchState::Idle,
            (_, SearchEvent::Input(text)) => SearchState::QueryEntered { query: text },
            (SearchState::QueryEntered { query }, SearchEvent::Submit) => {
                let ids = search(records, &query)
                    .into_iter()
                    .map(|r| r.id.clone())
                    .collect();
                SearchState::ResultsShown {
                    query: query.trim().to_string(),
                    ids,
                }
            }
            (state, SearchEvent::Submit) => state,
        }
    }

    /// The current query text, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::QueryEntered { query } | SearchState::ResultsShown { query, .. } => {
                Some(query)
            }
        }
    }
}
