use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// A persisted entity governed by one schema.
///
/// Implementors describe how the generic store and projector see them: the
/// unique key, the status used by the status filter, and the text matched by
/// free-text search.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Status: Copy + Eq + Debug + Send + Sync + 'static;

    /// Placeholder shown when a projection has no rows.
    const EMPTY_MESSAGE: &'static str;

    fn key(&self) -> &str;

    fn status(&self) -> Self::Status;

    /// Concatenation of the searchable fields.
    fn search_text(&self) -> String;
}
