//! Invoice and albaran listing read path
//!
//! A listing handle queries the documents collection for one `(document
//! type, cif)` pair and keeps display-ready state for the consuming view:
//! a fetching flag, the mapped rows, and an explicit error channel so a
//! failed query is never mistaken for an empty result.

mod row;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::warn;

use crate::error::Error;
use crate::store::Collection;

pub use row::*;

/// Snapshot of the listing state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    /// A fetch is in flight
    pub fetching: bool,

    /// Mapped rows from the last successful fetch; empty until then.
    /// A later failed fetch leaves them in place, so the view can keep
    /// rendering the last good data next to the error.
    pub rows: Vec<DocumentRow>,

    /// Failure of the last completed fetch, if any
    pub error: Option<String>,
}

/// Listing handle for one document type and owner
pub struct DocumentListing {
    documents: Collection,
    doc_type: DocumentType,
    cif: String,
    state: Mutex<ListState>,
    generation: AtomicU64,
}

impl DocumentListing {
    /// Create a new listing handle
    pub(crate) fn new(documents: Collection, doc_type: DocumentType, cif: &str) -> Self {
        Self {
            documents,
            doc_type,
            cif: cif.to_string(),
            state: Mutex::new(ListState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// A snapshot of the current listing state
    pub fn state(&self) -> ListState {
        self.state.lock().unwrap().clone()
    }

    /// Fetch the matching documents and replace the row state
    ///
    /// The whole matching set is retrieved in one call, filtered by the two
    /// equality predicates. Overlapping fetches are safe: each call starts a
    /// new generation and a completion superseded by a newer call is
    /// discarded instead of overwriting newer state.
    pub async fn fetch(&self) -> Result<(), Error> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().unwrap();
            state.fetching = true;
        }

        let result = self.query().await;

        let mut state = self.state.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer fetch owns the state now.
            return result.map(|_| ());
        }

        match &result {
            Ok(rows) => {
                state.rows = rows.clone();
                state.error = None;
            }
            Err(err) => {
                // Rows of the last successful fetch stay in place.
                warn!(
                    doc_type = self.doc_type.as_str(),
                    cif = %self.cif,
                    error = %err,
                    "document listing fetch failed"
                );
                state.error = Some(err.to_string());
            }
        }
        state.fetching = false;

        result.map(|_| ())
    }

    async fn query(&self) -> Result<Vec<DocumentRow>, Error> {
        let raw: Vec<RawDocument> = self
            .documents
            .select()
            .eq("doc_type", self.doc_type.as_str())
            .eq("cif", &self.cif)
            .execute()
            .await?;

        raw.into_iter().map(DocumentRow::try_from).collect()
    }
}
