pub mod conversions;
pub mod dynamodb;
pub mod memory;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::StoreError;
use crate::student::StudentRecord;

pub use dynamodb::DynamoStudentStore;
pub use memory::InMemoryStudentStore;

/// One batch of a full-table read.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<C> {
    pub items: Vec<StudentRecord>,
    /// Present when the store has more items after this page.
    pub next: Option<C>,
}

/// The `Student` collection, whatever holds it.
#[cfg_attr(test, mockall::automock(type Cursor = usize;))]
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Opaque continuation token. Only ever handed back to the same store.
    type Cursor: Send + Sync + 'static;

    /// Reads one page starting after `start`, or from the beginning when `None`.
    async fn scan_page(
        &self,
        start: Option<Self::Cursor>,
    ) -> Result<ScanPage<Self::Cursor>, StoreError>;

    /// Writes `record`, replacing any existing record with the same `id`.
    async fn put_student(&self, record: &StudentRecord) -> Result<(), StoreError>;
}

enum PagerState<C> {
    Start,
    Continue(C),
    Done,
}

/// Walks a store's scan pages in order. Single use: once it returns `None` or
/// an error it stays exhausted.
pub struct Pages<'a, S: StudentStore + ?Sized> {
    store: &'a S,
    state: PagerState<S::Cursor>,
    requests: usize,
}

impl<'a, S: StudentStore + ?Sized> Pages<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            state: PagerState::Start,
            requests: 0,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<StudentRecord>>, StoreError> {
        let start = match std::mem::replace(&mut self.state, PagerState::Done) {
            PagerState::Done => return Ok(None),
            PagerState::Start => None,
            PagerState::Continue(cursor) => Some(cursor),
        };

        self.requests += 1;
        let page = self.store.scan_page(start).await?;
        debug!(
            "Scan request {} returned {} items (more: {})",
            self.requests,
            page.items.len(),
            page.next.is_some()
        );

        if let Some(cursor) = page.next {
            self.state = PagerState::Continue(cursor);
        }
        Ok(Some(page.items))
    }

    /// Drains every remaining page, keeping retrieval order. Records repeated
    /// across pages are kept as returned. The pager stays borrowed so
    /// `requests()` can still be read when a scan fails.
    pub async fn collect_all(&mut self) -> Result<Vec<StudentRecord>, StoreError> {
        let mut records = Vec::new();
        while let Some(items) = self.next_page().await? {
            records.extend(items);
        }
        Ok(records)
    }

    /// Scan requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}
