use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::student::StudentRecord;

use super::{ScanPage, StudentStore};

/// In-process table keyed by `id`, scanned in key order. Test double for the
/// handler tests; the runners always use DynamoDB.
pub struct InMemoryStudentStore {
    records: Mutex<BTreeMap<String, StudentRecord>>,
    page_size: usize,
    scans: AtomicUsize,
    puts: AtomicUsize,
}

impl InMemoryStudentStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            page_size: page_size.max(1),
            scans: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
        }
    }

    pub fn with_records(
        page_size: usize,
        records: impl IntoIterator<Item = StudentRecord>,
    ) -> Self {
        let store = Self::new(page_size);
        {
            let mut map = store.lock();
            for record in records {
                map.insert(record.id.clone(), record);
            }
        }
        store
    }

    pub fn get(&self, id: &str) -> Option<StudentRecord> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn scan_calls(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, StudentRecord>> {
        // a panicking test thread must not hide the data from the others
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryStudentStore {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    /// Offset of the next record in key order.
    type Cursor = usize;

    async fn scan_page(&self, start: Option<usize>) -> Result<ScanPage<usize>, StoreError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let offset = start.unwrap_or(0);
        let records = self.lock();

        let items: Vec<StudentRecord> = records
            .values()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let end = offset + items.len();
        let next = (end < records.len()).then_some(end);

        Ok(ScanPage { items, next })
    }

    async fn put_student(&self, record: &StudentRecord) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.lock().insert(record.id.clone(), record.clone());
        Ok(())
    }
}
