use crate::LinkError;
use crate::document::QueryDocument;
use crate::document::QueryDocumentData;
use futures::future::BoxFuture;
use futures::future::Shared;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Weak;

pub(crate) type HashFuture = Shared<BoxFuture<'static, Result<String, LinkError>>>;

struct HashCacheEntry {
    document: Weak<QueryDocumentData>,
    hash: HashFuture,
}

/// Memoized document hashes, keyed by document identity.
///
/// Entries hold only a weak reference to their document. An entry whose
/// document was dropped (or whose address now belongs to another document)
/// is treated as absent and replaced on the next lookup, so the cache never
/// keeps a document alive. Capacity is bounded; the least recently used
/// entry is evicted first.
pub(crate) struct HashCache {
    entries: LruCache<usize, HashCacheEntry>,
}
impl HashCache {
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// The memoized hash of `document`, starting `compute` if there is none.
    pub(crate) fn get_or_insert_with(
        &mut self,
        document: &QueryDocument,
        compute: impl FnOnce() -> BoxFuture<'static, Result<String, LinkError>>,
    ) -> HashFuture {
        let key = document.identity();
        if let Some(entry) = self.entries.get(&key)
            && document.is_referenced_by(&entry.document) {
            return entry.hash.clone();
        }

        let hash = futures::FutureExt::shared(compute());
        self.entries.put(key, HashCacheEntry {
            document: document.downgrade(),
            hash: hash.clone(),
        });
        hash
    }

    /// Forget the hash of `document`.
    pub(crate) fn remove(&mut self, document: &QueryDocument) {
        let key = document.identity();
        let refers_to_document =
            self.entries
                .peek(&key)
                .is_some_and(|entry| document.is_referenced_by(&entry.document));
        if refers_to_document {
            self.entries.pop(&key);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries whose document is still alive.
    pub(crate) fn live_len(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.document.strong_count() > 0)
            .count()
    }
}
