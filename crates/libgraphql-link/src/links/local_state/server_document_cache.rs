use crate::document::QueryDocument;
use crate::document::QueryDocumentData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Weak;

const DEFAULT_CAPACITY: usize = 1000;

struct ServerDocumentEntry {
    source: Weak<QueryDocumentData>,
    server: Option<QueryDocument>,
}

/// The document left to send to a server once `@client` root fields are
/// removed, memoized per source document and operation name.
///
/// Handing out the same [`QueryDocument`] for the same source keeps its
/// identity stable, so links downstream that memoize by document identity
/// (persisted query hashing) see one document rather than a new one per
/// execution. Entries hold the source weakly and are replaced once it is
/// dropped.
pub(crate) struct ServerDocumentCache {
    entries: LruCache<(usize, String), ServerDocumentEntry>,
}
impl ServerDocumentCache {
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub(crate) fn get_or_insert_with(
        &mut self,
        source: &QueryDocument,
        operation_name: &str,
        strip: impl FnOnce() -> Option<QueryDocument>,
    ) -> Option<QueryDocument> {
        let key = (source.identity(), operation_name.to_string());
        if let Some(entry) = self.entries.get(&key)
            && source.is_referenced_by(&entry.source) {
            return entry.server.clone();
        }

        let server = strip();
        self.entries.put(key, ServerDocumentEntry {
            source: source.downgrade(),
            server: server.clone(),
        });
        server
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
impl Default for ServerDocumentCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}
