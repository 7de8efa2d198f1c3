use crate::LinkError;
use crate::document::QueryDocument;
use crate::links::persisted_queries::ErrorPayload;
use crate::links::persisted_queries::PersistedQueryLink;
use crate::links::persisted_queries::PersistedQueryLinkBuildError;
use crate::links::persisted_queries::sha256_hash;
use crate::links::persisted_queries::persisted_query_link::ErrorPredicate;
use crate::links::persisted_queries::persisted_query_link::GenerateHashFn;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

type Result<T> = std::result::Result<T, PersistedQueryLinkBuildError>;
type Sha256Fn = Arc<dyn Fn(&str) -> String + Send + Sync>;

const DEFAULT_HASH_CACHE_CAPACITY: usize = 2000;

/// Configures a [`PersistedQueryLink`].
///
/// A hash function is required: either [`sha256()`](Self::sha256) (hashing
/// the printed document) or [`generate_hash()`](Self::generate_hash)
/// (hashing the document however it likes). When both are given,
/// `generate_hash` wins.
pub struct PersistedQueryLinkBuilder {
    disable: Option<ErrorPredicate>,
    generate_hash: Option<GenerateHashFn>,
    hash_cache_capacity: usize,
    retry: Option<ErrorPredicate>,
    sha256: Option<Sha256Fn>,
    use_get_for_hashed_queries: bool,
}
impl PersistedQueryLinkBuilder {
    pub fn new() -> Self {
        Self {
            disable: None,
            generate_hash: None,
            hash_cache_capacity: DEFAULT_HASH_CACHE_CAPACITY,
            retry: None,
            sha256: None,
            use_get_for_hashed_queries: false,
        }
    }

    /// Hash the printed query text with `sha256`, which must return the
    /// lowercase hex encoded SHA-256 digest of its input.
    pub fn sha256(mut self, sha256: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.sha256 = Some(Arc::new(sha256));
        self
    }

    /// Use the built-in SHA-256 implementation.
    pub fn use_sha256(self) -> Self {
        self.sha256(sha256_hash)
    }

    /// Compute the hash of a document asynchronously. A failed computation
    /// fails the operation it was computed for and is not memoized.
    pub fn generate_hash<F, Fut>(mut self, generate_hash: F) -> Self
    where
        F: Fn(&QueryDocument) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<String, LinkError>> + Send + 'static,
    {
        self.generate_hash = Some(Arc::new(move |query: &QueryDocument| {
            generate_hash(query).boxed()
        }));
        self
    }

    /// Decide from a failed attempt whether to stop sending hashes for
    /// every future operation. Defaults to "the server does not support
    /// persisted queries".
    pub fn disable(
        mut self,
        disable: impl Fn(&ErrorPayload) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.disable = Some(Arc::new(disable));
        self
    }

    /// Decide from a failed attempt whether to retry it once with the full
    /// query text. Defaults to "the hash was not found, or persisted queries
    /// are not supported".
    pub fn retry(
        mut self,
        retry: impl Fn(&ErrorPayload) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.retry = Some(Arc::new(retry));
        self
    }

    /// Ask the transport to send hashed queries (never mutations) with GET.
    pub fn use_get_for_hashed_queries(mut self, use_get: bool) -> Self {
        self.use_get_for_hashed_queries = use_get;
        self
    }

    /// The maximum number of memoized document hashes. Defaults to 2000.
    pub fn hash_cache_capacity(mut self, capacity: usize) -> Self {
        self.hash_cache_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<PersistedQueryLink> {
        let generate_hash: GenerateHashFn = match (self.generate_hash, self.sha256) {
            (Some(generate_hash), _) => generate_hash,
            (None, Some(sha256)) => Arc::new(move |query: &QueryDocument| {
                let hash: BoxFuture<'static, std::result::Result<String, LinkError>> =
                    futures::future::ready(Ok(sha256(query.print()))).boxed();
                hash
            }),
            (None, None) => return Err(PersistedQueryLinkBuildError::MissingHashFunction),
        };
        let capacity =
            NonZeroUsize::new(self.hash_cache_capacity)
                .ok_or(PersistedQueryLinkBuildError::ZeroHashCacheCapacity)?;

        let disable: ErrorPredicate =
            self.disable.unwrap_or_else(|| Arc::new(not_supported));
        let retry: ErrorPredicate =
            self.retry.unwrap_or_else(|| Arc::new(not_found_or_not_supported));

        Ok(PersistedQueryLink::new(
            generate_hash,
            disable,
            retry,
            self.use_get_for_hashed_queries,
            capacity,
        ))
    }
}
impl Default for PersistedQueryLinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn not_supported(payload: &ErrorPayload) -> bool {
    payload.meta.persisted_query_not_supported
}

fn not_found_or_not_supported(payload: &ErrorPayload) -> bool {
    payload.meta.persisted_query_not_supported || payload.meta.persisted_query_not_found
}
