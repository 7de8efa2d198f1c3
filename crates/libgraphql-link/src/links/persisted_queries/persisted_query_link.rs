use crate::Context;
use crate::Link;
use crate::LinkError;
use crate::JsonMap;
use crate::document::QueryDocument;
use crate::link::Forward;
use crate::link::RequestHandler;
use crate::links::persisted_queries::ErrorPayload;
use crate::links::persisted_queries::PERSISTED_QUERY_VERSION;
use crate::links::persisted_queries::PersistedQueryLinkBuilder;
use crate::links::persisted_queries::hash_cache::HashCache;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use futures::StreamExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;
use serde_json::json;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

pub(crate) type ErrorPredicate = Arc<dyn Fn(&ErrorPayload) -> bool + Send + Sync>;
pub(crate) type GenerateHashFn =
    Arc<dyn Fn(&QueryDocument) -> BoxFuture<'static, Result<String, LinkError>> + Send + Sync>;

struct PersistedQueryState {
    disable: ErrorPredicate,
    enabled: AtomicBool,
    generate_hash: GenerateHashFn,
    hash_cache: Mutex<HashCache>,
    retry: ErrorPredicate,
    use_get_for_hashed_queries: bool,
}
impl PersistedQueryState {
    async fn hash_of(&self, query: &QueryDocument) -> Result<String, LinkError> {
        let hash =
            self.hash_cache
                .lock()
                .get_or_insert_with(query, || (self.generate_hash)(query));

        let result = hash.await;
        if result.is_err() {
            self.hash_cache.lock().remove(query);
        }
        result
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        self.hash_cache.lock().clear();
        tracing::debug!("persisted queries disabled");
    }
}

/// Sends a hash of each operation's document in place of its text.
///
/// On the first attempt the operation carries
/// `extensions.persistedQuery = {version: 1, sha256Hash}` and the transport
/// is asked to omit the query text (context `http.includeQuery = false`).
/// If the server reports that it does not know the hash, the operation is
/// retried once with the full text over POST. If it reports that persisted
/// queries are not supported at all, the link stops hashing for every later
/// operation until [`PersistedQueryLink::enable()`] is called.
///
/// Cloning a [`PersistedQueryLink`] shares its state.
#[derive(Clone)]
pub struct PersistedQueryLink {
    state: Arc<PersistedQueryState>,
}
impl PersistedQueryLink {
    pub fn builder() -> PersistedQueryLinkBuilder {
        PersistedQueryLinkBuilder::new()
    }

    pub(crate) fn new(
        generate_hash: GenerateHashFn,
        disable: ErrorPredicate,
        retry: ErrorPredicate,
        use_get_for_hashed_queries: bool,
        hash_cache_capacity: NonZeroUsize,
    ) -> Self {
        Self {
            state: Arc::new(PersistedQueryState {
                disable,
                enabled: AtomicBool::new(true),
                generate_hash,
                hash_cache: Mutex::new(HashCache::new(hash_cache_capacity)),
                retry,
                use_get_for_hashed_queries,
            }),
        }
    }

    /// Drop every memoized hash.
    pub fn reset_hash_cache(&self) {
        self.state.hash_cache.lock().clear();
    }

    /// Resume sending hashes after the link disabled itself.
    pub fn enable(&self) {
        self.state.enabled.store(true, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::SeqCst)
    }

    /// Number of memoized hashes whose document is still alive.
    pub fn cached_hash_count(&self) -> usize {
        self.state.hash_cache.lock().live_len()
    }

    pub fn into_link(self) -> Link {
        Link::from_handler(self).named("persisted queries")
    }
}

#[inherent::inherent]
impl RequestHandler for PersistedQueryLink {
    pub fn request(
        &self,
        operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>> {
        let state = self.state.clone();
        Some(Observable::new(move || {
            let state = state.clone();
            let forward = forward.clone();
            let mut operation = operation.clone();

            async_stream::stream! {
                let enabled = state.enabled.load(Ordering::SeqCst);
                operation.set_context(Context::new().with("http", json!({
                    "includeQuery": !enabled,
                    "includeExtensions": enabled,
                })));

                let mut original_fetch_options = None;
                if state.use_get_for_hashed_queries
                    && enabled
                    && !operation.query().has_mutations() {
                    operation.update_context(|prev| {
                        let original = fetch_options_of(prev);
                        let mut get = original.clone();
                        get.insert("method".to_string(), json!("GET"));
                        original_fetch_options = Some(original);
                        Context::new().with("fetchOptions", get)
                    });
                }

                if enabled {
                    match state.hash_of(operation.query()).await {
                        Ok(hash) => {
                            operation.extensions_mut().insert(
                                "persistedQuery".to_string(),
                                json!({
                                    "version": PERSISTED_QUERY_VERSION,
                                    "sha256Hash": hash,
                                }),
                            );
                        },
                        Err(err) => {
                            yield Err(err);
                            return;
                        },
                    }
                }

                let mut events = forward.call(operation.clone()).stream();
                let mut decided = false;
                while let Some(event) = events.next().await {
                    if decided {
                        yield event;
                        continue;
                    }

                    let payload = match &event {
                        Ok(result) if result.has_errors() =>
                            ErrorPayload::new(Some(result.clone()), None, operation.clone()),
                        Ok(_) => {
                            yield event;
                            continue;
                        },
                        Err(err) =>
                            ErrorPayload::new(None, Some(err.clone()), operation.clone()),
                    };
                    decided = true;

                    if (state.disable)(&payload) {
                        state.disable();
                    }
                    if !(state.retry)(&payload) {
                        yield event;
                        continue;
                    }

                    let enabled_now = state.enabled.load(Ordering::SeqCst);
                    tracing::debug!(
                        operation_name = operation.operation_name(),
                        not_found = payload.meta.persisted_query_not_found,
                        not_supported = payload.meta.persisted_query_not_supported,
                        "retrying persisted query with the full query text",
                    );
                    let mut post = original_fetch_options
                        .clone()
                        .unwrap_or_else(|| fetch_options_of(&operation.get_context()));
                    post.insert("method".to_string(), json!("POST"));
                    operation.set_context(
                        Context::new()
                            .with("http", json!({
                                "includeQuery": true,
                                "includeExtensions": enabled_now,
                            }))
                            .with("fetchOptions", post),
                    );
                    if !enabled_now {
                        operation.extensions_mut().remove("persistedQuery");
                    }
                    events = forward.call(operation.clone()).stream();
                }
            }
        }))
    }
}
impl From<PersistedQueryLink> for Link {
    fn from(link: PersistedQueryLink) -> Self {
        link.into_link()
    }
}

fn fetch_options_of(context: &Context) -> JsonMap {
    match context.get("fetchOptions") {
        Some(Value::Object(options)) => options.clone(),
        _ => JsonMap::new(),
    }
}
