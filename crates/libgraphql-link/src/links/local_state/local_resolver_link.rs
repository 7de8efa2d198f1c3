use crate::JsonMap;
use crate::Link;
use crate::LinkError;
use crate::document::ClientRootField;
use crate::document::graphql_value_to_json;
use crate::link::Forward;
use crate::link::RequestHandler;
use crate::links::local_state::LocalResolverArgs;
use crate::links::local_state::projection;
use crate::links::local_state::server_document_cache::ServerDocumentCache;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::ExecutionResult;
use crate::result::FetchResult;
use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

type ResolverFn =
    Arc<dyn Fn(LocalResolverArgs) -> BoxFuture<'static, Result<Value, String>> + Send + Sync>;

/// Resolves root fields marked `@client` on the client.
///
/// Resolvers are registered per root type and field name. A `@client` field
/// without a resolver resolves to `null`. When an operation also selects
/// server fields, the `@client` fields are removed from the document before
/// it is forwarded and their values are merged into every result that
/// carries data. The forwarded document is built once per source document,
/// so repeated executions forward the same document.
#[derive(Clone, Default)]
pub struct LocalResolverLink {
    resolvers: IndexMap<(String, String), ResolverFn>,
    server_documents: Arc<Mutex<ServerDocumentCache>>,
}
impl LocalResolverLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resolve` for `field_name` on the root type `type_name`
    /// (`Query`, `Mutation` or `Subscription`).
    pub fn resolver<F, Fut, E>(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolve: F,
    ) -> Self
    where
        F: Fn(LocalResolverArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        E: Display,
    {
        let resolve: ResolverFn = Arc::new(move |args: LocalResolverArgs| {
            let resolved = resolve(args);
            async move {
                resolved.await.map_err(|err| err.to_string())
            }.boxed()
        });
        self.resolvers.insert((type_name.into(), field_name.into()), resolve);
        self
    }

    pub fn into_link(self) -> Link {
        Link::from_handler(self).named("local resolvers")
    }

    async fn resolve_fields(
        &self,
        operation: &Operation,
        fields: &[ClientRootField],
    ) -> Result<JsonMap, LinkError> {
        let root_type = operation.operation_kind().root_type_name();
        let context = operation.get_context();
        let variables = operation.variables();

        let resolutions = fields.iter().map(|field| {
            let key = (root_type.to_string(), field.field_name.clone());
            let resolver = self.resolvers.get(&key).cloned();
            let args = LocalResolverArgs {
                arguments: field.arguments.iter()
                    .map(|(name, value)| (name.clone(), graphql_value_to_json(value, variables)))
                    .collect(),
                context: context.clone(),
                field_name: field.field_name.clone(),
                operation_name: operation.operation_name().to_string(),
                variables: variables.clone(),
            };
            async move {
                let Some(resolver) = resolver else {
                    tracing::trace!(field = %format!("{}.{}", key.0, key.1), "no local resolver");
                    return Ok(Value::Null);
                };
                resolver(args).await.map_err(|message| LinkError::LocalResolver {
                    field: format!("{}.{}", key.0, key.1),
                    message,
                })
            }
        });
        let resolved = futures::future::try_join_all(resolutions).await?;

        let fragments = operation.query().fragments();
        Ok(fields.iter().zip(resolved).map(|(field, value)| {
            let value = projection::project(value, &field.selection_set, &fragments);
            (field.response_key.clone(), value)
        }).collect())
    }
}

#[inherent::inherent]
impl RequestHandler for LocalResolverLink {
    pub fn request(
        &self,
        operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>> {
        let operation_name = Some(operation.operation_name());
        let fields = operation.query().client_root_fields(operation_name);
        if fields.is_empty() {
            return Some(forward.call(operation));
        }

        let server_query =
            self.server_documents.lock().get_or_insert_with(
                operation.query(),
                operation.operation_name(),
                || operation.query().without_client_root_fields(operation_name),
            );
        let server_operation =
            server_query
                .map(|query| {
                    let mut server_operation = operation.clone();
                    server_operation.set_query(query);
                    server_operation
                });
        let fields = Arc::new(fields);
        let link = self.clone();

        Some(Observable::new(move || {
            let fields = fields.clone();
            let forward = forward.clone();
            let link = link.clone();
            let operation = operation.clone();
            let server_operation = server_operation.clone();

            async_stream::stream! {
                let local = match link.resolve_fields(&operation, &fields).await {
                    Ok(local) => local,
                    Err(err) => {
                        yield Err(err);
                        return;
                    },
                };

                let Some(server_operation) = server_operation else {
                    let result: FetchResult = ExecutionResult::from_data(Value::Object(local)).into();
                    yield Ok(result);
                    return;
                };

                let mut results = forward.call(server_operation).stream();
                while let Some(event) = results.next().await {
                    match event {
                        Ok(mut result) => {
                            result.merge_root_data(&local);
                            yield Ok(result);
                        },
                        Err(err) => {
                            yield Err(err);
                            return;
                        },
                    }
                }
            }
        }))
    }
}
impl From<LocalResolverLink> for Link {
    fn from(link: LocalResolverLink) -> Self {
        link.into_link()
    }
}
