use crate::Context;
use crate::JsonMap;
use crate::document::OperationKind;
use crate::document::QueryDocument;
use crate::operation::ExecuteContext;
use crate::request::GraphQLRequest;
use parking_lot::Mutex;
use std::sync::Arc;

/// A single GraphQL request as it travels through a link chain.
///
/// An [`Operation`] is created once per call to [`execute()`](crate::execute)
/// and owned by whichever link currently holds it. Links may rewrite its
/// variables, extensions or document before forwarding it.
///
/// The operation's [`Context`] lives in a cell that is shared by every clone
/// of the operation: a context update made by one link is visible to every
/// link downstream of it and to code holding an earlier clone.
#[derive(Clone)]
pub struct Operation {
    context: Arc<Mutex<Context>>,
    execute_context: ExecuteContext,
    extensions: JsonMap,
    operation_name: String,
    query: QueryDocument,
    variables: JsonMap,
}
impl Operation {
    /// Create an operation from a request. Missing variables and extensions
    /// default to empty maps; a missing operation name is taken from the
    /// first named operation in the document (or left empty).
    pub fn from_request(
        request: GraphQLRequest,
        execute_context: ExecuteContext,
    ) -> Self {
        let GraphQLRequest {
            context,
            extensions,
            operation_name,
            query,
            variables,
        } = request;

        let operation_name =
            operation_name
                .filter(|name| !name.is_empty())
                .or_else(|| query.operation_name().map(str::to_string))
                .unwrap_or_default();

        Self {
            context: Arc::new(Mutex::new(context)),
            execute_context,
            extensions,
            operation_name,
            query,
            variables,
        }
    }

    /// Shorthand for an operation over `query` with no variables.
    pub fn new(query: QueryDocument) -> Self {
        Self::from_request(GraphQLRequest::new(query), ExecuteContext::default())
    }

    pub fn query(&self) -> &QueryDocument {
        &self.query
    }

    pub fn set_query(&mut self, query: QueryDocument) {
        self.query = query;
    }

    pub fn variables(&self) -> &JsonMap {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut JsonMap {
        &mut self.variables
    }

    /// The operation name, or an empty string for anonymous operations.
    pub fn operation_name(&self) -> &str {
        self.operation_name.as_str()
    }

    /// The kind of the operation that will be executed.
    pub fn operation_kind(&self) -> OperationKind {
        self.query
            .operation_kind(Some(self.operation_name.as_str()))
            .unwrap_or(OperationKind::Query)
    }

    pub fn extensions(&self) -> &JsonMap {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut JsonMap {
        &mut self.extensions
    }

    pub fn execute_context(&self) -> &ExecuteContext {
        &self.execute_context
    }

    /// A snapshot of the current context. Later updates are not reflected
    /// in the returned value.
    pub fn get_context(&self) -> Context {
        self.context.lock().clone()
    }

    /// Shallow-merge `partial` into the context.
    pub fn set_context(&self, partial: impl Into<Context>) {
        let partial = partial.into();
        let mut context = self.context.lock();
        *context = context.merge(&partial);
    }

    /// Compute a partial context from a snapshot of the current one and
    /// shallow-merge it.
    ///
    /// `update` runs without the context cell locked, so it may itself read
    /// or write this operation's context. The partial it returns is merged
    /// over whatever the context holds once `update` returns.
    pub fn update_context<F>(&self, update: F)
    where
        F: FnOnce(&Context) -> Context,
    {
        let snapshot = self.get_context();
        let partial = update(&snapshot);
        self.set_context(partial);
    }
}
impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("operation_name", &self.operation_name)
            .field("variables", &self.variables)
            .field("extensions", &self.extensions)
            .field("context", &*self.context.lock())
            .field("query", &self.query)
            .finish()
    }
}
