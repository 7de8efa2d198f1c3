use indexmap::IndexMap;

/// Configuration for an [`HttpLink`](super::HttpLink).
///
/// Every setting except the client can be overridden per operation through
/// its context: `uri`, `headers`, `http.includeQuery`,
/// `http.includeExtensions` and `fetchOptions.method`.
#[derive(Clone, Debug)]
pub struct HttpLinkOptions {
    pub client: Option<reqwest::Client>,
    pub headers: IndexMap<String, String>,
    pub include_extensions: bool,
    pub uri: String,
    pub use_get_for_queries: bool,
}
impl HttpLinkOptions {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            client: None,
            headers: IndexMap::new(),
            include_extensions: false,
            uri: uri.into(),
            use_get_for_queries: false,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn include_extensions(mut self, include: bool) -> Self {
        self.include_extensions = include;
        self
    }

    /// Send queries (never mutations) with `GET`.
    pub fn use_get_for_queries(mut self, use_get: bool) -> Self {
        self.use_get_for_queries = use_get;
        self
    }
}
impl Default for HttpLinkOptions {
    fn default() -> Self {
        Self::new("/graphql")
    }
}
