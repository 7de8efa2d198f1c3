mod http_link;
mod http_link_options;
mod http_method;
mod multipart_decoder;
mod prepared_request;
mod response;

#[cfg(test)]
mod tests;

pub use http_link::HttpLink;
pub use http_link_options::HttpLinkOptions;
pub use http_method::HttpMethod;
pub(crate) use multipart_decoder::MultipartDecoder;
pub(crate) use prepared_request::PreparedRequest;

/// Request header set from the operation's
/// [`ExecuteContext::client_name`](crate::operation::ExecuteContext::client_name).
pub const CLIENT_NAME_HEADER: &str = "apollographql-client-name";

/// Request header set from the operation's
/// [`ExecuteContext::client_version`](crate::operation::ExecuteContext::client_version).
pub const CLIENT_VERSION_HEADER: &str = "apollographql-client-version";
