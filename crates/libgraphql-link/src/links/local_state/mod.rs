mod local_resolver_args;
mod local_resolver_link;
mod projection;
mod server_document_cache;


pub use local_resolver_args::LocalResolverArgs;
pub use local_resolver_link::LocalResolverLink;
