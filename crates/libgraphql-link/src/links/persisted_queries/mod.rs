//! Automatic persisted queries: send a hash of the query document instead
//! of its text, and fall back to the full text when the server does not
//! recognize the hash.

mod error_payload;
mod hash_cache;
mod persisted_query_link;
mod persisted_query_link_build_error;
mod persisted_query_link_builder;

#[cfg(test)]
mod tests;

pub use error_payload::ErrorPayload;
pub use error_payload::PersistedQueryErrorMeta;
pub use persisted_query_link::PersistedQueryLink;
pub use persisted_query_link_build_error::PersistedQueryLinkBuildError;
pub use persisted_query_link_builder::PersistedQueryLinkBuilder;

use sha2::Digest;
use sha2::Sha256;

/// The version of the persisted query protocol this link speaks.
pub const PERSISTED_QUERY_VERSION: u64 = 1;

/// The lowercase hex encoded SHA-256 digest of `query`, as sent in
/// `extensions.persistedQuery.sha256Hash` by a link built with
/// [`PersistedQueryLinkBuilder::use_sha256()`].
pub fn sha256_hash(query: &str) -> String {
    hex::encode(Sha256::digest(query.as_bytes()))
}
