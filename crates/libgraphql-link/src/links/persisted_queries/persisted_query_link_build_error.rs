use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PersistedQueryLinkBuildError {
    #[error(
        "Missing/invalid \"sha256\" or \"generate_hash\" function. Please configure \
        one using the \"sha256\" or \"generate_hash\" builder methods."
    )]
    MissingHashFunction,

    #[error("The persisted query hash cache must have a capacity of at least 1.")]
    ZeroHashCacheCapacity,
}
