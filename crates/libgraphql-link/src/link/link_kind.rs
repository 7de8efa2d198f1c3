/// Whether a [`Link`](crate::Link) ends a chain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LinkKind {
    /// The link may call `forward` to hand the operation to the next link.
    Forwarding,

    /// The link produces results itself and never calls `forward`. Anything
    /// concatenated after it is unreachable.
    Terminating,
}
