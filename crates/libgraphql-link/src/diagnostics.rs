//! Non-fatal problems with the shape of a link chain.
//!
//! A [`Diagnostic`] never fails an operation. Each one is reported as a
//! `tracing` event at `WARN` level with target [`DIAGNOSTICS_TARGET`], so
//! applications can route, filter or assert on them with any `tracing`
//! subscriber.

use serde_json::Value;
use std::fmt;

/// The `tracing` target every [`Diagnostic`] is emitted under.
pub const DIAGNOSTICS_TARGET: &str = "libgraphql_link::diagnostics";

#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A link was appended after a terminating link. The appended link can
    /// never run.
    ConcatOntoTerminatingLink {
        link_name: String,
    },

    /// The `test` function of a split returned something other than a
    /// boolean; it was coerced by truthiness.
    NonBooleanSplitTest {
        returned: Value,
    },

    /// The last link of a chain called `forward`.
    UnterminatedChain {
        operation_name: String,
    },
}
impl Diagnostic {
    pub fn emit(&self) {
        match self {
            Self::ConcatOntoTerminatingLink { link_name } => tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                kind = "concat_onto_terminating_link",
                link_name = link_name.as_str(),
                "{self}",
            ),
            Self::NonBooleanSplitTest { returned } => tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                kind = "non_boolean_split_test",
                returned = %returned,
                "{self}",
            ),
            Self::UnterminatedChain { operation_name } => tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                kind = "unterminated_chain",
                operation_name = operation_name.as_str(),
                "{self}",
            ),
        }
    }
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConcatOntoTerminatingLink { link_name } => write!(
                f,
                "You are calling concat on a terminating link ({link_name}), \
                which will have no effect",
            ),
            Self::NonBooleanSplitTest { returned } => write!(
                f,
                "Split test returned a non-boolean value ({returned}); it was \
                coerced by truthiness",
            ),
            Self::UnterminatedChain { operation_name } => write!(
                f,
                "Operation `{operation_name}` reached the end of the link chain \
                without being handled by a terminating link",
            ),
        }
    }
}
