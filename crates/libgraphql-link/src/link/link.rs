use crate::link::Forward;
use crate::link::LinkKind;
use crate::link::RequestHandler;
use crate::link::SplitTestOutcome;
use crate::link::TerminatingRequestHandler;
use crate::link::compose;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::result::FetchResult;
use std::fmt;
use std::sync::Arc;

type HandlerFn =
    Arc<dyn Fn(Operation, Forward) -> Option<Observable<FetchResult>> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum LinkShape {
    Leaf,
    Concat {
        left: Link,
        right: Link,
    },
    Split {
        left: Link,
        right: Link,
    },
}

struct LinkNode {
    handler: HandlerFn,
    kind: LinkKind,
    name: String,
    shape: LinkShape,
}

/// One stage of a request pipeline, or a composition of stages.
///
/// A [`Link`] is an immutable, cheaply cloneable handle. Composing links
/// (with [`concat()`](crate::concat), [`from()`](crate::from) or
/// [`split()`](crate::split)) creates new nodes and never modifies its
/// inputs, so the same link may appear in any number of chains.
#[derive(Clone)]
pub struct Link {
    node: Arc<LinkNode>,
}
impl Link {
    /// A forwarding link from a closure receiving the operation and the
    /// [`Forward`] to the rest of the chain.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Operation, Forward) -> Option<Observable<FetchResult>>
            + Send + Sync + 'static,
    {
        Self::from_parts("link", LinkKind::Forwarding, Arc::new(handler), LinkShape::Leaf)
    }

    /// A terminating link from a closure that produces results itself.
    pub fn terminating<F>(handler: F) -> Self
    where
        F: Fn(Operation) -> Option<Observable<FetchResult>> + Send + Sync + 'static,
    {
        Self::from_parts(
            "terminating link",
            LinkKind::Terminating,
            Arc::new(move |operation: Operation, _forward: Forward| handler(operation)),
            LinkShape::Leaf,
        )
    }

    pub fn from_handler(handler: impl RequestHandler) -> Self {
        Self::new(move |operation, forward| handler.request(operation, forward))
    }

    pub fn from_terminating_handler(handler: impl TerminatingRequestHandler) -> Self {
        Self::terminating(move |operation| handler.request(operation))
    }

    /// A terminating link that completes immediately without emitting.
    pub fn empty() -> Self {
        Self::terminating(|_| Some(Observable::empty())).named("empty")
    }

    /// A forwarding link that hands every operation on unchanged.
    pub fn passthrough() -> Self {
        Self::new(|operation, forward| Some(forward.call(operation)))
            .named("passthrough")
    }

    pub(crate) fn from_parts(
        name: impl Into<String>,
        kind: LinkKind,
        handler: HandlerFn,
        shape: LinkShape,
    ) -> Self {
        Self {
            node: Arc::new(LinkNode {
                handler,
                kind,
                name: name.into(),
                shape,
            }),
        }
    }

    /// A copy of this link carrying a different name. The name shows up in
    /// diagnostics and in the link's [`Display`](fmt::Display) output.
    pub fn named(&self, name: impl Into<String>) -> Self {
        Self::from_parts(
            name,
            self.node.kind,
            self.node.handler.clone(),
            self.node.shape.clone(),
        )
    }

    pub fn name(&self) -> &str {
        self.node.name.as_str()
    }

    pub fn kind(&self) -> LinkKind {
        self.node.kind
    }

    pub fn is_terminating(&self) -> bool {
        self.node.kind == LinkKind::Terminating
    }

    /// The first child of a composed link: the link that runs first in a
    /// concatenation, or the branch taken when a split's test passes.
    pub fn left(&self) -> Option<&Link> {
        match &self.node.shape {
            LinkShape::Leaf => None,
            LinkShape::Concat { left, .. } | LinkShape::Split { left, .. } => Some(left),
        }
    }

    /// The second child of a composed link.
    pub fn right(&self) -> Option<&Link> {
        match &self.node.shape {
            LinkShape::Leaf => None,
            LinkShape::Concat { right, .. } | LinkShape::Split { right, .. } => Some(right),
        }
    }

    /// Returns `true` if both handles refer to the same link node.
    pub fn ptr_eq(&self, other: &Link) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Run this link's handler.
    pub fn request(
        &self,
        operation: Operation,
        forward: Forward,
    ) -> Option<Observable<FetchResult>> {
        (self.node.handler)(operation, forward)
    }

    /// `concat(self, next)`.
    pub fn concat(&self, next: Link) -> Link {
        compose::concat(self.clone(), next)
    }

    /// `concat(self, split(test, left, right))`.
    pub fn split<T, O>(&self, test: T, left: Link, right: Option<Link>) -> Link
    where
        T: Fn(&Operation) -> O + Send + Sync + 'static,
        O: SplitTestOutcome,
    {
        compose::concat(self.clone(), compose::split(test, left, right))
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let kind = match self.node.kind {
            LinkKind::Forwarding => "",
            LinkKind::Terminating => " (terminating)",
        };
        writeln!(f, "{:indent$}{}{kind}", "", self.node.name, indent = depth * 2)?;
        match &self.node.shape {
            LinkShape::Leaf => Ok(()),
            LinkShape::Concat { left, right } | LinkShape::Split { left, right } => {
                left.fmt_tree(f, depth + 1)?;
                right.fmt_tree(f, depth + 1)
            },
        }
    }
}
impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("name", &self.node.name)
            .field("kind", &self.node.kind)
            .finish()
    }
}
impl fmt::Display for Link {
    /// Renders the link tree, one node per line, children indented below
    /// their parent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
