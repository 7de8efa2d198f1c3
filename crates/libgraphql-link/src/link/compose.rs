use crate::diagnostics::Diagnostic;
use crate::link::Forward;
use crate::link::Link;
use crate::link::LinkKind;
use crate::link::SplitTestOutcome;
use crate::link::link::LinkShape;
use crate::observable::Observable;
use crate::operation::Operation;
use std::sync::Arc;

/// Chain `first` before `second`: `first` runs with a [`Forward`] that
/// hands operations to `second`, which in turn receives the forward given
/// to the composite.
///
/// Concatenating onto a terminating link has no effect: `first` is
/// returned unchanged and a [`Diagnostic::ConcatOntoTerminatingLink`] is
/// reported.
pub fn concat(first: Link, second: Link) -> Link {
    if first.is_terminating() {
        Diagnostic::ConcatOntoTerminatingLink {
            link_name: first.name().to_string(),
        }.emit();
        return first;
    }

    let name = format!("{} -> {}", first.name(), second.name());
    let kind = second.kind();
    let (left, right) = (first.clone(), second.clone());
    Link::from_parts(
        name,
        kind,
        Arc::new(move |operation: Operation, forward: Forward| {
            let second = second.clone();
            let next = Forward::new(move |operation| {
                second.request(operation, forward.clone())
                    .unwrap_or_else(Observable::empty)
            });
            first.request(operation, next)
        }),
        LinkShape::Concat { left, right },
    )
}

/// Chain every link in `links`, first to last. An empty list produces
/// [`Link::empty()`].
pub fn from(links: impl IntoIterator<Item = Link>) -> Link {
    let mut links = links.into_iter();
    match links.next() {
        Some(first) => links.fold(first, concat),
        None => Link::empty(),
    }
}

/// Route each operation to `left` when `test` passes and to `right`
/// otherwise. A missing `right` forwards the operation unchanged.
///
/// `test` runs once per request, before either branch. Both branches
/// receive the same operation and the same forward. The split is
/// terminating only if both branches are.
pub fn split<T, O>(test: T, left: Link, right: Option<Link>) -> Link
where
    T: Fn(&Operation) -> O + Send + Sync + 'static,
    O: SplitTestOutcome,
{
    let right = right.unwrap_or_else(Link::passthrough);
    let kind =
        if left.is_terminating() && right.is_terminating() {
            LinkKind::Terminating
        } else {
            LinkKind::Forwarding
        };
    let name = format!("split({} | {})", left.name(), right.name());
    let shape = LinkShape::Split {
        left: left.clone(),
        right: right.clone(),
    };

    Link::from_parts(
        name,
        kind,
        Arc::new(move |operation: Operation, forward: Forward| {
            if test(&operation).passes() {
                left.request(operation, forward)
            } else {
                right.request(operation, forward)
            }
        }),
        shape,
    )
}
