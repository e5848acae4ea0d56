use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use crate::basic_types::Inconsistency;
use crate::branching::SelectionContext;
use crate::engine::propagation::PropagationContextMut;
#[cfg(doc)]
use crate::Space;

/// A trait for defining a branching strategy.
///
/// Branchers are attached to a [`Space`] in order; the first brancher whose
/// [`status`](Brancher::status) reports remaining work supplies the next choice. A brancher
/// never mutates the space when producing a choice — all domain changes go through
/// [`commit`](Brancher::commit), so that a choice can be replayed on any clone of the space
/// that produced it.
pub trait Brancher: Downcast {
    /// Returns `true` while this brancher can still produce a choice for the current domains.
    fn status(&mut self, context: &SelectionContext<'_>) -> bool;

    /// Produces the next choice. Only called when [`status`](Brancher::status) returned `true`
    /// on the same domains.
    fn choice(&mut self, context: &SelectionContext<'_>) -> Box<dyn ChoiceData>;

    /// Applies alternative `alternative` of a choice this brancher produced. May fail the
    /// space by reporting an [`Inconsistency`].
    fn commit(
        &self,
        context: PropagationContextMut<'_>,
        choice: &dyn ChoiceData,
        alternative: u32,
    ) -> Result<(), Inconsistency>;

    /// Creates the copy of this brancher that a space clone takes ownership of. As with
    /// propagators, `share = true` only permits immutable sub-objects to be shared.
    fn clone_boxed(&self, share: bool) -> Box<dyn Brancher>;
}

impl_downcast!(Brancher);

/// The payload of a choice, downcast by the brancher that produced it inside
/// [`Brancher::commit`].
pub trait ChoiceData: Downcast + std::fmt::Debug {
    /// The number of alternatives of this choice, at least 1.
    fn alternatives(&self) -> u32;
}

impl_downcast!(ChoiceData);
