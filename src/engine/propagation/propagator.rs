use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use crate::basic_types::Inconsistency;
use crate::basic_types::ModEventDelta;
use crate::basic_types::PropagationStatus;
use crate::engine::notifications::DomainDelta;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::PropagationCost;
use crate::engine::propagation::PropagatorInitialisationContext;
#[cfg(doc)]
use crate::ExecStatus;

// We need this to recover concrete propagator types from `Box<dyn Propagator>` in tests; Rust
// inherently does not allow downcasting from the trait definition to its concrete type.
impl_downcast!(Propagator);

/// A propagator enforces one constraint by pruning the domains of the views it observes.
///
/// The lifecycle is: [`initialise`](Propagator::initialise) is called once when the propagator
/// is posted and registers its subscriptions; afterwards the space schedules the propagator
/// whenever a subscribed view raises a matching event, and runs
/// [`propagate`](Propagator::propagate) with the accumulated [`ModEventDelta`]. A propagator is
/// retired when it reports [`ExecStatus::Subsumed`] or when the space fails.
///
/// Propagators must not panic on impossibility: any internal contradiction is reported as an
/// [`Inconsistency`], which fails the owning space.
pub trait Propagator: Downcast {
    /// Return the name of the propagator, this is a convenience method that is used for
    /// printing.
    fn name(&self) -> &str;

    /// Called once when the propagator is posted. Registers the subscriptions via
    /// [`PropagatorInitialisationContext::register`] and sets up any internal state from the
    /// current domains. Reporting an [`Inconsistency`] here fails the space at the root.
    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency>;

    /// Extends the current domains with inferred domain changes.
    ///
    /// `delta` is the join of the events the subscribed views raised since the last run.
    /// Propagators are not required to reach their fixpoint in a single call; report
    /// [`ExecStatus::NotAtFixpoint`] to be re-run. When reporting [`ExecStatus::AtFixpoint`],
    /// the events this call raised itself are not replayed to this propagator, so the claim
    /// must account for the propagator's own inferences.
    fn propagate(
        &mut self,
        context: PropagationContextMut<'_>,
        delta: ModEventDelta,
    ) -> PropagationStatus;

    /// The scheduling cost of running this propagator, used to pick its queue.
    ///
    /// By default the cost is [`PropagationCost::Linear`]. It is expected that propagator
    /// implementations set this to an appropriate rung.
    fn cost(&self, _context: PropagationContext<'_>, _delta: ModEventDelta) -> PropagationCost {
        PropagationCost::Linear
    }

    /// Called for every mutation on an advised subscription, before the propagator is
    /// scheduled. `delta` describes the exact change and is decoded through the view that
    /// registered the subscription.
    ///
    /// This is the hook for incrementally maintained state and should only perform
    /// computationally cheap work; expensive computation belongs in
    /// [`propagate`](Propagator::propagate). By default the propagator is enqueued for every
    /// event.
    fn advise(
        &mut self,
        _context: PropagationContext<'_>,
        _local_id: LocalId,
        _delta: DomainDelta,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Creates the copy of this propagator that a space clone takes ownership of.
    ///
    /// Mutable state must be duplicated regardless of `share`; `share = true` only permits
    /// immutable sub-objects (such as reference-counted view tables) to be shared between the
    /// copies.
    fn clone_boxed(&self, share: bool) -> Box<dyn Propagator>;
}

/// Indicator of what to do when a propagator is advised of a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator has absorbed the change and does not need to run.
    Skip,
    /// The advised state proves the space inconsistent; the space is failed without running
    /// the propagator.
    Fail,
}
