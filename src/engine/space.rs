use log::debug;
use log::trace;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::ExecStatus;
use crate::basic_types::ModEventDelta;
use crate::basic_types::SpaceStatus;
use crate::branching::Brancher;
use crate::branching::ChoiceData;
use crate::branching::SelectionContext;
use crate::butternut_assert_simple;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::WatchLists;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::PropagatorQueues;
use crate::engine::propagation::PropagatorStore;
use crate::engine::variables::BoolView;
use crate::engine::variables::IntVarId;
use crate::engine::variables::IntegerVariable;

/// An immutable branching decision produced by [`Space::choice`].
///
/// A choice pairs the index of the brancher that produced it with the brancher's payload; it
/// can be committed on the space that produced it or on any clone of that space, which is how
/// the search engines replay alternatives.
#[derive(Debug)]
pub struct Choice {
    pub(crate) brancher: usize,
    pub(crate) data: Box<dyn ChoiceData>,
}

impl Choice {
    pub fn alternatives(&self) -> u32 {
        self.data.alternatives()
    }
}

/// The unit of state of the solver: variables, propagators and branchers, together with the
/// scheduling machinery that drives them to fixpoint.
///
/// A space owns all of its state — its stores are the allocation region for variable and
/// propagator data, freed in one piece when the space is dropped. [`Space::clone_space`]
/// produces a fully independent copy: mutating one space never affects the other, which is
/// what allows search to explore alternatives by copying rather than undoing.
pub struct Space {
    domains: DomainStore,
    propagators: PropagatorStore,
    watch_lists: WatchLists,
    queues: PropagatorQueues,
    branchers: Vec<Box<dyn Brancher>>,
    failed: bool,
    status_cache: Option<SpaceStatus>,
    propagations: u64,
}

impl Default for Space {
    fn default() -> Self {
        Space::new()
    }
}

impl Space {
    pub fn new() -> Space {
        Space {
            domains: DomainStore::default(),
            propagators: PropagatorStore::default(),
            watch_lists: WatchLists::default(),
            queues: PropagatorQueues::default(),
            branchers: Vec::new(),
            failed: false,
            status_cache: None,
            propagations: 0,
        }
    }

    /// Creates a new integer variable with the interval domain `lower_bound..=upper_bound`.
    pub fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> IntVarId {
        self.status_cache = None;
        self.watch_lists.grow();
        self.domains.grow(lower_bound, upper_bound)
    }

    /// Creates a new integer variable over an explicit, non-empty set of values.
    pub fn new_sparse_variable(&mut self, values: &[i32]) -> IntVarId {
        let mut values = values.to_vec();
        values.sort_unstable();
        values.dedup();

        self.status_cache = None;
        self.watch_lists.grow();
        self.domains.grow_sparse(&values)
    }

    /// Creates a new 0/1 variable presented as a Boolean.
    pub fn new_boolean_variable(&mut self) -> BoolView {
        BoolView::new(self.new_variable(0, 1))
    }

    /// Attaches a propagator to this space and schedules it for its first run.
    ///
    /// Posting to a failed space and root-level infeasibility are reported as typed errors;
    /// the latter also fails the space.
    pub fn post(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<(), ConstraintOperationError> {
        if self.failed {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        self.status_cache = None;

        let propagator_id = self.propagators.alloc(Box::new(propagator));
        let slot = &mut self.propagators.slots[propagator_id];
        let propagator = slot
            .propagator
            .as_mut()
            .expect("a freshly allocated slot is occupied");

        let mut context = PropagatorInitialisationContext::new(
            &mut self.watch_lists,
            &mut slot.subscriptions,
            propagator_id,
            &self.domains,
        );
        let result = propagator.initialise(&mut context);

        match result {
            Ok(()) => {
                trace!("posted propagator {} ({})", propagator_id, propagator.name());
                slot.delta = ModEventDelta::everything();
                slot.enqueued = true;
                let cost = propagator.cost(PropagationContext::new(&self.domains), slot.delta);
                self.queues.enqueue(cost, propagator_id);
                Ok(())
            }
            Err(_) => {
                self.fail();
                Err(ConstraintOperationError::InfeasiblePropagator)
            }
        }
    }

    /// Appends a brancher; branchers are consulted in the order they were attached.
    pub fn branch(&mut self, brancher: impl Brancher + 'static) {
        self.status_cache = None;
        self.branchers.push(Box::new(brancher));
    }

    /// Runs the propagation loop to fixpoint.
    ///
    /// Once a status is reached it is cached: calling `status` again without an intervening
    /// mutation returns the same status without running any propagator.
    pub fn status(&mut self) -> SpaceStatus {
        if self.failed {
            return SpaceStatus::Failed;
        }
        if let Some(status) = self.status_cache {
            return status;
        }

        self.drain_events(None);

        while !self.failed {
            let Some(propagator_id) = self.queues.pop() else {
                break;
            };

            let slot = &mut self.propagators.slots[propagator_id];
            let Some(propagator) = slot.propagator.as_mut() else {
                // The propagator was subsumed after it was enqueued.
                continue;
            };
            let delta = std::mem::take(&mut slot.delta);
            slot.enqueued = false;

            self.propagations += 1;
            trace!(
                "running propagator {} ({}) with {}",
                propagator_id,
                propagator.name(),
                delta.modevent()
            );

            let status = propagator.propagate(PropagationContextMut::new(&mut self.domains), delta);

            match status {
                Ok(ExecStatus::AtFixpoint) => self.drain_events(Some(propagator_id)),
                Ok(ExecStatus::NotAtFixpoint) => {
                    self.drain_events(Some(propagator_id));
                    if !self.failed {
                        self.requeue(propagator_id);
                    }
                }
                Ok(ExecStatus::Subsumed) => {
                    trace!("propagator {propagator_id} is subsumed");
                    self.retire(propagator_id);
                    self.drain_events(Some(propagator_id));
                }
                Err(_) => self.fail(),
            }
        }

        if self.failed {
            return SpaceStatus::Failed;
        }

        let mut status = SpaceStatus::Solved;
        for index in 0..self.branchers.len() {
            let context = SelectionContext::new(&self.domains);
            if self.branchers[index].status(&context) {
                status = SpaceStatus::Branch;
                break;
            }
        }

        debug!("space at fixpoint after {} propagations: {status}", self.propagations);
        self.status_cache = Some(status);
        status
    }

    /// Asks the first live brancher for a decision.
    ///
    /// Calling this on a space whose status is not [`SpaceStatus::Branch`] is a programmer
    /// error.
    pub fn choice(&mut self) -> Choice {
        butternut_assert_simple!(
            self.status_cache == Some(SpaceStatus::Branch),
            "choice() requires status() to have returned Branch"
        );

        for index in 0..self.branchers.len() {
            let context = SelectionContext::new(&self.domains);
            if self.branchers[index].status(&context) {
                let data = self.branchers[index].choice(&context);
                return Choice {
                    brancher: index,
                    data,
                };
            }
        }

        unreachable!("a Branch status guarantees a live brancher")
    }

    /// Applies alternative `alternative` of a choice to this space; may fail the space.
    ///
    /// The resulting domain changes are propagated by the next call to [`status`](Space::status).
    pub fn commit(&mut self, choice: &Choice, alternative: u32) {
        butternut_assert_simple!(
            alternative < choice.alternatives(),
            "commit() with an out-of-range alternative"
        );
        if self.failed {
            return;
        }
        self.status_cache = None;

        let brancher = &self.branchers[choice.brancher];
        let context = PropagationContextMut::new(&mut self.domains);
        if brancher
            .commit(context, choice.data.as_ref(), alternative)
            .is_err()
        {
            self.fail();
        }
    }

    /// Produces an independent copy of this space.
    ///
    /// The space must be unfailed and at fixpoint (that is, [`status`](Space::status) was
    /// called and returned [`SpaceStatus::Solved`] or [`SpaceStatus::Branch`] since the last
    /// mutation). With `share = true`, immutable sub-objects of propagators and branchers may
    /// be shared between the copies; all mutable state is duplicated regardless.
    pub fn clone_space(&self, share: bool) -> Space {
        butternut_assert_simple!(!self.failed, "cannot clone a failed space");
        butternut_assert_simple!(
            matches!(
                self.status_cache,
                Some(SpaceStatus::Solved) | Some(SpaceStatus::Branch)
            ),
            "cloning requires a space at fixpoint; call status() first"
        );

        Space {
            domains: self.domains.clone(),
            propagators: self.propagators.clone_with(share),
            watch_lists: self.watch_lists.clone(),
            queues: self.queues.clone(),
            branchers: self
                .branchers
                .iter()
                .map(|brancher| brancher.clone_boxed(share))
                .collect(),
            failed: false,
            status_cache: self.status_cache,
            propagations: 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn num_variables(&self) -> usize {
        self.domains.num_domains()
    }

    /// The number of propagators that have not been subsumed.
    pub fn num_propagators(&self) -> usize {
        self.propagators.num_active()
    }

    /// The number of propagator executions in this space since it was created or cloned.
    pub fn propagation_count(&self) -> u64 {
        self.propagations
    }

    pub(crate) fn take_propagation_count(&mut self) -> u64 {
        std::mem::take(&mut self.propagations)
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.lower_bound(&self.domains)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.upper_bound(&self.domains)
    }

    /// The value of an assigned variable; panics on an unassigned one.
    pub fn value<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.value(&self.domains)
    }

    pub fn is_assigned<Var: IntegerVariable>(&self, variable: &Var) -> bool {
        variable.is_assigned(&self.domains)
    }

    pub fn size<Var: IntegerVariable>(&self, variable: &Var) -> u64 {
        variable.size(&self.domains)
    }

    pub fn contains<Var: IntegerVariable>(&self, variable: &Var, value: i32) -> bool {
        variable.contains(&self.domains, value)
    }

    /// Delivers the recorded mutations: advised subscriptions first, then scheduling. Events
    /// raised by `skip` itself are withheld from it, since the propagator has already accounted
    /// for its own inferences.
    fn drain_events(&mut self, skip: Option<PropagatorId>) {
        loop {
            let pending = self.domains.drain_events();
            if pending.is_empty() {
                return;
            }

            let mut failure = false;
            'events: for event in pending {
                for &watcher in self.watch_lists.affected(event.variable) {
                    if (watcher.events & event.events).is_empty() {
                        continue;
                    }
                    if Some(watcher.propagator) == skip {
                        continue;
                    }

                    let slot = &mut self.propagators.slots[watcher.propagator];
                    let Some(propagator) = slot.propagator.as_mut() else {
                        continue;
                    };

                    if watcher.advised {
                        let decision = propagator.advise(
                            PropagationContext::new(&self.domains),
                            watcher.local_id,
                            event.delta,
                        );
                        match decision {
                            EnqueueDecision::Skip => continue,
                            EnqueueDecision::Fail => {
                                failure = true;
                                break 'events;
                            }
                            EnqueueDecision::Enqueue => {}
                        }
                    }

                    slot.delta.join(watcher.events & event.events);
                    if !slot.enqueued {
                        slot.enqueued = true;
                        let cost =
                            propagator.cost(PropagationContext::new(&self.domains), slot.delta);
                        self.queues.enqueue(cost, watcher.propagator);
                    }
                }
            }

            if failure {
                self.fail();
                return;
            }
        }
    }

    fn requeue(&mut self, propagator_id: PropagatorId) {
        let slot = &mut self.propagators.slots[propagator_id];
        let Some(propagator) = slot.propagator.as_ref() else {
            return;
        };
        if !slot.enqueued {
            slot.enqueued = true;
            let cost = propagator.cost(PropagationContext::new(&self.domains), slot.delta);
            self.queues.enqueue(cost, propagator_id);
        }
    }

    /// Removes a subsumed propagator from every watch list and retires its slot.
    fn retire(&mut self, propagator_id: PropagatorId) {
        let slot = &mut self.propagators.slots[propagator_id];
        slot.propagator = None;
        let subscriptions = std::mem::take(&mut slot.subscriptions);
        for variable in subscriptions {
            self.watch_lists.unwatch(variable, propagator_id);
        }
    }

    fn fail(&mut self) {
        if self.failed {
            return;
        }
        debug!("space failed");
        self.failed = true;
        self.status_cache = Some(SpaceStatus::Failed);
        self.queues.clear();
        self.domains.discard_events();
    }
}
