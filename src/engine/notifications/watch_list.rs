use enumset::EnumSet;

use crate::containers::KeyedVec;
use crate::engine::notifications::DomainEvent;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::IntVarId;

/// A subscription of one propagator to the events of one variable.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Watcher {
    pub(crate) propagator: PropagatorId,
    pub(crate) local_id: LocalId,
    pub(crate) events: EnumSet<DomainEvent>,
    /// Advised subscriptions route every matching mutation through
    /// [`Propagator::advise`](crate::propagation::Propagator::advise) before scheduling.
    pub(crate) advised: bool,
}

/// Per-variable lists of [`Watcher`]s, maintained by the space.
///
/// A single list per variable is kept and filtered by event mask on notification. A propagator
/// may appear several times for one variable when it observes the variable through several of
/// its views (such as a term and its negation); each subscription is notified separately.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchLists {
    watchers: KeyedVec<IntVarId, Vec<Watcher>>,
}

impl WatchLists {
    /// Grows the watch lists by a single variable.
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Vec::new());
    }

    pub(crate) fn affected(&self, variable: IntVarId) -> &[Watcher] {
        &self.watchers[variable]
    }

    fn watch(&mut self, variable: IntVarId, watcher: Watcher) {
        self.watchers[variable].push(watcher);
    }

    /// Removes every subscription of `propagator` on `variable`, used when a propagator is
    /// subsumed.
    pub(crate) fn unwatch(&mut self, variable: IntVarId, propagator: PropagatorId) {
        self.watchers[variable].retain(|watcher| watcher.propagator != propagator);
    }
}

/// Registration proxy handed to [`IntegerVariable::watch_all`] so that derived views can
/// translate the subscribed event set before it reaches the watch lists.
///
/// [`IntegerVariable::watch_all`]: crate::variables::IntegerVariable::watch_all
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator: PropagatorId,
    local_id: LocalId,
    advised: bool,
    watch_lists: &'a mut WatchLists,
    subscriptions: &'a mut Vec<IntVarId>,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(
        propagator: PropagatorId,
        local_id: LocalId,
        advised: bool,
        watch_lists: &'a mut WatchLists,
        subscriptions: &'a mut Vec<IntVarId>,
    ) -> Watchers<'a> {
        Watchers {
            propagator,
            local_id,
            advised,
            watch_lists,
            subscriptions,
        }
    }

    pub fn watch_all(&mut self, variable: IntVarId, events: EnumSet<DomainEvent>) {
        self.watch_lists.watch(
            variable,
            Watcher {
                propagator: self.propagator,
                local_id: self.local_id,
                events,
                advised: self.advised,
            },
        );
        self.subscriptions.push(variable);
    }
}
