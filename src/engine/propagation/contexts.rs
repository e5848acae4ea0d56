use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::WatchLists;
use crate::engine::notifications::Watchers;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::IntVarId;
use crate::engine::variables::IntegerVariable;

pub trait HasDomains {
    fn domains(&self) -> &DomainStore;
}

/// The read surface shared by every context: domain queries through any view.
pub trait ReadDomains: HasDomains {
    fn lower_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.lower_bound(self.domains())
    }

    fn upper_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.upper_bound(self.domains())
    }

    fn is_assigned<Var: IntegerVariable>(&self, variable: &Var) -> bool {
        variable.is_assigned(self.domains())
    }

    /// The value of an assigned view; panics on an unassigned one.
    fn value<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.value(self.domains())
    }

    fn size<Var: IntegerVariable>(&self, variable: &Var) -> u64 {
        variable.size(self.domains())
    }

    fn contains<Var: IntegerVariable>(&self, variable: &Var, value: i32) -> bool {
        variable.contains(self.domains(), value)
    }
}

impl<T: HasDomains> ReadDomains for T {}

/// Read-only view of the domains, handed to
/// [`advise`](crate::propagation::Propagator::advise) and
/// [`cost`](crate::propagation::Propagator::cost).
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    domains: &'a DomainStore,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(domains: &'a DomainStore) -> Self {
        PropagationContext { domains }
    }
}

impl HasDomains for PropagationContext<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}

/// Mutable view of the domains, handed to
/// [`propagate`](crate::propagation::Propagator::propagate) and brancher commits.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    domains: &'a mut DomainStore,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(domains: &'a mut DomainStore) -> Self {
        PropagationContextMut { domains }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.domains)
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        variable: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        variable.set_lower_bound(self.domains, value)
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        variable: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        variable.set_upper_bound(self.domains, value)
    }

    pub fn remove<Var: IntegerVariable>(
        &mut self,
        variable: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        variable.remove(self.domains, value)
    }

    pub fn assign<Var: IntegerVariable>(
        &mut self,
        variable: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        variable.assign(self.domains, value)
    }
}

impl HasDomains for PropagationContextMut<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}

/// Context handed to [`initialise`](crate::propagation::Propagator::initialise), through which
/// a propagator registers its subscriptions.
#[derive(Debug)]
pub struct PropagatorInitialisationContext<'a> {
    watch_lists: &'a mut WatchLists,
    subscriptions: &'a mut Vec<IntVarId>,
    propagator_id: PropagatorId,
    domains: &'a DomainStore,
}

impl<'a> PropagatorInitialisationContext<'a> {
    pub(crate) fn new(
        watch_lists: &'a mut WatchLists,
        subscriptions: &'a mut Vec<IntVarId>,
        propagator_id: PropagatorId,
        domains: &'a DomainStore,
    ) -> Self {
        PropagatorInitialisationContext {
            watch_lists,
            subscriptions,
            propagator_id,
            domains,
        }
    }

    /// Subscribes the propagator to `events` on `variable`. The propagator is enqueued whenever
    /// a matching event is raised.
    pub fn register<Var: IntegerVariable>(
        &mut self,
        variable: Var,
        events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        let mut watchers = Watchers::new(
            self.propagator_id,
            local_id,
            false,
            self.watch_lists,
            self.subscriptions,
        );
        variable.watch_all(&mut watchers, events.get());
        variable
    }

    /// Subscribes the propagator to `events` on `variable` in advised mode: every matching
    /// mutation is routed through [`advise`](crate::propagation::Propagator::advise) before the
    /// propagator is scheduled.
    pub fn register_advised<Var: IntegerVariable>(
        &mut self,
        variable: Var,
        events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        let mut watchers = Watchers::new(
            self.propagator_id,
            local_id,
            true,
            self.watch_lists,
            self.subscriptions,
        );
        variable.watch_all(&mut watchers, events.get());
        variable
    }
}

impl HasDomains for PropagatorInitialisationContext<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}
