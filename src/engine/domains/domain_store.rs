use enumset::EnumSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::containers::KeyedVec;
use crate::engine::domains::IntDomain;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvent;
use crate::engine::variables::IntVarId;

/// One recorded mutation: the precise events it raised and the delta for advised subscriptions.
#[derive(Clone, Debug)]
pub(crate) struct PendingEvent {
    pub(crate) variable: IntVarId,
    pub(crate) events: EnumSet<DomainEvent>,
    pub(crate) delta: DomainDelta,
}

/// The domains of every variable in a space.
///
/// This is the space's allocation region for variable state: variables are allocated by pushing
/// into the store, identified by [`IntVarId`], freed in bulk when the space is dropped, and
/// copied wholesale when the space is cloned. Every mutating entry point records the raised
/// events into an internal sink which the space drains while scheduling.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    domains: KeyedVec<IntVarId, IntDomain>,
    events: Vec<PendingEvent>,
}

impl DomainStore {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> IntVarId {
        self.domains.push(IntDomain::new(lower_bound, upper_bound))
    }

    pub(crate) fn grow_sparse(&mut self, values: &[i32]) -> IntVarId {
        self.domains.push(IntDomain::from_values(values))
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn lower_bound(&self, variable: IntVarId) -> i32 {
        self.domains[variable].min()
    }

    pub fn upper_bound(&self, variable: IntVarId) -> i32 {
        self.domains[variable].max()
    }

    pub fn median(&self, variable: IntVarId) -> i32 {
        self.domains[variable].median()
    }

    pub fn value(&self, variable: IntVarId) -> i32 {
        self.domains[variable].value()
    }

    pub fn size(&self, variable: IntVarId) -> u64 {
        self.domains[variable].size()
    }

    pub fn width(&self, variable: IntVarId) -> u64 {
        self.domains[variable].width()
    }

    pub fn is_assigned(&self, variable: IntVarId) -> bool {
        self.domains[variable].is_assigned()
    }

    pub fn is_interval(&self, variable: IntVarId) -> bool {
        self.domains[variable].is_interval()
    }

    pub fn contains(&self, variable: IntVarId, value: i32) -> bool {
        self.domains[variable].contains(value)
    }

    pub fn regret_min(&self, variable: IntVarId) -> u32 {
        self.domains[variable].regret_min()
    }

    pub fn regret_max(&self, variable: IntVarId) -> u32 {
        self.domains[variable].regret_max()
    }

    pub fn iterate(&self, variable: IntVarId) -> impl Iterator<Item = i32> + '_ {
        self.domains[variable].iter()
    }

    pub(crate) fn tighten_lower_bound(
        &mut self,
        variable: IntVarId,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[variable];
        let old_min = domain.min();

        let event = domain.tighten_lower_bound(value);
        if event.is_failed() {
            return Err(EmptyDomain);
        }
        if event.has_changed() {
            let mut events = EnumSet::only(DomainEvent::LowerBound);
            if event == ModEvent::Val {
                events |= DomainEvent::Assign;
            }
            let delta = DomainDelta::range(DomainEvent::LowerBound, old_min, domain.min() - 1);
            self.events.push(PendingEvent {
                variable,
                events,
                delta,
            });
        }
        Ok(event)
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        variable: IntVarId,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[variable];
        let old_max = domain.max();

        let event = domain.tighten_upper_bound(value);
        if event.is_failed() {
            return Err(EmptyDomain);
        }
        if event.has_changed() {
            let mut events = EnumSet::only(DomainEvent::UpperBound);
            if event == ModEvent::Val {
                events |= DomainEvent::Assign;
            }
            let delta = DomainDelta::range(DomainEvent::UpperBound, domain.max() + 1, old_max);
            self.events.push(PendingEvent {
                variable,
                events,
                delta,
            });
        }
        Ok(event)
    }

    pub(crate) fn remove_value(
        &mut self,
        variable: IntVarId,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[variable];
        let old_min = domain.min();
        let old_max = domain.max();

        let event = domain.remove_value(value);
        if event.is_failed() {
            return Err(EmptyDomain);
        }
        if event.has_changed() {
            let (mut events, delta) = if value == old_min {
                (
                    EnumSet::only(DomainEvent::LowerBound),
                    DomainDelta::range(DomainEvent::LowerBound, old_min, domain.min() - 1),
                )
            } else if value == old_max {
                (
                    EnumSet::only(DomainEvent::UpperBound),
                    DomainDelta::range(DomainEvent::UpperBound, domain.max() + 1, old_max),
                )
            } else {
                (
                    EnumSet::only(DomainEvent::Removal),
                    DomainDelta::range(DomainEvent::Removal, value, value),
                )
            };
            if event == ModEvent::Val {
                events |= DomainEvent::Assign;
            }
            self.events.push(PendingEvent {
                variable,
                events,
                delta,
            });
        }
        Ok(event)
    }

    pub(crate) fn assign(
        &mut self,
        variable: IntVarId,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[variable];
        let old_min = domain.min();
        let old_max = domain.max();

        let event = domain.assign(value);
        if event.is_failed() {
            return Err(EmptyDomain);
        }
        if event.has_changed() {
            let mut events = EnumSet::only(DomainEvent::Assign);
            if domain.min() > old_min {
                events |= DomainEvent::LowerBound;
            }
            if domain.max() < old_max {
                events |= DomainEvent::UpperBound;
            }
            let delta = DomainDelta::any(DomainEvent::Assign, old_min, old_max);
            self.events.push(PendingEvent {
                variable,
                events,
                delta,
            });
        }
        Ok(event)
    }

    pub(crate) fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(
        &mut self,
        variable: IntVarId,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.bulk_update(variable, |domain| domain.intersect_ranges(ranges))
    }

    pub(crate) fn remove_ranges<I: Iterator<Item = (i32, i32)>>(
        &mut self,
        variable: IntVarId,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.bulk_update(variable, |domain| domain.remove_ranges(ranges))
    }

    pub(crate) fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(
        &mut self,
        variable: IntVarId,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.bulk_update(variable, |domain| domain.narrow_ranges(ranges))
    }

    fn bulk_update(
        &mut self,
        variable: IntVarId,
        update: impl FnOnce(&mut IntDomain) -> ModEvent,
    ) -> Result<ModEvent, EmptyDomain> {
        let domain = &mut self.domains[variable];
        let old_min = domain.min();
        let old_max = domain.max();

        let event = update(domain);
        if event.is_failed() {
            return Err(EmptyDomain);
        }
        if event.has_changed() {
            let mut events = EnumSet::empty();
            if domain.min() > old_min {
                events |= DomainEvent::LowerBound;
            }
            if domain.max() < old_max {
                events |= DomainEvent::UpperBound;
            }
            if event == ModEvent::Val {
                events |= DomainEvent::Assign;
            }
            if event == ModEvent::Dom {
                events |= DomainEvent::Removal;
            }
            let delta = DomainDelta::any(DomainEvent::Removal, old_min, old_max);
            self.events.push(PendingEvent {
                variable,
                events,
                delta,
            });
        }
        Ok(event)
    }

    pub(crate) fn drain_events(&mut self) -> Vec<PendingEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn discard_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_record_their_events() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 5);

        let event = store.tighten_lower_bound(x, 2).expect("non-empty");
        assert_eq!(ModEvent::Bnd, event);

        let pending = store.drain_events();
        assert_eq!(1, pending.len());
        assert_eq!(x, pending[0].variable);
        assert_eq!(EnumSet::only(DomainEvent::LowerBound), pending[0].events);
        assert!(!pending[0].delta.any);
        assert_eq!(0, pending[0].delta.min);
        assert_eq!(1, pending[0].delta.max);
    }

    #[test]
    fn an_assigning_bound_update_also_raises_assign() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 5);

        let event = store.tighten_upper_bound(x, 0).expect("non-empty");
        assert_eq!(ModEvent::Val, event);

        let pending = store.drain_events();
        assert_eq!(
            DomainEvent::UpperBound | DomainEvent::Assign,
            pending[0].events
        );
    }

    #[test]
    fn a_failing_mutation_records_nothing() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 5);

        assert_eq!(Err(EmptyDomain), store.tighten_lower_bound(x, 6));
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn interior_removal_is_a_removal_event() {
        let mut store = DomainStore::default();
        let x = store.grow(0, 5);

        let _ = store.remove_value(x, 3).expect("non-empty");
        let pending = store.drain_events();
        assert_eq!(EnumSet::only(DomainEvent::Removal), pending[0].events);
        assert_eq!(3, pending[0].delta.min);
        assert_eq!(3, pending[0].delta.max);
    }
}
