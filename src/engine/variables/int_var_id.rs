use enumset::EnumSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::containers::StorageKey;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::variables::AffineView;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;

/// The most basic [`IntegerVariable`]: the id which links to a domain in the space that created
/// it (and, because ids are stable, in every clone of that space).
#[derive(Clone, PartialEq, Eq, Copy, Hash)]
pub struct IntVarId {
    id: u32,
}

impl IntVarId {
    pub(crate) fn new(id: u32) -> Self {
        IntVarId { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl IntegerVariable for IntVarId {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, domains: &DomainStore) -> i32 {
        domains.lower_bound(*self)
    }

    fn upper_bound(&self, domains: &DomainStore) -> i32 {
        domains.upper_bound(*self)
    }

    fn median(&self, domains: &DomainStore) -> i32 {
        domains.median(*self)
    }

    fn value(&self, domains: &DomainStore) -> i32 {
        domains.value(*self)
    }

    fn is_assigned(&self, domains: &DomainStore) -> bool {
        domains.is_assigned(*self)
    }

    fn size(&self, domains: &DomainStore) -> u64 {
        domains.size(*self)
    }

    fn width(&self, domains: &DomainStore) -> u64 {
        domains.width(*self)
    }

    fn is_interval(&self, domains: &DomainStore) -> bool {
        domains.is_interval(*self)
    }

    fn regret_min(&self, domains: &DomainStore) -> u32 {
        domains.regret_min(*self)
    }

    fn regret_max(&self, domains: &DomainStore) -> u32 {
        domains.regret_max(*self)
    }

    fn contains(&self, domains: &DomainStore, value: i32) -> bool {
        domains.contains(*self, value)
    }

    fn iterate_domain(&self, domains: &DomainStore) -> impl Iterator<Item = i32> {
        domains.iterate(*self)
    }

    fn set_lower_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        domains.tighten_lower_bound(*self, value)
    }

    fn set_upper_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        domains.tighten_upper_bound(*self, value)
    }

    fn remove(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        domains.remove_value(*self, value)
    }

    fn assign(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        domains.assign(*self, value)
    }

    fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        domains.intersect_ranges(*self, ranges)
    }

    fn remove_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        domains.remove_ranges(*self, ranges)
    }

    fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        domains.narrow_ranges(*self, ranges)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        watchers.watch_all(*self, events);
    }

    fn delta_event(&self, delta: &DomainDelta) -> DomainEvent {
        delta.event
    }

    fn delta_min(&self, delta: &DomainDelta) -> i32 {
        delta.min
    }

    fn delta_max(&self, delta: &DomainDelta) -> i32 {
        delta.max
    }

    fn delta_any(&self, delta: &DomainDelta) -> bool {
        delta.any
    }
}

impl TransformableVariable<AffineView<IntVarId>> for IntVarId {
    fn scaled(&self, scale: i32) -> AffineView<IntVarId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<IntVarId> {
        AffineView::new(*self, 1, offset)
    }
}

impl StorageKey for IntVarId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        IntVarId { id: index as u32 }
    }
}

impl std::fmt::Display for IntVarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for IntVarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
