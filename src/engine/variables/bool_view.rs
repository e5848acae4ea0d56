use enumset::EnumSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::variables::AffineView;
use crate::engine::variables::IntVarId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;

/// A 0/1 integer variable presented as a Boolean.
///
/// The view adds truth-value sugar on top of the integer interface; the logical complement is
/// the affine transform `1 - x` over the same variable, so a view and its complement always
/// agree. The complement is distinct from [`TransformableVariable::negated`], which is the
/// arithmetic view `-x`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct BoolView {
    view: AffineView<IntVarId>,
}

impl BoolView {
    pub(crate) fn new(variable: IntVarId) -> BoolView {
        BoolView {
            view: AffineView::new(variable, 1, 0),
        }
    }

    /// The view representing the logical complement of this one.
    pub fn complement(&self) -> BoolView {
        BoolView {
            view: self.view.scaled(-1).offset(1),
        }
    }

    pub fn is_true(&self, domains: &DomainStore) -> bool {
        self.view.lower_bound(domains) == 1
    }

    pub fn is_false(&self, domains: &DomainStore) -> bool {
        self.view.upper_bound(domains) == 0
    }

    pub fn fix(&self, domains: &mut DomainStore, value: bool) -> Result<ModEvent, EmptyDomain> {
        self.view.assign(domains, i32::from(value))
    }
}

impl IntegerVariable for BoolView {
    type AffineView = AffineView<BoolView>;

    fn lower_bound(&self, domains: &DomainStore) -> i32 {
        self.view.lower_bound(domains)
    }

    fn upper_bound(&self, domains: &DomainStore) -> i32 {
        self.view.upper_bound(domains)
    }

    fn median(&self, domains: &DomainStore) -> i32 {
        self.view.median(domains)
    }

    fn value(&self, domains: &DomainStore) -> i32 {
        self.view.value(domains)
    }

    fn is_assigned(&self, domains: &DomainStore) -> bool {
        self.view.is_assigned(domains)
    }

    fn size(&self, domains: &DomainStore) -> u64 {
        self.view.size(domains)
    }

    fn width(&self, domains: &DomainStore) -> u64 {
        self.view.width(domains)
    }

    fn is_interval(&self, domains: &DomainStore) -> bool {
        self.view.is_interval(domains)
    }

    fn regret_min(&self, domains: &DomainStore) -> u32 {
        self.view.regret_min(domains)
    }

    fn regret_max(&self, domains: &DomainStore) -> u32 {
        self.view.regret_max(domains)
    }

    fn contains(&self, domains: &DomainStore, value: i32) -> bool {
        self.view.contains(domains, value)
    }

    fn iterate_domain(&self, domains: &DomainStore) -> impl Iterator<Item = i32> {
        self.view.iterate_domain(domains)
    }

    fn set_lower_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        self.view.set_lower_bound(domains, value)
    }

    fn set_upper_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        self.view.set_upper_bound(domains, value)
    }

    fn remove(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        self.view.remove(domains, value)
    }

    fn assign(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        self.view.assign(domains, value)
    }

    fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.view.intersect_ranges(domains, ranges)
    }

    fn remove_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.view.remove_ranges(domains, ranges)
    }

    fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.view.narrow_ranges(domains, ranges)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        self.view.watch_all(watchers, events);
    }

    fn delta_event(&self, delta: &DomainDelta) -> DomainEvent {
        self.view.delta_event(delta)
    }

    fn delta_min(&self, delta: &DomainDelta) -> i32 {
        self.view.delta_min(delta)
    }

    fn delta_max(&self, delta: &DomainDelta) -> i32 {
        self.view.delta_max(delta)
    }

    fn delta_any(&self, delta: &DomainDelta) -> bool {
        self.view.delta_any(delta)
    }
}

impl TransformableVariable<AffineView<BoolView>> for BoolView {
    fn scaled(&self, scale: i32) -> AffineView<BoolView> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<BoolView> {
        AffineView::new(*self, 1, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixing_a_view_fixes_its_complement() {
        let mut domains = DomainStore::default();
        let variable = domains.grow(0, 1);
        let view = BoolView::new(variable);
        let complement = view.complement();

        assert!(!view.is_true(&domains) && !view.is_false(&domains));

        let _ = view.fix(&mut domains, true).expect("non-empty");
        assert!(view.is_true(&domains));
        assert!(complement.is_false(&domains));
        assert_eq!(0, complement.value(&domains));
    }

    #[test]
    fn double_complement_is_the_identity() {
        let mut domains = DomainStore::default();
        let variable = domains.grow(0, 1);
        let view = BoolView::new(variable);

        let _ = view
            .complement()
            .complement()
            .fix(&mut domains, false)
            .expect("non-empty");
        assert!(view.is_false(&domains));
    }
}
