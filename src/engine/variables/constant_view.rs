use enumset::EnumSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::variables::AffineView;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;

/// A view with the singleton domain `{c}`, without any backing store state.
///
/// Mutations succeed or fail purely based on whether they keep `c` admissible; subscriptions
/// are dropped since a constant never raises an event.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct ConstantView {
    value: i32,
}

impl ConstantView {
    pub fn new(value: i32) -> ConstantView {
        ConstantView { value }
    }
}

impl IntegerVariable for ConstantView {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, _domains: &DomainStore) -> i32 {
        self.value
    }

    fn upper_bound(&self, _domains: &DomainStore) -> i32 {
        self.value
    }

    fn median(&self, _domains: &DomainStore) -> i32 {
        self.value
    }

    fn value(&self, _domains: &DomainStore) -> i32 {
        self.value
    }

    fn is_assigned(&self, _domains: &DomainStore) -> bool {
        true
    }

    fn size(&self, _domains: &DomainStore) -> u64 {
        1
    }

    fn width(&self, _domains: &DomainStore) -> u64 {
        1
    }

    fn is_interval(&self, _domains: &DomainStore) -> bool {
        true
    }

    fn regret_min(&self, _domains: &DomainStore) -> u32 {
        0
    }

    fn regret_max(&self, _domains: &DomainStore) -> u32 {
        0
    }

    fn contains(&self, _domains: &DomainStore, value: i32) -> bool {
        value == self.value
    }

    fn iterate_domain(&self, _domains: &DomainStore) -> impl Iterator<Item = i32> {
        std::iter::once(self.value)
    }

    fn set_lower_bound(
        &self,
        _domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if value <= self.value {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn set_upper_bound(
        &self,
        _domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if value >= self.value {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn remove(&self, _domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        if value == self.value {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn assign(&self, _domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        if value == self.value {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        _domains: &mut DomainStore,
        mut ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        if ranges.any(|(start, end)| start <= self.value && self.value <= end) {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn remove_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        _domains: &mut DomainStore,
        mut ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        if ranges.any(|(start, end)| start <= self.value && self.value <= end) {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.intersect_ranges(domains, ranges)
    }

    fn watch_all(&self, _watchers: &mut Watchers<'_>, _events: EnumSet<DomainEvent>) {
        // A constant never changes, so there is nothing to watch.
    }

    fn delta_event(&self, _delta: &DomainDelta) -> DomainEvent {
        unreachable!("a constant never raises an event")
    }

    fn delta_min(&self, _delta: &DomainDelta) -> i32 {
        unreachable!("a constant never raises an event")
    }

    fn delta_max(&self, _delta: &DomainDelta) -> i32 {
        unreachable!("a constant never raises an event")
    }

    fn delta_any(&self, _delta: &DomainDelta) -> bool {
        unreachable!("a constant never raises an event")
    }
}

impl TransformableVariable<AffineView<ConstantView>> for ConstantView {
    fn scaled(&self, scale: i32) -> AffineView<ConstantView> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<ConstantView> {
        AffineView::new(*self, 1, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_keep_or_lose_the_single_value() {
        let mut domains = DomainStore::default();
        let constant = ConstantView::new(4);

        assert!(constant.is_assigned(&domains));
        assert_eq!(4, constant.value(&domains));

        assert_eq!(Ok(ModEvent::None), constant.set_lower_bound(&mut domains, 4));
        assert_eq!(Err(EmptyDomain), constant.set_lower_bound(&mut domains, 5));
        assert_eq!(Ok(ModEvent::None), constant.remove(&mut domains, 3));
        assert_eq!(Err(EmptyDomain), constant.remove(&mut domains, 4));
        assert_eq!(
            Err(EmptyDomain),
            constant.intersect_ranges(&mut domains, [(5, 9)].into_iter())
        );
    }

    #[test]
    fn a_transformed_constant_is_still_a_constant() {
        let domains = DomainStore::default();
        let constant = ConstantView::new(3).scaled(-2).offset(1);

        assert_eq!(-5, constant.lower_bound(&domains));
        assert_eq!(-5, constant.upper_bound(&domains));
        assert!(constant.is_assigned(&domains));
    }
}
