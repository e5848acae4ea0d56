use enumset::EnumSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::Watchers;

/// The uniform interface propagators use to observe and mutate a domain.
///
/// Implementations are views: a thin, stateless transform over a variable in a [`DomainStore`].
/// Because views store variable ids rather than pointers, a view remains valid in every clone of
/// the space it was created for.
///
/// All mutations return the [`ModEvent`] describing the change, or [`EmptyDomain`] when the
/// mutation would have emptied the domain.
pub trait IntegerVariable: Clone + 'static {
    type AffineView: IntegerVariable;

    fn lower_bound(&self, domains: &DomainStore) -> i32;

    fn upper_bound(&self, domains: &DomainStore) -> i32;

    /// The median value of the domain.
    fn median(&self, domains: &DomainStore) -> i32;

    /// The value of an assigned variable. Reading the value of an unassigned variable is a
    /// programmer error and panics.
    fn value(&self, domains: &DomainStore) -> i32;

    fn is_assigned(&self, domains: &DomainStore) -> bool;

    fn size(&self, domains: &DomainStore) -> u64;

    /// `upper_bound - lower_bound + 1`.
    fn width(&self, domains: &DomainStore) -> u64;

    /// Whether the domain is a single interval without holes.
    fn is_interval(&self, domains: &DomainStore) -> bool;

    /// The distance between the lower bound and the next larger member.
    fn regret_min(&self, domains: &DomainStore) -> u32;

    /// The distance between the upper bound and the next smaller member.
    fn regret_max(&self, domains: &DomainStore) -> u32;

    fn contains(&self, domains: &DomainStore, value: i32) -> bool;

    fn iterate_domain(&self, domains: &DomainStore) -> impl Iterator<Item = i32>;

    /// Tightens the lower bound to at least `value`.
    fn set_lower_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Tightens the upper bound to at most `value`.
    fn set_upper_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Constrains the domain to values strictly greater than `value`.
    fn set_strict_lower_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        self.set_lower_bound(domains, value + 1)
    }

    /// Constrains the domain to values strictly smaller than `value`.
    fn set_strict_upper_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        self.set_upper_bound(domains, value - 1)
    }

    /// Removes a single value from the domain.
    fn remove(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain>;

    /// Assigns the domain to a single value.
    fn assign(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain>;

    /// Intersects the domain with an ascending, disjoint range set.
    fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Removes an ascending, disjoint range set from the domain.
    fn remove_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Replaces the domain by an ascending, disjoint range set, which must be a subset of the
    /// domain.
    fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Intersects the domain with an ascending value set.
    fn intersect_values<I: Iterator<Item = i32>>(
        &self,
        domains: &mut DomainStore,
        values: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.intersect_ranges(domains, ranges_from_values(values).into_iter())
    }

    /// Removes an ascending value set from the domain.
    fn remove_values<I: Iterator<Item = i32>>(
        &self,
        domains: &mut DomainStore,
        values: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.remove_ranges(domains, ranges_from_values(values).into_iter())
    }

    /// Replaces the domain by an ascending value set, which must be a subset of the domain.
    fn narrow_values<I: Iterator<Item = i32>>(
        &self,
        domains: &mut DomainStore,
        values: I,
    ) -> Result<ModEvent, EmptyDomain> {
        self.narrow_ranges(domains, ranges_from_values(values).into_iter())
    }

    /// Registers a subscription for `events` through this view. Derived views translate the
    /// event set so that it matches the events raised on the underlying variable.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);

    /// Decodes the event of a delta observed through this view.
    fn delta_event(&self, delta: &DomainDelta) -> DomainEvent;

    /// Decodes a delta to the [`ModEvent`] it corresponds to on this view.
    fn modevent(&self, delta: &DomainDelta) -> ModEvent {
        match self.delta_event(delta) {
            DomainEvent::Assign => ModEvent::Val,
            DomainEvent::LowerBound | DomainEvent::UpperBound => ModEvent::Bnd,
            DomainEvent::Removal => ModEvent::Dom,
        }
    }

    /// The smallest removed value described by a delta, in the coordinates of this view.
    fn delta_min(&self, delta: &DomainDelta) -> i32;

    /// The largest removed value described by a delta, in the coordinates of this view.
    fn delta_max(&self, delta: &DomainDelta) -> i32;

    /// Whether the delta describes a removal that is not a single contiguous range; if so,
    /// [`delta_min`](Self::delta_min) and [`delta_max`](Self::delta_max) only bound the removed
    /// values.
    fn delta_any(&self, delta: &DomainDelta) -> bool;
}

/// A variable that can be transformed into an affine view over itself.
pub trait TransformableVariable<View> {
    /// The view `scale * self`.
    fn scaled(&self, scale: i32) -> View;

    /// The view `self + offset`.
    fn offset(&self, offset: i32) -> View;

    /// The view `-self`.
    fn negated(&self) -> View {
        self.scaled(-1)
    }
}

/// Coalesces an ascending value iterator into maximal ranges.
pub(crate) fn ranges_from_values<I: Iterator<Item = i32>>(values: I) -> Vec<(i32, i32)> {
    let mut ranges: Vec<(i32, i32)> = Vec::new();
    for value in values {
        match ranges.last_mut() {
            Some(last) if last.1 + 1 == value => last.1 = value,
            _ => ranges.push((value, value)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_coalesce_into_maximal_ranges() {
        assert_eq!(
            vec![(1, 3), (5, 5), (7, 8)],
            ranges_from_values([1, 2, 3, 5, 7, 8].into_iter())
        );
        assert!(ranges_from_values(std::iter::empty()).is_empty());
    }
}
