use std::cmp::Ordering;

use enumset::EnumSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::ModEvent;
use crate::butternut_assert_simple;
use crate::engine::domains::DomainStore;
use crate::engine::notifications::DomainDelta;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;
use crate::math::num_ext::NumExt;

/// Models the view `y = ax + b`, by expressing the domain of `y` as a transformation of the
/// domain of `x`.
///
/// A scale of `-1` is the minus view, a scale of `1` with a non-zero offset the offset view.
/// The view carries no domain state; all operations delegate to the inner variable after
/// transforming their argument, and bound operations swap direction when the scale is negative.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        butternut_assert_simple!(scale != 0, "an affine view requires a non-zero scale");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    /// Apply the inverse transformation of this view on a value, to go from the value in the
    /// domain of `self` to a value in the domain of `self.inner`.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let inverted_translation = value - self.offset;

        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(inverted_translation, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(inverted_translation, self.scale),
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, domains: &DomainStore) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(domains))
        } else {
            self.map(self.inner.lower_bound(domains))
        }
    }

    fn upper_bound(&self, domains: &DomainStore) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(domains))
        } else {
            self.map(self.inner.upper_bound(domains))
        }
    }

    fn median(&self, domains: &DomainStore) -> i32 {
        self.map(self.inner.median(domains))
    }

    fn value(&self, domains: &DomainStore) -> i32 {
        self.map(self.inner.value(domains))
    }

    fn is_assigned(&self, domains: &DomainStore) -> bool {
        self.inner.is_assigned(domains)
    }

    fn size(&self, domains: &DomainStore) -> u64 {
        self.inner.size(domains)
    }

    fn width(&self, domains: &DomainStore) -> u64 {
        (self.upper_bound(domains) as i64 - self.lower_bound(domains) as i64 + 1) as u64
    }

    fn is_interval(&self, domains: &DomainStore) -> bool {
        // A scale beyond +-1 spreads the domain out and introduces gaps.
        self.scale.abs() == 1 && self.inner.is_interval(domains)
    }

    fn regret_min(&self, domains: &DomainStore) -> u32 {
        if self.scale < 0 {
            self.inner.regret_max(domains) * self.scale.unsigned_abs()
        } else {
            self.inner.regret_min(domains) * self.scale as u32
        }
    }

    fn regret_max(&self, domains: &DomainStore) -> u32 {
        if self.scale < 0 {
            self.inner.regret_min(domains) * self.scale.unsigned_abs()
        } else {
            self.inner.regret_max(domains) * self.scale as u32
        }
    }

    fn contains(&self, domains: &DomainStore, value: i32) -> bool {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.contains(domains, inverted)
        } else {
            false
        }
    }

    fn iterate_domain(&self, domains: &DomainStore) -> impl Iterator<Item = i32> {
        let scale = self.scale;
        let offset = self.offset;
        self.inner
            .iterate_domain(domains)
            .map(move |value| scale * value + offset)
    }

    fn set_lower_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.scale >= 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(domains, inverted)
        } else {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(domains, inverted)
        }
    }

    fn set_upper_bound(
        &self,
        domains: &mut DomainStore,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.scale >= 0 {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(domains, inverted)
        } else {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(domains, inverted)
        }
    }

    fn remove(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.remove(domains, inverted)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn assign(&self, domains: &mut DomainStore, value: i32) -> Result<ModEvent, EmptyDomain> {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.assign(domains, inverted)
        } else {
            Err(EmptyDomain)
        }
    }

    fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        match self.scale {
            1 => {
                let offset = self.offset;
                self.inner.intersect_ranges(
                    domains,
                    ranges.map(move |(start, end)| (start - offset, end - offset)),
                )
            }
            -1 => self
                .inner
                .intersect_ranges(domains, negated_ranges(self.offset, ranges).into_iter()),
            _ => {
                let ranges: Vec<(i32, i32)> = ranges.collect();
                let keep: Vec<i32> = self
                    .inner
                    .iterate_domain(domains)
                    .filter(|&value| range_set_contains(&ranges, self.map(value)))
                    .collect();
                self.inner.narrow_values(domains, keep.into_iter())
            }
        }
    }

    fn remove_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        match self.scale {
            1 => {
                let offset = self.offset;
                self.inner.remove_ranges(
                    domains,
                    ranges.map(move |(start, end)| (start - offset, end - offset)),
                )
            }
            -1 => self
                .inner
                .remove_ranges(domains, negated_ranges(self.offset, ranges).into_iter()),
            _ => {
                let ranges: Vec<(i32, i32)> = ranges.collect();
                let keep: Vec<i32> = self
                    .inner
                    .iterate_domain(domains)
                    .filter(|&value| !range_set_contains(&ranges, self.map(value)))
                    .collect();
                self.inner.narrow_values(domains, keep.into_iter())
            }
        }
    }

    fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(
        &self,
        domains: &mut DomainStore,
        ranges: I,
    ) -> Result<ModEvent, EmptyDomain> {
        match self.scale {
            1 => {
                let offset = self.offset;
                self.inner.narrow_ranges(
                    domains,
                    ranges.map(move |(start, end)| (start - offset, end - offset)),
                )
            }
            -1 => self
                .inner
                .narrow_ranges(domains, negated_ranges(self.offset, ranges).into_iter()),
            _ => self.intersect_ranges(domains, ranges),
        }
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<DomainEvent>) {
        let bound = DomainEvent::LowerBound | DomainEvent::UpperBound;
        let intersection = events.intersection(bound);
        if intersection.len() == 1 && self.scale.is_negative() {
            events = events.symmetrical_difference(bound);
        }
        self.inner.watch_all(watchers, events);
    }

    fn delta_event(&self, delta: &DomainDelta) -> DomainEvent {
        if self.scale.is_negative() {
            match self.inner.delta_event(delta) {
                DomainEvent::LowerBound => DomainEvent::UpperBound,
                DomainEvent::UpperBound => DomainEvent::LowerBound,
                event => event,
            }
        } else {
            self.inner.delta_event(delta)
        }
    }

    fn delta_min(&self, delta: &DomainDelta) -> i32 {
        self.map(self.inner.delta_min(delta))
            .min(self.map(self.inner.delta_max(delta)))
    }

    fn delta_max(&self, delta: &DomainDelta) -> i32 {
        self.map(self.inner.delta_min(delta))
            .max(self.map(self.inner.delta_max(delta)))
    }

    fn delta_any(&self, delta: &DomainDelta) -> bool {
        // A scale beyond +-1 spreads a contiguous removed range into scattered values.
        self.inner.delta_any(delta) || self.scale.abs() != 1
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

/// Maps view-coordinate ranges through `value -> offset - value` and restores ascending order.
fn negated_ranges<I: Iterator<Item = (i32, i32)>>(offset: i32, ranges: I) -> Vec<(i32, i32)> {
    let mut mapped: Vec<(i32, i32)> = ranges
        .map(|(start, end)| (offset - end, offset - start))
        .collect();
    mapped.reverse();
    mapped
}

fn range_set_contains(ranges: &[(i32, i32)], value: i32) -> bool {
    match ranges.binary_search_by(|&(start, _)| start.cmp(&value)) {
        Ok(_) => true,
        Err(0) => false,
        Err(position) => ranges[position - 1].1 >= value,
    }
}

enum Rounding {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::IntVarId;

    #[test]
    fn scaling_an_affine_view() {
        let view = AffineView::new(IntVarId::new(0), 3, 4);
        let scaled_view = view.scaled(6);
        assert_eq!(18, scaled_view.scale);
        assert_eq!(24, scaled_view.offset);
    }

    #[test]
    fn offsetting_an_affine_view() {
        let view = AffineView::new(IntVarId::new(0), 3, 4);
        let offset_view = view.offset(6);
        assert_eq!(3, offset_view.scale);
        assert_eq!(10, offset_view.offset);
    }

    #[test]
    fn a_minus_view_swaps_the_bounds() {
        let mut domains = DomainStore::default();
        let x = domains.grow(-3, 5);
        let view = x.negated();

        assert_eq!(-5, view.lower_bound(&domains));
        assert_eq!(3, view.upper_bound(&domains));

        let _ = view.set_lower_bound(&mut domains, -4).expect("non-empty");
        assert_eq!(4, x.upper_bound(&domains));
    }

    #[test]
    fn a_scaled_view_rounds_optimistically_into_the_inner_domain() {
        let mut domains = DomainStore::default();
        let x = domains.grow(-4, 4);
        let view = x.scaled(2);

        let _ = view.set_lower_bound(&mut domains, -3).expect("non-empty");
        assert_eq!(-1, x.lower_bound(&domains));

        let _ = view.set_upper_bound(&mut domains, 5).expect("non-empty");
        assert_eq!(2, x.upper_bound(&domains));
    }

    #[test]
    fn membership_requires_divisibility() {
        let mut domains = DomainStore::default();
        let x = domains.grow(0, 4);
        let view = x.scaled(2).offset(1);

        assert!(view.contains(&domains, 3));
        assert!(!view.contains(&domains, 4));
        // Removing a value not in the image of the transform is a no-op.
        assert_eq!(Ok(ModEvent::None), view.remove(&mut domains, 4));
        // Assigning one is a wipeout.
        assert_eq!(Err(EmptyDomain), view.assign(&mut domains, 4));
    }

    #[test]
    fn intersecting_through_a_scaled_view() {
        let mut domains = DomainStore::default();
        let x = domains.grow(0, 6);
        let view = x.scaled(3);

        // View domain is {0, 3, .., 18}; keep the part in [5, 13].
        let event = view
            .intersect_ranges(&mut domains, [(5, 13)].into_iter())
            .expect("non-empty");
        assert_eq!(ModEvent::Bnd, event);
        assert_eq!(2, x.lower_bound(&domains));
        assert_eq!(4, x.upper_bound(&domains));
    }

    #[test]
    fn removing_ranges_through_a_minus_view() {
        let mut domains = DomainStore::default();
        let x = domains.grow(0, 5);
        let view = x.negated();

        let event = view
            .remove_ranges(&mut domains, [(-5, -4), (0, 2)].into_iter())
            .expect("non-empty");
        assert_eq!(ModEvent::Bnd, event);
        assert_eq!(1, x.lower_bound(&domains));
        assert_eq!(3, x.upper_bound(&domains));
    }
}
