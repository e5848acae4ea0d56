use crate::basic_types::ModEvent;
use crate::butternut_assert_moderate;
use crate::butternut_assert_simple;

/// The domain of one integer variable: an interval plus a sorted list of holes.
///
/// Invariants: `lower_bound <= upper_bound`, both bounds are members, and every hole lies
/// strictly between the bounds. An emptied domain is never stored; mutations that would empty
/// the domain return [`ModEvent::Failed`] and leave the domain untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IntDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: Vec<i32>,
}

impl IntDomain {
    pub(crate) fn new(lower_bound: i32, upper_bound: i32) -> IntDomain {
        butternut_assert_simple!(
            lower_bound <= upper_bound,
            "cannot create an empty domain [{lower_bound}, {upper_bound}]"
        );
        IntDomain {
            lower_bound,
            upper_bound,
            holes: Vec::new(),
        }
    }

    /// Creates a domain from a sorted, deduplicated, non-empty list of values.
    pub(crate) fn from_values(values: &[i32]) -> IntDomain {
        butternut_assert_simple!(
            !values.is_empty(),
            "cannot create a variable with an empty domain"
        );
        butternut_assert_moderate!(values.windows(2).all(|pair| pair[0] < pair[1]));

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];
        let mut holes = Vec::new();
        for pair in values.windows(2) {
            for hole in pair[0] + 1..pair[1] {
                holes.push(hole);
            }
        }

        IntDomain {
            lower_bound,
            upper_bound,
            holes,
        }
    }

    pub(crate) fn min(&self) -> i32 {
        self.lower_bound
    }

    pub(crate) fn max(&self) -> i32 {
        self.upper_bound
    }

    pub(crate) fn size(&self) -> u64 {
        self.width() - self.holes.len() as u64
    }

    pub(crate) fn width(&self) -> u64 {
        (self.upper_bound as i64 - self.lower_bound as i64 + 1) as u64
    }

    pub(crate) fn is_assigned(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    /// Whether the domain is a single interval without holes.
    pub(crate) fn is_interval(&self) -> bool {
        self.holes.is_empty()
    }

    /// The value of an assigned domain.
    pub(crate) fn value(&self) -> i32 {
        butternut_assert_simple!(
            self.is_assigned(),
            "the value of an unassigned variable is undefined"
        );
        self.lower_bound
    }

    pub(crate) fn contains(&self, value: i32) -> bool {
        value >= self.lower_bound
            && value <= self.upper_bound
            && self.holes.binary_search(&value).is_err()
    }

    /// The median value of the domain; for an even size the lower middle value.
    pub(crate) fn median(&self) -> i32 {
        let middle = (self.size() - 1) / 2;
        if self.is_interval() {
            (self.lower_bound as i64 + middle as i64) as i32
        } else {
            self.iter()
                .nth(middle as usize)
                .expect("the domain is never empty")
        }
    }

    /// The distance between the lower bound and the next larger member.
    pub(crate) fn regret_min(&self) -> u32 {
        if self.is_assigned() {
            return 0;
        }
        let mut next = self.lower_bound + 1;
        while self.holes.binary_search(&next).is_ok() {
            next += 1;
        }
        (next - self.lower_bound) as u32
    }

    /// The distance between the upper bound and the next smaller member.
    pub(crate) fn regret_max(&self) -> u32 {
        if self.is_assigned() {
            return 0;
        }
        let mut previous = self.upper_bound - 1;
        while self.holes.binary_search(&previous).is_ok() {
            previous -= 1;
        }
        (self.upper_bound - previous) as u32
    }

    /// Iterates the members of the domain in ascending order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (self.lower_bound..=self.upper_bound).filter(|value| self.holes.binary_search(value).is_err())
    }

    /// The maximal ranges of the domain, ascending and disjoint.
    pub(crate) fn ranges(&self) -> Vec<(i32, i32)> {
        let mut ranges = Vec::with_capacity(self.holes.len() + 1);
        let mut start = self.lower_bound;
        for &hole in &self.holes {
            if hole > start {
                ranges.push((start, hole - 1));
            }
            start = hole + 1;
        }
        ranges.push((start, self.upper_bound));
        ranges
    }

    pub(crate) fn tighten_lower_bound(&mut self, value: i32) -> ModEvent {
        if value <= self.lower_bound {
            return ModEvent::None;
        }
        if value > self.upper_bound {
            return ModEvent::Failed;
        }

        let mut new_min = value;
        while self.holes.binary_search(&new_min).is_ok() {
            new_min += 1;
        }
        self.holes.retain(|&hole| hole > new_min);
        self.lower_bound = new_min;

        if self.is_assigned() {
            ModEvent::Val
        } else {
            ModEvent::Bnd
        }
    }

    pub(crate) fn tighten_upper_bound(&mut self, value: i32) -> ModEvent {
        if value >= self.upper_bound {
            return ModEvent::None;
        }
        if value < self.lower_bound {
            return ModEvent::Failed;
        }

        let mut new_max = value;
        while self.holes.binary_search(&new_max).is_ok() {
            new_max -= 1;
        }
        self.holes.retain(|&hole| hole < new_max);
        self.upper_bound = new_max;

        if self.is_assigned() {
            ModEvent::Val
        } else {
            ModEvent::Bnd
        }
    }

    pub(crate) fn remove_value(&mut self, value: i32) -> ModEvent {
        if !self.contains(value) {
            return ModEvent::None;
        }
        if self.is_assigned() {
            return ModEvent::Failed;
        }
        if value == self.lower_bound {
            return self.tighten_lower_bound(value + 1);
        }
        if value == self.upper_bound {
            return self.tighten_upper_bound(value - 1);
        }

        let position = self
            .holes
            .binary_search(&value)
            .expect_err("an interior member is not a hole");
        self.holes.insert(position, value);
        ModEvent::Dom
    }

    pub(crate) fn assign(&mut self, value: i32) -> ModEvent {
        if !self.contains(value) {
            return ModEvent::Failed;
        }
        if self.is_assigned() {
            return ModEvent::None;
        }
        self.lower_bound = value;
        self.upper_bound = value;
        self.holes.clear();
        ModEvent::Val
    }

    /// Replaces the domain by its intersection with the given range set.
    pub(crate) fn intersect_ranges<I: Iterator<Item = (i32, i32)>>(&mut self, other: I) -> ModEvent {
        let other = normalised(other);
        let result = intersection(&self.ranges(), &other);
        self.install(&result)
    }

    /// Removes every value of the given range set from the domain.
    pub(crate) fn remove_ranges<I: Iterator<Item = (i32, i32)>>(&mut self, other: I) -> ModEvent {
        let other = normalised(other);
        let result = difference(&self.ranges(), &other);
        self.install(&result)
    }

    /// Replaces the domain by the given range set, which must be a subset of the domain.
    pub(crate) fn narrow_ranges<I: Iterator<Item = (i32, i32)>>(&mut self, other: I) -> ModEvent {
        let other = normalised(other);
        butternut_assert_moderate!(
            difference(&other, &self.ranges()).is_empty(),
            "narrowing requires a subset of the current domain"
        );
        let result = intersection(&self.ranges(), &other);
        self.install(&result)
    }

    /// Installs a new set of ranges, assumed to be a subset of the current domain, and reports
    /// the resulting event.
    fn install(&mut self, ranges: &[(i32, i32)]) -> ModEvent {
        if ranges.is_empty() {
            return ModEvent::Failed;
        }

        let new_min = ranges[0].0;
        let new_max = ranges[ranges.len() - 1].1;
        let new_size: u64 = ranges
            .iter()
            .map(|&(start, end)| (end as i64 - start as i64 + 1) as u64)
            .sum();
        if new_size == self.size() {
            return ModEvent::None;
        }

        // Interior removal is any shrinkage the new bounds do not account for.
        let old_interior = self
            .holes
            .iter()
            .filter(|&&hole| hole > new_min && hole < new_max)
            .count() as u64;
        let new_width = (new_max as i64 - new_min as i64 + 1) as u64;
        let interior_removed = new_size < new_width - old_interior;

        self.lower_bound = new_min;
        self.upper_bound = new_max;
        self.holes.clear();
        for pair in ranges.windows(2) {
            for hole in pair[0].1 + 1..pair[1].0 {
                self.holes.push(hole);
            }
        }

        if new_size == 1 {
            ModEvent::Val
        } else if interior_removed {
            ModEvent::Dom
        } else {
            ModEvent::Bnd
        }
    }
}

fn normalised<I: Iterator<Item = (i32, i32)>>(ranges: I) -> Vec<(i32, i32)> {
    let ranges: Vec<(i32, i32)> = ranges.collect();
    butternut_assert_moderate!(
        ranges.iter().all(|&(start, end)| start <= end)
            && ranges.windows(2).all(|pair| pair[0].1 < pair[1].0),
        "range iterators must be ascending and disjoint"
    );
    ranges
}

fn intersection(a: &[(i32, i32)], b: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let lo = a[i].0.max(b[j].0);
        let hi = a[i].1.min(b[j].1);
        if lo <= hi {
            out.push((lo, hi));
        }
        if a[i].1 < b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

fn difference(a: &[(i32, i32)], b: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    let mut j = 0;
    for &(start, end) in a {
        let mut lo = start;
        loop {
            while j < b.len() && b[j].1 < lo {
                j += 1;
            }
            if j == b.len() || b[j].0 > end {
                out.push((lo, end));
                break;
            }
            if b[j].0 > lo {
                out.push((lo, b[j].0 - 1));
            }
            if b[j].1 >= end {
                break;
            }
            lo = b[j].1 + 1;
            j += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_domain_is_an_interval() {
        let domain = IntDomain::new(1, 4);
        assert_eq!(1, domain.min());
        assert_eq!(4, domain.max());
        assert_eq!(4, domain.size());
        assert!(domain.is_interval());
        assert!(!domain.is_assigned());
    }

    #[test]
    fn sparse_construction_creates_holes() {
        let domain = IntDomain::from_values(&[1, 3, 7]);
        assert_eq!(1, domain.min());
        assert_eq!(7, domain.max());
        assert_eq!(3, domain.size());
        assert!(!domain.is_interval());
        assert!(domain.contains(3));
        assert!(!domain.contains(4));
        assert_eq!(vec![(1, 1), (3, 3), (7, 7)], domain.ranges());
    }

    #[test]
    fn tightening_a_bound_skips_holes() {
        let mut domain = IntDomain::from_values(&[1, 2, 5, 9]);
        assert_eq!(ModEvent::Bnd, domain.tighten_lower_bound(3));
        assert_eq!(5, domain.min());

        assert_eq!(ModEvent::Val, domain.tighten_upper_bound(8));
        assert_eq!(5, domain.value());
    }

    #[test]
    fn tightening_past_the_opposite_bound_fails() {
        let mut domain = IntDomain::new(0, 3);
        assert_eq!(ModEvent::Failed, domain.tighten_lower_bound(4));
        // The domain is untouched after a failed mutation.
        assert_eq!(0, domain.min());
        assert_eq!(3, domain.max());
    }

    #[test]
    fn removing_values_reports_the_strongest_change() {
        let mut domain = IntDomain::new(0, 4);
        assert_eq!(ModEvent::Dom, domain.remove_value(2));
        assert_eq!(ModEvent::Bnd, domain.remove_value(0));
        assert_eq!(ModEvent::None, domain.remove_value(0));
        assert_eq!(ModEvent::Bnd, domain.remove_value(4));
        // {1, 3} remains; removing a bound of a two-element domain assigns it.
        assert_eq!(ModEvent::Val, domain.remove_value(3));
        assert_eq!(1, domain.value());
        assert_eq!(ModEvent::Failed, domain.remove_value(1));
    }

    #[test]
    fn removing_a_bound_adjacent_to_holes_skips_them() {
        let mut domain = IntDomain::from_values(&[0, 2, 3]);
        assert_eq!(ModEvent::Bnd, domain.remove_value(0));
        assert_eq!(2, domain.min());
        assert!(domain.is_interval());
    }

    #[test]
    fn assignment_outside_the_domain_fails() {
        let mut domain = IntDomain::from_values(&[0, 2, 4]);
        assert_eq!(ModEvent::Failed, domain.assign(3));
        assert_eq!(ModEvent::Val, domain.assign(2));
        assert_eq!(ModEvent::None, domain.assign(2));
    }

    #[test]
    fn median_and_regrets() {
        let domain = IntDomain::from_values(&[0, 1, 5, 6, 7]);
        assert_eq!(5, domain.median());
        assert_eq!(1, domain.regret_min());
        assert_eq!(1, domain.regret_max());

        let domain = IntDomain::from_values(&[0, 4, 9]);
        assert_eq!(4, domain.median());
        assert_eq!(4, domain.regret_min());
        assert_eq!(5, domain.regret_max());
    }

    #[test]
    fn intersection_with_ranges() {
        let mut domain = IntDomain::new(0, 9);
        assert_eq!(
            ModEvent::Dom,
            domain.intersect_ranges([(0, 2), (5, 6)].into_iter())
        );
        assert_eq!(5, domain.size());
        assert_eq!(vec![(0, 2), (5, 6)], domain.ranges());

        assert_eq!(
            ModEvent::Bnd,
            domain.intersect_ranges([(1, 8)].into_iter())
        );
        assert_eq!(vec![(1, 2), (5, 6)], domain.ranges());

        assert_eq!(ModEvent::None, domain.intersect_ranges([(0, 9)].into_iter()));
        assert_eq!(
            ModEvent::Failed,
            domain.intersect_ranges([(3, 4)].into_iter())
        );
    }

    #[test]
    fn removal_of_ranges() {
        let mut domain = IntDomain::new(0, 9);
        assert_eq!(
            ModEvent::Dom,
            domain.remove_ranges([(3, 4), (8, 8)].into_iter())
        );
        assert_eq!(vec![(0, 2), (5, 7), (9, 9)], domain.ranges());

        assert_eq!(ModEvent::Bnd, domain.remove_ranges([(9, 12)].into_iter()));
        assert_eq!(7, domain.max());

        assert_eq!(
            ModEvent::Failed,
            domain.remove_ranges([(-5, 20)].into_iter())
        );
    }

    #[test]
    fn narrowing_to_a_subset() {
        let mut domain = IntDomain::new(0, 9);
        assert_eq!(ModEvent::Val, domain.narrow_ranges([(4, 4)].into_iter()));
        assert_eq!(4, domain.value());
    }

    #[test]
    fn iteration_skips_holes() {
        let domain = IntDomain::from_values(&[-2, 0, 1, 4]);
        let values: Vec<i32> = domain.iter().collect();
        assert_eq!(vec![-2, 0, 1, 4], values);
    }
}
