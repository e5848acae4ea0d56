use crate::engine::notifications::DomainEvent;

/// A precise description of a single domain mutation, delivered to advised subscriptions.
///
/// For a bound update or a single removal, `min..=max` is the contiguous range of values that
/// left the domain. For assignments and bulk updates the removed values are not contiguous;
/// `any` is set and `min`/`max` are the bounds of the domain before the mutation.
///
/// A delta is decoded through the view it was observed on
/// (see [`IntegerVariable::modevent`](crate::variables::IntegerVariable::modevent)), never
/// inspected directly, so that derived views can undo their transform.
#[derive(Clone, Copy, Debug)]
pub struct DomainDelta {
    pub(crate) event: DomainEvent,
    pub(crate) min: i32,
    pub(crate) max: i32,
    pub(crate) any: bool,
}

impl DomainDelta {
    pub(crate) fn range(event: DomainEvent, min: i32, max: i32) -> DomainDelta {
        DomainDelta {
            event,
            min,
            max,
            any: false,
        }
    }

    pub(crate) fn any(event: DomainEvent, old_min: i32, old_max: i32) -> DomainDelta {
        DomainDelta {
            event,
            min: old_min,
            max: old_max,
            any: true,
        }
    }
}
