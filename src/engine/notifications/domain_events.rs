use enumset::enum_set;
use enumset::EnumSet;

use crate::engine::notifications::DomainEvent;

impl DomainEvents {
    /// DomainEvents with both lower and upper bound tightening (but not other value removal).
    pub const BOUNDS: DomainEvents = DomainEvents::create(enum_set!(
        DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    /// DomainEvents with lower and upper bound tightening, assigning to a single value, and
    /// single value removal.
    pub const ANY: DomainEvents = DomainEvents::create(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    /// DomainEvents with only lower bound tightening.
    pub const LOWER_BOUND: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::LowerBound));
    /// DomainEvents with only upper bound tightening.
    pub const UPPER_BOUND: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::UpperBound));
    /// DomainEvents with only assigning to a single value.
    pub const ASSIGN: DomainEvents = DomainEvents::create(enum_set!(DomainEvent::Assign));
}

/// A named set of [`DomainEvent`]s used when subscribing a propagator to a view.
#[derive(Debug, Copy, Clone)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    pub(crate) const fn create(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn get(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
