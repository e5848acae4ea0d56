use std::fmt::Display;

use enumset::EnumSet;

use crate::engine::notifications::DomainEvent;

/// The outcome of a domain mutation, totally ordered by how general the change is.
///
/// The ordering is `None < Val < Bnd < Dom`, with [`ModEvent::Failed`] absorbing everything: an
/// assignment is the most specific change (the domain collapsed to a single value), a bound
/// update is more general, and an interior removal is the most general shape a domain can take.
/// Every mutation reports an event at least as strong as the strongest individual change it
/// performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModEvent {
    /// The mutation did not change the domain.
    None,
    /// The domain collapsed to a single value.
    Val,
    /// A bound of the domain was tightened.
    Bnd,
    /// A value strictly between the bounds was removed.
    Dom,
    /// The mutation emptied the domain.
    Failed,
}

impl ModEvent {
    /// The join of two events is the more general one; [`ModEvent::Failed`] is absorbing.
    pub fn join(self, other: ModEvent) -> ModEvent {
        self.max(other)
    }

    pub fn is_failed(self) -> bool {
        self == ModEvent::Failed
    }

    /// Whether the mutation changed the domain at all.
    pub fn has_changed(self) -> bool {
        self != ModEvent::None
    }
}

impl Display for ModEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModEvent::None => write!(f, "[ModEvent:None]"),
            ModEvent::Val => write!(f, "[ModEvent:Val]"),
            ModEvent::Bnd => write!(f, "[ModEvent:Bnd]"),
            ModEvent::Dom => write!(f, "[ModEvent:Dom]"),
            ModEvent::Failed => write!(f, "[ModEvent:Failed]"),
        }
    }
}

/// The join of all [`DomainEvent`]s a propagator has observed since it last ran.
///
/// The scheduler accumulates the precise events raised by the subscribed views; a propagator
/// reads the delta at the start of [`propagate`](crate::propagation::Propagator::propagate) to
/// decide how much work it has to redo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModEventDelta {
    events: EnumSet<DomainEvent>,
}

impl ModEventDelta {
    /// The delta containing every event, used when a propagator is scheduled for the first time.
    pub fn everything() -> ModEventDelta {
        ModEventDelta {
            events: EnumSet::all(),
        }
    }

    pub fn is_empty(self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(self, event: DomainEvent) -> bool {
        self.events.contains(event)
    }

    pub(crate) fn join(&mut self, events: EnumSet<DomainEvent>) {
        self.events |= events;
    }

    /// Collapse the delta to the strongest [`ModEvent`] it implies.
    pub fn modevent(self) -> ModEvent {
        if self.events.contains(DomainEvent::Removal) {
            ModEvent::Dom
        } else if self.events.contains(DomainEvent::LowerBound)
            || self.events.contains(DomainEvent::UpperBound)
        {
            ModEvent::Bnd
        } else if self.events.contains(DomainEvent::Assign) {
            ModEvent::Val
        } else {
            ModEvent::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_takes_the_more_general_event() {
        assert_eq!(ModEvent::Bnd, ModEvent::Val.join(ModEvent::Bnd));
        assert_eq!(ModEvent::Dom, ModEvent::Dom.join(ModEvent::Bnd));
        assert_eq!(ModEvent::Val, ModEvent::None.join(ModEvent::Val));
    }

    #[test]
    fn failed_is_absorbing() {
        assert_eq!(ModEvent::Failed, ModEvent::Failed.join(ModEvent::Dom));
        assert_eq!(ModEvent::Failed, ModEvent::None.join(ModEvent::Failed));
    }

    #[test]
    fn delta_collapses_to_the_strongest_event() {
        let mut delta = ModEventDelta::default();
        assert_eq!(ModEvent::None, delta.modevent());

        delta.join(DomainEvent::Assign.into());
        assert_eq!(ModEvent::Val, delta.modevent());

        delta.join(DomainEvent::LowerBound.into());
        assert_eq!(ModEvent::Bnd, delta.modevent());

        delta.join(DomainEvent::Removal.into());
        assert_eq!(ModEvent::Dom, delta.modevent());
    }
}
