use std::fmt::Debug;

use crate::basic_types::ModEventDelta;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::propagation::Propagator;
use crate::engine::variables::IntVarId;

/// An id of a propagator within the store of its space, stable across clones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropagatorId(pub(crate) u32);

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

impl std::fmt::Display for PropagatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// One propagator together with its scheduling state.
///
/// A subsumed propagator leaves an empty slot behind; the slot is never reused so that ids
/// stay stable, and it stays empty in every clone of the space.
pub(crate) struct PropagatorSlot {
    pub(crate) propagator: Option<Box<dyn Propagator>>,
    pub(crate) enqueued: bool,
    pub(crate) delta: ModEventDelta,
    /// The variables this propagator subscribed to, kept for unsubscription on subsumption.
    pub(crate) subscriptions: Vec<IntVarId>,
}

/// A central store for propagators; the allocation region for propagator state.
#[derive(Default)]
pub(crate) struct PropagatorStore {
    pub(crate) slots: KeyedVec<PropagatorId, PropagatorSlot>,
}

impl PropagatorStore {
    pub(crate) fn alloc(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        self.slots.push(PropagatorSlot {
            propagator: Some(propagator),
            enqueued: false,
            delta: ModEventDelta::default(),
            subscriptions: Vec::new(),
        })
    }

    /// The number of propagators that have not been subsumed.
    pub(crate) fn num_active(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.propagator.is_some())
            .count()
    }

    pub(crate) fn clone_with(&self, share: bool) -> PropagatorStore {
        let mut slots = KeyedVec::default();
        for slot in self.slots.iter() {
            let _ = slots.push(PropagatorSlot {
                propagator: slot
                    .propagator
                    .as_ref()
                    .map(|propagator| propagator.clone_boxed(share)),
                enqueued: slot.enqueued,
                delta: slot.delta,
                subscriptions: slot.subscriptions.clone(),
            });
        }
        PropagatorStore { slots }
    }
}

impl Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self
            .slots
            .iter()
            .map(|slot| {
                slot.propagator
                    .as_ref()
                    .map_or("<subsumed>", |propagator| propagator.name())
            })
            .collect();

        write!(f, "{names:?}")
    }
}
