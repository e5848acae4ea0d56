pub(crate) mod contexts;
pub(crate) mod cost;
pub(crate) mod local_id;
pub(crate) mod propagator;
pub(crate) mod queue;
pub(crate) mod store;

pub use contexts::HasDomains;
pub use contexts::PropagationContext;
pub use contexts::PropagationContextMut;
pub use contexts::PropagatorInitialisationContext;
pub use contexts::ReadDomains;
pub use cost::PropagationCost;
pub use local_id::LocalId;
pub use propagator::EnqueueDecision;
pub use propagator::Propagator;
pub(crate) use queue::PropagatorQueues;
pub use store::PropagatorId;
pub(crate) use store::PropagatorStore;
