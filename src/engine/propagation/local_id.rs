/// A propagator-local identifier of one of its subscriptions.
///
/// The value is picked by the propagator when registering and handed back on every
/// [`advise`](crate::propagation::Propagator::advise) call, so the propagator can tell which of
/// its views changed without comparing variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> Self {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
