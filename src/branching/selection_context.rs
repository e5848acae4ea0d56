use crate::engine::domains::DomainStore;
use crate::engine::propagation::HasDomains;
#[cfg(doc)]
use crate::engine::propagation::ReadDomains;

/// Read-only view of the domains handed to branchers and selectors; all queries come from the
/// blanket [`ReadDomains`] implementation.
#[derive(Clone, Copy, Debug)]
pub struct SelectionContext<'a> {
    domains: &'a DomainStore,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(domains: &'a DomainStore) -> Self {
        SelectionContext { domains }
    }
}

impl HasDomains for SelectionContext<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}
