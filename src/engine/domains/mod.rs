mod domain_store;
mod int_domain;

pub use domain_store::DomainStore;
pub(crate) use int_domain::IntDomain;
