mod delta;
mod domain_event;
mod domain_events;
mod watch_list;

pub use delta::*;
pub use domain_event::*;
pub use domain_events::*;
pub use watch_list::*;
