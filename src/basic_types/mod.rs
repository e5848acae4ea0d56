mod constraint_operation_error;
mod mod_event;
mod propagation_status;
mod space_status;

pub use constraint_operation_error::*;
pub use mod_event::*;
pub use propagation_status::*;
pub use space_status::*;
