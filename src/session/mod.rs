pub mod label_session;
pub mod working_set;

pub use label_session::LabelSession;
pub use working_set::{AddOutcome, WorkingSet};
