pub mod alert;
pub mod status;

pub use alert::AlertEvent;
pub use status::{IndicatorCommand, IndicatorStatus, REASON_TABLE};
