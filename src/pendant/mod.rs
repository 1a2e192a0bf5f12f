mod edge;
mod pendant_device;
mod pendant_state;

pub use edge::Edge;
pub use pendant_device::{PendantDevice, Transport};
pub use pendant_state::{Button, LeftDial, PendantState, RawReport, RightDial, REPORT_LEN};
