//! Driver for USB MPG jog pendants.
//!
//! Raw reports are decoded into [`PendantState`], the [`JogController`]
//! turns that state and the machine conditions into jog, zero and feed
//! override actions plus a status line, and [`PendantDriver`] ties both to a
//! [`Transport`] and a machine back end.

pub mod axis;
pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod jog_controller;
pub mod machine;
pub mod pendant;
pub mod simulated_machine;

pub use axis::{ActuatorId, Axis, AxisTable};
pub use config::Config;
pub use driver::PendantDriver;
pub use error::{PendantError, Result};
pub use jog_controller::{ActionOutputs, JogController, JogScale, Mode};
pub use machine::{Actuator, Machine, MachineSignals};
pub use pendant::{PendantDevice, PendantState, Transport};
pub use simulated_machine::SimulatedMachine;
