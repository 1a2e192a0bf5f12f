use crate::axis::{ActuatorId, Axis, AxisTable, AXIS_COUNT};

/// Read-only view of the live machine state.
pub trait Machine {
    fn is_estop_active(&self) -> bool;

    fn is_on(&self) -> bool;

    fn axis_command_position(&self, actuator: ActuatorId) -> f64;

    /// Feed override factor, 1.0 being 100%.
    fn feed_override(&self) -> f64;

    /// Active coordinate system, 1 for G54. 0 means no update is available.
    fn active_coordinate_system(&self) -> u32;
}

/// Receives the actions decided for a cycle.
pub trait Actuator {
    fn set_estop_latch(&mut self, active: bool);

    fn enable_jog(&mut self, actuator: Option<ActuatorId>);

    fn set_zero_offset(&mut self, offset: f64);

    fn commit_zero(&mut self, actuator: Option<ActuatorId>);

    fn set_feed_override_enable(&mut self, enable: bool);

    fn set_jog_scale(&mut self, scale: f64);

    fn set_jog_counts(&mut self, counts: i64);
}

/// Machine conditions sampled once per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineSignals {
    pub estop_active: bool,
    pub machine_on: bool,
    pub coordinate_system: u32,
    pub feed_override: f64,
    positions: [f64; AXIS_COUNT],
}

impl Default for MachineSignals {
    fn default() -> Self {
        Self {
            estop_active: false,
            machine_on: true,
            coordinate_system: 0,
            feed_override: 1.0,
            positions: [0.0; AXIS_COUNT],
        }
    }
}

impl MachineSignals {
    /// Sample `machine`, reading positions for every axis in `axes`.
    pub fn query<M: Machine + ?Sized>(machine: &M, axes: &AxisTable) -> Self {
        let mut positions = [0.0; AXIS_COUNT];
        for record in axes.iter() {
            positions[record.axis.index()] = machine.axis_command_position(record.actuator);
        }

        Self {
            estop_active: machine.is_estop_active(),
            machine_on: machine.is_on(),
            coordinate_system: machine.active_coordinate_system(),
            feed_override: machine.feed_override(),
            positions,
        }
    }

    pub fn position(&self, axis: Axis) -> f64 {
        self.positions[axis.index()]
    }

    pub fn with_position(mut self, axis: Axis, position: f64) -> Self {
        self.positions[axis.index()] = position;
        self
    }

    pub fn with_estop(mut self, active: bool) -> Self {
        self.estop_active = active;
        self
    }

    pub fn with_machine_on(mut self, on: bool) -> Self {
        self.machine_on = on;
        self
    }

    pub fn with_coordinate_system(mut self, index: u32) -> Self {
        self.coordinate_system = index;
        self
    }

    pub fn with_feed_override(mut self, value: f64) -> Self {
        self.feed_override = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMachine;

    impl Machine for FixedMachine {
        fn is_estop_active(&self) -> bool {
            false
        }

        fn is_on(&self) -> bool {
            true
        }

        fn axis_command_position(&self, actuator: ActuatorId) -> f64 {
            actuator as f64 * 10.0
        }

        fn feed_override(&self) -> f64 {
            0.75
        }

        fn active_coordinate_system(&self) -> u32 {
            2
        }
    }

    #[test]
    fn query_samples_configured_axes() {
        let signals = MachineSignals::query(&FixedMachine, &AxisTable::default());
        assert!(signals.machine_on);
        assert!(!signals.estop_active);
        assert_eq!(signals.coordinate_system, 2);
        assert_eq!(signals.feed_override, 0.75);
        assert_eq!(signals.position(Axis::X), 10.0);
        assert_eq!(signals.position(Axis::Z), 30.0);
        assert_eq!(signals.position(Axis::A), 0.0);
    }

    #[test]
    fn builders_set_each_signal() {
        let signals = MachineSignals::default()
            .with_estop(true)
            .with_machine_on(false)
            .with_coordinate_system(4)
            .with_feed_override(0.5)
            .with_position(Axis::Y, -2.0);
        assert!(signals.estop_active);
        assert!(!signals.machine_on);
        assert_eq!(signals.coordinate_system, 4);
        assert_eq!(signals.feed_override, 0.5);
        assert_eq!(signals.position(Axis::Y), -2.0);
        assert_eq!(signals.position(Axis::X), 0.0);
    }
}
