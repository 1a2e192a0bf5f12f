use std::collections::HashMap;

use log::{debug, info};

use crate::{
    axis::ActuatorId,
    config::SimulationConfig,
    machine::{Actuator, Machine},
};

/// In-process stand-in for a motion controller.
///
/// Jogging moves the enabled axis by the tick delta times the jog scale, the
/// wheel adjusts the feed override while it is enabled, and committing a zero
/// sets the axis position to the pending offset.
#[derive(Debug, Clone)]
pub struct SimulatedMachine {
    config: SimulationConfig,
    estop: bool,
    on: bool,
    positions: HashMap<ActuatorId, f64>,
    feed_override: f64,
    feed_override_enabled: bool,
    jog_axis: Option<ActuatorId>,
    jog_scale: f64,
    jog_counts: Option<i64>,
    zero_offset: f64,
}

impl SimulatedMachine {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            estop: false,
            on: true,
            positions: HashMap::new(),
            feed_override: 1.0,
            feed_override_enabled: false,
            jog_axis: None,
            jog_scale: 0.0,
            jog_counts: None,
            zero_offset: 0.0,
        }
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    fn position_mut(&mut self, actuator: ActuatorId) -> &mut f64 {
        self.positions.entry(actuator).or_insert(0.0)
    }
}

impl Machine for SimulatedMachine {
    fn is_estop_active(&self) -> bool {
        self.estop
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn axis_command_position(&self, actuator: ActuatorId) -> f64 {
        self.positions.get(&actuator).copied().unwrap_or(0.0)
    }

    fn feed_override(&self) -> f64 {
        self.feed_override
    }

    fn active_coordinate_system(&self) -> u32 {
        self.config.coordinate_system
    }
}

impl Actuator for SimulatedMachine {
    fn set_estop_latch(&mut self, active: bool) {
        if active != self.estop {
            info!("estop {}", if active { "activated" } else { "reset" });
        }
        self.estop = active;
    }

    fn enable_jog(&mut self, actuator: Option<ActuatorId>) {
        self.jog_axis = actuator;
    }

    fn set_zero_offset(&mut self, offset: f64) {
        self.zero_offset = offset;
    }

    fn commit_zero(&mut self, actuator: Option<ActuatorId>) {
        if let Some(actuator) = actuator {
            let offset = self.zero_offset;
            *self.position_mut(actuator) = offset;
            info!("actuator {actuator} position set to {offset:+.3}");
        }
    }

    fn set_feed_override_enable(&mut self, enable: bool) {
        self.feed_override_enabled = enable;
    }

    fn set_jog_scale(&mut self, scale: f64) {
        self.jog_scale = scale;
    }

    /// Applies the delta since the previous call using the settings of this cycle.
    fn set_jog_counts(&mut self, counts: i64) {
        let delta = match self.jog_counts.replace(counts) {
            Some(previous) => counts - previous,
            None => 0,
        };
        if delta == 0 {
            return;
        }

        if let Some(actuator) = self.jog_axis {
            let step = delta as f64 * self.jog_scale;
            let position = self.position_mut(actuator);
            *position += step;
            debug!("jog actuator {actuator} by {step:+.3} to {:+.3}", *position);
        }

        if self.feed_override_enabled {
            let value = self.feed_override + delta as f64 * self.config.feed_override_step;
            self.feed_override = value.clamp(0.0, self.config.max_feed_override);
            debug!("feed override {:.1}%", self.feed_override * 100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> SimulatedMachine {
        SimulatedMachine::new(SimulationConfig::default())
    }

    #[test]
    fn jogs_enabled_axis_only() {
        let mut machine = machine();
        machine.set_jog_counts(0);
        machine.enable_jog(Some(2));
        machine.set_jog_scale(0.01);
        machine.set_jog_counts(5);
        assert!((machine.axis_command_position(2) - 0.05).abs() < 1e-9);
        assert_eq!(machine.axis_command_position(1), 0.0);

        machine.enable_jog(None);
        machine.set_jog_counts(10);
        assert!((machine.axis_command_position(2) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn first_counts_only_set_the_baseline() {
        let mut machine = machine();
        machine.enable_jog(Some(1));
        machine.set_jog_scale(1.0);
        machine.set_jog_counts(100);
        assert_eq!(machine.axis_command_position(1), 0.0);
    }

    #[test]
    fn feed_override_follows_wheel_and_clamps() {
        let mut machine = machine();
        machine.set_jog_counts(0);
        machine.set_feed_override_enable(true);
        machine.set_jog_counts(-20);
        assert!((machine.feed_override() - 0.8).abs() < 1e-9);
        machine.set_jog_counts(1000);
        assert_eq!(machine.feed_override(), 2.0);
    }

    #[test]
    fn commit_zero_applies_pending_offset() {
        let mut machine = machine();
        machine.set_zero_offset(0.25);
        machine.commit_zero(None);
        assert_eq!(machine.axis_command_position(3), 0.0);
        machine.commit_zero(Some(3));
        assert_eq!(machine.axis_command_position(3), 0.25);
    }

    #[test]
    fn estop_latch_is_reported() {
        let mut machine = machine();
        assert!(!machine.is_estop_active());
        machine.set_estop_latch(true);
        assert!(machine.is_estop_active());
        machine.set_estop_latch(false);
        assert!(!machine.is_estop_active());
    }
}
