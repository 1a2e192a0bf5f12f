use log::{debug, info};
use serde::Deserialize;

use crate::{
    axis::{ActuatorId, Axis, AxisTable},
    display::{DisplayBuffer, StatusScreen, DISPLAY_LEN},
    machine::MachineSignals,
    pendant::{Button, LeftDial, PendantState},
};

/// Operating mode selected for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Estop,
    MachineOff,
    Step,
    Zero,
    Speed,
    None,
}

/// Distance per wheel tick, fine while the button is released.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct JogScale {
    pub fine: f64,
    pub coarse: f64,
}

impl Default for JogScale {
    fn default() -> Self {
        Self {
            fine: 0.001,
            coarse: 0.01,
        }
    }
}

impl JogScale {
    pub fn for_button(&self, button: Button) -> f64 {
        if button.is_pressed() {
            self.coarse
        } else {
            self.fine
        }
    }
}

/// Everything decided in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutputs {
    pub mode: Mode,
    pub selected_axis: Option<Axis>,
    /// Actuator of `selected_axis`.
    pub actuator: Option<ActuatorId>,
    pub jog_enable: bool,
    pub zero_commit: bool,
    /// Running offset of the axis being zeroed.
    pub zero_offset: Option<f64>,
    pub feed_override_enable: bool,
    pub tick_scale: f64,
    pub ticks: i8,
    pub tick_position: i64,
    pub display: DisplayBuffer,
}

impl ActionOutputs {
    pub fn jog_actuator(&self) -> Option<ActuatorId> {
        self.actuator.filter(|_| self.jog_enable)
    }

    pub fn zero_actuator(&self) -> Option<ActuatorId> {
        self.actuator.filter(|_| self.zero_commit)
    }
}

/// Maps the decoded pendant state and machine conditions to a single action.
///
/// Owns the per-axis offsets, the last known coordinate system and the
/// display sequence counter.
#[derive(Debug, Clone)]
pub struct JogController {
    axes: AxisTable,
    scale: JogScale,
    coordinate_system: Option<u32>,
    sequence: u8,
    last_mode: Option<Mode>,
}

impl Default for JogController {
    fn default() -> Self {
        Self::new(AxisTable::default(), JogScale::default())
    }
}

impl JogController {
    pub fn new(axes: AxisTable, scale: JogScale) -> Self {
        Self {
            axes,
            scale,
            coordinate_system: None,
            sequence: 0,
            last_mode: None,
        }
    }

    pub fn axes(&self) -> &AxisTable {
        &self.axes
    }

    /// Last non-zero coordinate system reported by the machine.
    pub fn coordinate_system(&self) -> Option<u32> {
        self.coordinate_system
    }

    pub fn update(&mut self, pendant: &PendantState, signals: &MachineSignals) -> ActionOutputs {
        let tick_scale = self.scale.for_button(pendant.button);

        if let Some(axis) = pendant.right_dial.falling().axis() {
            if self.axes.offset(axis) != 0.0 {
                debug!("axis {} deselected, dropping offset", axis.label());
            }
            self.axes.reset_offset(axis);
        }

        self.track_coordinate_system(signals.coordinate_system);

        let mode = self.select_mode(pendant, signals);
        if self.last_mode != Some(mode) {
            info!("mode {:?}", mode);
            self.last_mode = Some(mode);
        }

        let selected_axis = match mode {
            Mode::Step | Mode::Zero => pendant.right_dial.state().axis(),
            _ => None,
        };

        let mut outputs = ActionOutputs {
            mode,
            selected_axis,
            actuator: selected_axis.and_then(|axis| self.axes.actuator(axis)),
            jog_enable: mode == Mode::Step,
            zero_commit: false,
            zero_offset: None,
            feed_override_enable: mode == Mode::Speed,
            tick_scale,
            ticks: pendant.ticks,
            tick_position: pendant.tick_position,
            display: [0; DISPLAY_LEN],
        };

        if mode == Mode::Zero {
            let record = match selected_axis {
                Some(axis) => self.axes.get_mut(axis),
                None => None,
            };
            if let Some(record) = record {
                record.offset += f64::from(pendant.ticks) * tick_scale;
                outputs.zero_offset = Some(record.offset);
                outputs.zero_commit = pendant.button == Button::DoublePressed;
                if outputs.zero_commit {
                    info!(
                        "zeroing axis {} with offset {:+.3}",
                        record.axis.label(),
                        record.offset
                    );
                }
            }
        }

        outputs.display = self.render(&outputs, signals);
        self.sequence = self.sequence.wrapping_add(1);
        outputs
    }

    fn select_mode(&self, pendant: &PendantState, signals: &MachineSignals) -> Mode {
        if signals.estop_active {
            return Mode::Estop;
        }
        if !signals.machine_on {
            return Mode::MachineOff;
        }

        let axis_selected = pendant
            .right_dial
            .state()
            .axis()
            .is_some_and(|axis| self.axes.contains(axis));

        match pendant.left_dial.state() {
            LeftDial::Step if axis_selected => Mode::Step,
            LeftDial::Zero if axis_selected => Mode::Zero,
            LeftDial::Speed => Mode::Speed,
            _ => Mode::None,
        }
    }

    fn track_coordinate_system(&mut self, index: u32) {
        if index == 0 || self.coordinate_system == Some(index) {
            return;
        }
        info!("coordinate system {}", coordinate_system_name(index));
        self.coordinate_system = Some(index);
    }

    fn render(&self, outputs: &ActionOutputs, signals: &MachineSignals) -> DisplayBuffer {
        let mut screen = StatusScreen::new(self.sequence);

        match outputs.mode {
            Mode::Estop => screen.estop(),
            Mode::MachineOff => screen.machine_off(),
            mode => {
                if let Some(axis) = outputs.selected_axis {
                    screen.axis_position(axis.label(), signals.position(axis));
                }
                screen.coordinate_system(self.coordinate_system);
                if let Some(offset) = outputs.zero_offset {
                    screen.zero_offset(offset);
                }
                if mode == Mode::Speed {
                    screen.feed_override(signals.feed_override);
                }
            }
        }

        screen.into_bytes()
    }
}

/// G-code name of a 1-based coordinate system index.
pub fn coordinate_system_name(index: u32) -> String {
    match index {
        1..=6 => format!("G{}", 53 + index),
        7..=9 => format!("G59.{}", index - 6),
        _ => format!("#{index}"),
    }
}
