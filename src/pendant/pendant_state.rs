use log::debug;

use super::edge::Edge;
use crate::axis::Axis;

/// Size of one input report read from the pendant.
pub const REPORT_LEN: usize = 8;

/// Raw input report as delivered by the interrupt endpoint.
pub type RawReport = [u8; REPORT_LEN];

/// Position of the left selector dial (jog mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeftDial {
    Step,
    Velocity,
    Continuous,
    Speed,
    Zero,
    Function,
    Off,
    Undefined,
}

impl LeftDial {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            1 => LeftDial::Step,
            2 => LeftDial::Velocity,
            3 => LeftDial::Continuous,
            4 => LeftDial::Speed,
            5 => LeftDial::Zero,
            6 => LeftDial::Function,
            7 => LeftDial::Off,
            _ => LeftDial::Undefined,
        }
    }
}

/// Position of the right selector dial (axis or machine function).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RightDial {
    X,
    Y,
    Z,
    A,
    StartPause,
    StopBack,
    Spindle,
    Undefined,
}

impl RightDial {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            1 => RightDial::X,
            2 => RightDial::Y,
            3 => RightDial::Z,
            4 => RightDial::StartPause,
            5 => RightDial::StopBack,
            6 => RightDial::Spindle,
            7 => RightDial::A,
            _ => RightDial::Undefined,
        }
    }

    /// Axis named by this dial position, if any.
    pub fn axis(self) -> Option<Axis> {
        match self {
            RightDial::X => Some(Axis::X),
            RightDial::Y => Some(Axis::Y),
            RightDial::Z => Some(Axis::Z),
            RightDial::A => Some(Axis::A),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Button {
    #[default]
    Released,
    Pressed,
    DoublePressed,
}

impl Button {
    /// Code 2 is never sent by the hardware and falls back to `Released`.
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Button::Released,
            1 => Button::Pressed,
            3 => Button::DoublePressed,
            code => {
                debug!("invalid button code {code}, treating as released");
                Button::Released
            }
        }
    }

    pub fn is_pressed(self) -> bool {
        !matches!(self, Button::Released)
    }
}

/// Decoded pendant state, updated in place from every input report.
///
/// The first report only primes the wheel baseline; `ticks` and
/// `tick_position` start moving from the second report on.
#[derive(Debug, Clone)]
pub struct PendantState {
    pub wheel: u8,
    wheel_previous: u8,
    pub left_dial: Edge<LeftDial>,
    pub right_dial: Edge<RightDial>,
    pub button: Button,
    pub estop: bool,
    pub off: bool,
    pub counter1: u8,
    pub counter2: u8,
    pub counter3: u8,
    initialized: bool,
    pub ticks: i8,
    pub tick_position: i64,
}

impl Default for PendantState {
    fn default() -> Self {
        Self::new()
    }
}

impl PendantState {
    pub fn new() -> Self {
        Self {
            wheel: 0,
            wheel_previous: 0,
            left_dial: Edge::new(LeftDial::Undefined),
            right_dial: Edge::new(RightDial::Undefined),
            button: Button::Released,
            estop: false,
            off: false,
            counter1: 0,
            counter2: 0,
            counter3: 0,
            initialized: false,
            ticks: 0,
            tick_position: 0,
        }
    }

    /// Decode one raw report into this state.
    pub fn update(&mut self, report: &RawReport) -> &Self {
        self.wheel = report[0];
        self.counter1 = report[1];
        self.counter2 = report[4];
        self.counter3 = report[5];

        let flags = report[2];
        self.off = (flags >> 4) & 0b1 != 0;
        self.estop = (flags >> 5) & 0b1 != 0;
        self.button = Button::from_bits(flags >> 6);

        let left = if self.off {
            LeftDial::Off
        } else {
            LeftDial::from_bits(report[3])
        };
        self.left_dial.update(left);
        self.right_dial.update(RightDial::from_bits(flags));

        if !self.initialized {
            self.wheel_previous = self.wheel;
            self.initialized = true;
            return self;
        }

        self.ticks = self.wheel.wrapping_sub(self.wheel_previous) as i8;
        self.tick_position += i64::from(self.ticks);
        self.wheel_previous = self.wheel;
        self
    }

    /// Whether at least one report has been decoded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(wheel: u8, left: u8, right: u8, button: u8, estop: bool, off: bool) -> RawReport {
        let flags = (right & 0b111) | (u8::from(off) << 4) | (u8::from(estop) << 5) | (button << 6);
        [wheel, 0, flags, left, 0, 0, 0, 0]
    }

    #[test]
    fn decodes_fields() {
        let mut state = PendantState::new();
        let raw = [7, 11, 0b0010_0011, 5, 22, 33, 0, 0];
        state.update(&raw);

        assert_eq!(state.wheel, 7);
        assert_eq!(state.counter1, 11);
        assert_eq!(state.counter2, 22);
        assert_eq!(state.counter3, 33);
        assert_eq!(state.right_dial.state(), RightDial::Z);
        assert_eq!(state.left_dial.state(), LeftDial::Zero);
        assert!(state.estop);
        assert!(!state.off);
        assert_eq!(state.button, Button::Released);
    }

    #[test]
    fn off_flag_forces_left_dial_off() {
        let mut state = PendantState::new();
        state.update(&report(0, 1, 1, 0, false, true));
        assert!(state.off);
        assert_eq!(state.left_dial.state(), LeftDial::Off);
    }

    #[test]
    fn decodes_button_codes() {
        let mut state = PendantState::new();
        state.update(&report(0, 1, 1, 1, false, false));
        assert_eq!(state.button, Button::Pressed);
        state.update(&report(0, 1, 1, 3, false, false));
        assert_eq!(state.button, Button::DoublePressed);
        state.update(&report(0, 1, 1, 2, false, false));
        assert_eq!(state.button, Button::Released);
    }

    #[test]
    fn decodes_a_axis_and_undefined_positions() {
        let mut state = PendantState::new();
        state.update(&report(0, 0, 7, 0, false, false));
        assert_eq!(state.right_dial.state(), RightDial::A);
        assert_eq!(state.left_dial.state(), LeftDial::Undefined);
        assert_eq!(RightDial::A.axis(), Some(Axis::A));
        assert_eq!(RightDial::Spindle.axis(), None);
    }

    #[test]
    fn first_report_only_primes_the_wheel() {
        let mut state = PendantState::new();
        assert!(!state.is_initialized());
        state.update(&report(200, 1, 1, 0, false, false));
        assert!(state.is_initialized());
        assert_eq!(state.ticks, 0);
        assert_eq!(state.tick_position, 0);

        state.update(&report(205, 1, 1, 0, false, false));
        assert_eq!(state.ticks, 5);
        assert_eq!(state.tick_position, 5);
    }

    #[test]
    fn ticks_wrap_around_the_byte() {
        let mut state = PendantState::new();
        state.update(&report(254, 1, 1, 0, false, false));
        state.update(&report(2, 1, 1, 0, false, false));
        assert_eq!(state.ticks, 4);

        state.update(&report(250, 1, 1, 0, false, false));
        assert_eq!(state.ticks, -8);
        assert_eq!(state.tick_position, -4);
    }

    #[test]
    fn ticks_match_signed_difference_for_all_pairs() {
        for prev in 0..=255u8 {
            for cur in [0u8, 1, 127, 128, 129, 255, prev.wrapping_add(3)] {
                let mut state = PendantState::new();
                state.update(&report(prev, 0, 0, 0, false, false));
                state.update(&report(cur, 0, 0, 0, false, false));
                assert_eq!(state.ticks, cur.wrapping_sub(prev) as i8);
            }
        }
    }

    #[test]
    fn dial_edges_follow_reports() {
        let mut state = PendantState::new();
        state.update(&report(0, 1, 1, 0, false, false));
        state.update(&report(0, 1, 2, 0, false, false));
        assert_eq!(state.right_dial.falling(), RightDial::X);
        assert_eq!(state.right_dial.rising(), RightDial::Y);

        state.update(&report(0, 1, 2, 0, false, false));
        assert_eq!(state.right_dial.falling(), RightDial::Undefined);
        assert_eq!(state.right_dial.previous(), RightDial::X);
    }
}
