//! Status line rendered on the pendant's LCD.
//!
//! Layout of the 20-byte output report:
//!
//! | bytes  | content                                        |
//! |--------|------------------------------------------------|
//! | 0      | axis label                                     |
//! | 1..8   | axis command position, `+1.234`                |
//! | 8      | coordinate system indicator (`1`..`9`)         |
//! | 9..16  | axis offset while zeroing                      |
//! | 0..8   | `F 100.0%` feed override, replaces the axis    |
//! | 17     | sequence counter                               |
//! | 18, 19 | always zero                                    |
//!
//! The estop and machine-off messages start at byte 0 and replace everything
//! before the sequence byte they overlap.

/// Size of one display report sent to the pendant.
pub const DISPLAY_LEN: usize = 20;

pub type DisplayBuffer = [u8; DISPLAY_LEN];

const AXIS_LABEL: usize = 0;
const POSITION: usize = 1;
const NUMBER_WIDTH: usize = 7;
const COORDINATE_SYSTEM: usize = 8;
const OFFSET: usize = 9;
const FEED_OVERRIDE: usize = 0;
const FEED_OVERRIDE_WIDTH: usize = 8;
const SEQUENCE: usize = 17;
const TEXT_END: usize = SEQUENCE;

pub const ESTOP_TEXT: &str = "E-Stop  Active";
pub const MACHINE_OFF_TEXT: &str = "Machine Off";

/// Builder for one display frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusScreen {
    buf: DisplayBuffer,
}

impl StatusScreen {
    /// Blank frame stamped with `sequence`.
    pub fn new(sequence: u8) -> Self {
        let mut buf = [b' '; DISPLAY_LEN];
        buf[SEQUENCE] = sequence;
        buf[18] = 0;
        buf[19] = 0;
        Self { buf }
    }

    pub fn axis_position(&mut self, label: char, position: f64) {
        let mut utf8 = [0u8; 4];
        let label = label.encode_utf8(&mut utf8);
        self.buf[AXIS_LABEL] = label.as_bytes()[0];
        self.write(POSITION, NUMBER_WIDTH, &format_number(position, NUMBER_WIDTH));
    }

    /// Coordinate systems are numbered from 1 (G54). `None` leaves the slot blank.
    pub fn coordinate_system(&mut self, index: Option<u32>) {
        if let Some(index) = index {
            let indicator = char::from_digit(index, 10).unwrap_or('?');
            self.buf[COORDINATE_SYSTEM] = indicator as u8;
        }
    }

    pub fn zero_offset(&mut self, offset: f64) {
        self.write(OFFSET, NUMBER_WIDTH, &format_number(offset, NUMBER_WIDTH));
    }

    /// `value` is the override factor, 1.0 being 100%.
    pub fn feed_override(&mut self, value: f64) {
        let text = format!("F{:>6.1}%", value * 100.0);
        self.write(FEED_OVERRIDE, FEED_OVERRIDE_WIDTH, &text);
    }

    pub fn estop(&mut self) {
        self.message(ESTOP_TEXT);
    }

    pub fn machine_off(&mut self) {
        self.message(MACHINE_OFF_TEXT);
    }

    pub fn as_bytes(&self) -> &DisplayBuffer {
        &self.buf
    }

    pub fn into_bytes(self) -> DisplayBuffer {
        self.buf
    }

    fn message(&mut self, text: &str) {
        self.write(0, TEXT_END, text);
    }

    /// Blank the field, then copy as much of `text` as fits.
    fn write(&mut self, start: usize, width: usize, text: &str) {
        let end = (start + width).min(TEXT_END);
        self.buf[start..end].fill(b' ');
        let bytes = text.as_bytes();
        let len = bytes.len().min(end.saturating_sub(start));
        self.buf[start..start + len].copy_from_slice(&bytes[..len]);
    }
}

/// Signed value with up to three decimals, dropping decimals until it fits
/// `width`. Values with too many integer digits render as `+#####`.
fn format_number(value: f64, width: usize) -> String {
    for decimals in (0..=3).rev() {
        let text = format!("{:+.*}", decimals, value);
        if text.len() <= width {
            return text;
        }
    }

    let sign = if value.is_sign_negative() { '-' } else { '+' };
    let mut text = String::with_capacity(width);
    text.push(sign);
    text.extend(std::iter::repeat('#').take(width - 1));
    text
}
