use serde::Deserialize;

/// Machine axes the pendant can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    A,
}

pub const AXIS_COUNT: usize = 4;

impl Axis {
    pub fn label(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::A => 'A',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Identifier the actuator interface uses for an axis.
pub type ActuatorId = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRecord {
    pub axis: Axis,
    pub actuator: ActuatorId,
    pub offset: f64,
}

/// Lookup table of the axes this pendant drives.
///
/// Axes missing from the table are treated like a non-axis dial position.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTable {
    records: [Option<AxisRecord>; AXIS_COUNT],
}

impl Default for AxisTable {
    fn default() -> Self {
        Self::new([(Axis::X, 1), (Axis::Y, 2), (Axis::Z, 3)])
    }
}

impl AxisTable {
    pub fn new<I>(axes: I) -> Self
    where
        I: IntoIterator<Item = (Axis, ActuatorId)>,
    {
        let mut records = [None; AXIS_COUNT];
        for (axis, actuator) in axes {
            records[axis.index()] = Some(AxisRecord {
                axis,
                actuator,
                offset: 0.0,
            });
        }
        Self { records }
    }

    pub fn get(&self, axis: Axis) -> Option<&AxisRecord> {
        self.records[axis.index()].as_ref()
    }

    pub fn get_mut(&mut self, axis: Axis) -> Option<&mut AxisRecord> {
        self.records[axis.index()].as_mut()
    }

    pub fn contains(&self, axis: Axis) -> bool {
        self.get(axis).is_some()
    }

    pub fn actuator(&self, axis: Axis) -> Option<ActuatorId> {
        self.get(axis).map(|record| record.actuator)
    }

    /// Current offset of `axis`, zero for axes not in the table.
    pub fn offset(&self, axis: Axis) -> f64 {
        self.get(axis).map(|record| record.offset).unwrap_or(0.0)
    }

    pub fn reset_offset(&mut self, axis: Axis) {
        if let Some(record) = self.get_mut(axis) {
            record.offset = 0.0;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxisRecord> {
        self.records.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_xyz() {
        let table = AxisTable::default();
        assert_eq!(table.actuator(Axis::X), Some(1));
        assert_eq!(table.actuator(Axis::Y), Some(2));
        assert_eq!(table.actuator(Axis::Z), Some(3));
        assert!(!table.contains(Axis::A));
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn offsets_are_per_axis() {
        let mut table = AxisTable::default();
        table.get_mut(Axis::Y).unwrap().offset = 0.5;
        assert_eq!(table.offset(Axis::Y), 0.5);
        assert_eq!(table.offset(Axis::X), 0.0);

        table.reset_offset(Axis::Y);
        assert_eq!(table.offset(Axis::Y), 0.0);

        // unknown axis is a no-op
        table.reset_offset(Axis::A);
        assert_eq!(table.offset(Axis::A), 0.0);
    }
}
