use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::Path,
    time::Duration,
};

use log::info;
use serde::Deserialize;

use crate::{
    axis::{ActuatorId, Axis, AxisTable},
    error::{PendantError, Result},
    jog_controller::JogScale,
};

/// Driver configuration, usually loaded from `pendant.yml`.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub usb: UsbConfig,
    pub jog: JogScale,
    pub axes: Vec<AxisConfig>,
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usb: UsbConfig::default(),
            jog: JogScale::default(),
            axes: vec![
                AxisConfig {
                    axis: Axis::X,
                    actuator: 1,
                },
                AxisConfig {
                    axis: Axis::Y,
                    actuator: 2,
                },
                AxisConfig {
                    axis: Axis::Z,
                    actuator: 3,
                },
            ],
            simulation: SimulationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UsbConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: u8,
    pub read_endpoint: u8,
    pub write_endpoint: u8,
    pub timeout_ms: u64,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            vendor_id: 0x04d8,
            product_id: 0xfce2,
            interface: 0,
            read_endpoint: 0x81,
            write_endpoint: 0x01,
            timeout_ms: 50,
        }
    }
}

impl UsbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AxisConfig {
    pub axis: Axis,
    pub actuator: ActuatorId,
}

/// Behaviour of the built-in simulated machine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Feed override change per wheel tick in Speed mode.
    pub feed_override_step: f64,
    pub max_feed_override: f64,
    pub coordinate_system: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            feed_override_step: 0.01,
            max_feed_override: 2.0,
            coordinate_system: 1,
        }
    }
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("loading config from {}", path.display());
                Self::from_yaml(&text)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(PendantError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn axis_table(&self) -> AxisTable {
        AxisTable::new(self.axes.iter().map(|entry| (entry.axis, entry.actuator)))
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.axes {
            if !seen.insert(entry.axis) {
                return Err(PendantError::InvalidConfig(format!(
                    "axis {} configured twice",
                    entry.axis.label()
                )));
            }
        }

        if !(self.jog.fine > 0.0 && self.jog.coarse > 0.0) {
            return Err(PendantError::InvalidConfig(
                "jog scales must be positive".into(),
            ));
        }

        if self.simulation.max_feed_override < 0.0 {
            return Err(PendantError::InvalidConfig(
                "max_feed_override must not be negative".into(),
            ));
        }

        Ok(())
    }
}
