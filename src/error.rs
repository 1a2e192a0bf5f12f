use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PendantError>;

#[derive(Debug, Error)]
pub enum PendantError {
    #[error("usb error: {0}")]
    Usb(#[from] rusb::Error),

    #[error("no pendant with id {vendor_id:04x}:{product_id:04x} found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
