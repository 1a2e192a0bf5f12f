use std::time::Duration;

use log::{info, warn};
use rusb::{Context, DeviceHandle, Error, UsbContext};

use super::pendant_state::{RawReport, REPORT_LEN};
use crate::{
    config::UsbConfig,
    display::DisplayBuffer,
    error::{PendantError, Result},
};

/// Moves reports in from and display frames out to a pendant.
pub trait Transport {
    /// Next input report. `None` when nothing usable arrived in time.
    fn read_report(&mut self) -> Result<Option<RawReport>>;

    fn write_display(&mut self, display: &DisplayBuffer) -> Result<()>;
}

/// USB connection to the pendant's HID interface.
///
/// Reports arrive on the interrupt IN endpoint, display frames go out on the
/// interrupt OUT endpoint. The kernel HID driver is detached while the
/// interface is claimed.
pub struct PendantDevice {
    _context: Context,
    handle: DeviceHandle<Context>,
    interface: u8,
    reattach_kernel_driver: bool,
    read_endpoint: u8,
    write_endpoint: u8,
    timeout: Duration,
    input_buf: RawReport,
}

impl PendantDevice {
    /// Connect to the first pendant matching the configured vendor/product id.
    pub fn connect(config: &UsbConfig) -> Result<Self> {
        let context = Context::new()?;
        let mut handle = None;

        for device in context.devices()?.iter() {
            let desc = device.device_descriptor()?;
            if desc.vendor_id() == config.vendor_id && desc.product_id() == config.product_id {
                handle = Some(device.open()?);
                break;
            }
        }

        let handle = match handle {
            Some(h) => h,
            None => {
                return Err(PendantError::DeviceNotFound {
                    vendor_id: config.vendor_id,
                    product_id: config.product_id,
                })
            }
        };

        // Not every platform supports detaching; claiming still works there.
        let reattach_kernel_driver = match handle.kernel_driver_active(config.interface) {
            Ok(true) => {
                handle.detach_kernel_driver(config.interface)?;
                true
            }
            Ok(false) | Err(Error::NotSupported) => false,
            Err(err) => return Err(err.into()),
        };
        handle.claim_interface(config.interface)?;

        info!(
            "connected to pendant {:04x}:{:04x}",
            config.vendor_id, config.product_id
        );

        Ok(Self {
            _context: context,
            handle,
            interface: config.interface,
            reattach_kernel_driver,
            read_endpoint: config.read_endpoint,
            write_endpoint: config.write_endpoint,
            timeout: config.timeout(),
            input_buf: [0; REPORT_LEN],
        })
    }
}

impl Transport for PendantDevice {
    fn read_report(&mut self) -> Result<Option<RawReport>> {
        match self
            .handle
            .read_interrupt(self.read_endpoint, &mut self.input_buf, self.timeout)
        {
            Ok(len) if len == self.input_buf.len() => Ok(Some(self.input_buf)),
            Ok(len) => {
                warn!("short pendant report ({len} bytes), skipping");
                Ok(None)
            }
            Err(Error::Timeout) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_display(&mut self, display: &DisplayBuffer) -> Result<()> {
        if let Err(err) = self
            .handle
            .write_interrupt(self.write_endpoint, display, self.timeout)
        {
            match err {
                Error::Timeout => warn!("display write timed out"),
                Error::NoDevice => return Err(err.into()),
                err => warn!("display write error: {:?}", err),
            }
        }
        Ok(())
    }
}

impl Drop for PendantDevice {
    fn drop(&mut self) {
        let _ = self.handle.release_interface(self.interface);
        if self.reattach_kernel_driver {
            let _ = self.handle.attach_kernel_driver(self.interface);
        }
    }
}
