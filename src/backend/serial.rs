//! Serial port line source
//!
//! Opens the device with the `serialport` crate and reads it through a
//! [`ReaderSource`]. Port enumeration for `--list-ports` lives here too.

use std::io;

use serialport::{SerialPort, SerialPortInfo, SerialPortType};

use crate::config::AcquisitionConfig;
use crate::error::{Result, ResultExt};

use super::reader_source::ReaderSource;
use super::source_trait::{LineRead, LineSource, SourceStats};

/// A serial device read line by line
pub struct SerialLineSource {
    inner: ReaderSource<Box<dyn SerialPort>>,
}

impl SerialLineSource {
    /// Open the configured port
    ///
    /// The port closes when the source is dropped, on every exit path.
    pub fn open(config: &AcquisitionConfig) -> Result<Self> {
        tracing::debug!(
            port = %config.port,
            baud_rate = config.baud_rate,
            timeout = ?config.port_timeout(),
            "Opening serial port"
        );

        let port = serialport::new(config.port.as_str(), config.baud_rate)
            .timeout(config.port_timeout())
            .open()
            .with_context(|| format!("Failed to open serial port {}", config.port))?;

        tracing::info!("Opened {} at {} baud", config.port, config.baud_rate);

        let source = Self {
            inner: ReaderSource::new(config.port.clone(), port),
        };

        // Some drivers silently round unsupported rates
        match source.baud_rate() {
            Ok(actual) if actual != config.baud_rate => tracing::warn!(
                "{} is running at {} baud, requested {}",
                config.port,
                actual,
                config.baud_rate
            ),
            Ok(_) => {}
            Err(e) => tracing::debug!("Could not read back baud rate: {}", e),
        }

        Ok(source)
    }

    /// Baud rate the driver reports
    pub fn baud_rate(&self) -> Result<u32> {
        Ok(self.inner.get_ref().baud_rate()?)
    }
}

impl LineSource for SerialLineSource {
    fn read_line(&mut self) -> Result<LineRead> {
        let read = self.inner.read_line()?;
        reject_hangup(&self.inner.name(), read)
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn stats(&self) -> SourceStats {
        self.inner.stats()
    }
}

/// A serial port only reads zero bytes once the device has hung up
fn reject_hangup(port: &str, read: LineRead) -> Result<LineRead> {
    match read {
        LineRead::EndOfStream => {
            Err::<LineRead, _>(io::Error::from(io::ErrorKind::UnexpectedEof))
                .with_context(|| format!("Serial port {} disconnected", port))
        }
        other => Ok(other),
    }
}

/// Information about a detected serial port (for listing)
#[derive(Debug, Clone)]
pub struct DetectedPort {
    /// OS name of the port
    pub name: String,
    /// Short description of the port type
    pub kind: String,
}

impl DetectedPort {
    /// Get a display-friendly description of this port
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

impl From<SerialPortInfo> for DetectedPort {
    fn from(info: SerialPortInfo) -> Self {
        let kind = match info.port_type {
            SerialPortType::UsbPort(usb) => match usb.product {
                Some(product) => format!("USB {:04x}:{:04x} {}", usb.vid, usb.pid, product),
                None => format!("USB {:04x}:{:04x}", usb.vid, usb.pid),
            },
            SerialPortType::PciPort => "PCI".to_string(),
            SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            SerialPortType::Unknown => "unknown".to_string(),
        };
        Self {
            name: info.port_name,
            kind,
        }
    }
}

impl std::fmt::Display for DetectedPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Enumerate serial ports visible to the process
pub fn list_ports() -> Result<Vec<DetectedPort>> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
    Ok(ports.into_iter().map(DetectedPort::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoggerError;

    #[test]
    fn test_open_missing_port_is_fatal() {
        let config = AcquisitionConfig {
            port: "/dev/imulog-no-such-port".to_string(),
            ..Default::default()
        };
        let err = SerialLineSource::open(&config).err().unwrap();
        assert!(err.to_string().contains("/dev/imulog-no-such-port"));
    }

    #[test]
    fn test_hangup_is_an_error() {
        let err = reject_hangup("/dev/ttyUSB0", LineRead::EndOfStream).unwrap_err();
        assert!(err.to_string().contains("/dev/ttyUSB0 disconnected"));
        match err {
            LoggerError::WithContext { source, .. } => match *source {
                LoggerError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
                other => panic!("expected I/O error, got {other:?}"),
            },
            other => panic!("expected context-wrapped I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_lines_and_timeouts_pass_through() {
        let line = LineRead::Line(b"X: 1 Y: 2 Z: 3\n".to_vec());
        assert_eq!(reject_hangup("COM9", line.clone()).unwrap(), line);
        assert_eq!(
            reject_hangup("COM9", LineRead::TimedOut).unwrap(),
            LineRead::TimedOut
        );
    }

    #[test]
    fn test_detected_port_display() {
        let port = DetectedPort::from(SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::PciPort,
        });
        assert_eq!(port.to_string(), "/dev/ttyS0 (PCI)");
    }
}
