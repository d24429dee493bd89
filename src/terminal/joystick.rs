//! Joystick devices: the Linux joystick interface and hot-plug scanning.
//!
//! Devices live at `/dev/input/js0` .. `/dev/input/js15`. Each read yields
//! 8-byte records:
//!
//! ```text
//!  0      4      6     7
//! ┌──────┬──────┬─────┬───────┐
//! │ time │ value│ type│ number│   time: u32 ms, value: i16, little endian
//! └──────┴──────┴─────┴───────┘
//! ```
//!
//! Type bit `0x01` marks a button, `0x02` an axis, and `0x80` the synthetic
//! records the driver sends on open to report initial state.

use crate::console::MAX_JOYSTICKS;
use crate::error::JoystickError;
use crate::platform::{ButtonEvent, ConsoleEvent, JoystickBackend, JoystickDevice};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where joystick device nodes appear.
pub const DEVICE_DIR: &str = "/dev/input";

const JS_EVENT_BUTTON: u8 = 0x01;
const JS_EVENT_INIT: u8 = 0x80;

/// Size of one joystick record.
pub const JS_EVENT_SIZE: usize = 8;

/// Decode one record. Only live button changes produce an event.
pub fn parse_js_event(record: &[u8; JS_EVENT_SIZE]) -> Option<ButtonEvent> {
    let value = i16::from_le_bytes([record[4], record[5]]);
    let kind = record[6];
    let number = record[7];

    if kind & JS_EVENT_INIT != 0 || kind & JS_EVENT_BUTTON == 0 {
        return None;
    }
    Some(ButtonEvent {
        button: number,
        pressed: value != 0,
    })
}

fn device_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("js{index}"))
}

/// Watches the device directory and reports joysticks appearing and
/// disappearing.
#[derive(Debug)]
pub struct JoystickScan {
    dir: PathBuf,
    present: [bool; MAX_JOYSTICKS],
}

impl JoystickScan {
    /// Scan `dir` for `js*` nodes. Nothing is known to be present yet, so
    /// the first scan reports every connected device as added.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            present: [false; MAX_JOYSTICKS],
        }
    }

    /// Compare the directory with the last scan.
    ///
    /// A new node counts as added only once it can be opened. Nodes often
    /// appear before their permissions are set, so an unreadable one is
    /// looked at again on the next scan.
    pub fn scan(&mut self) -> Vec<ConsoleEvent> {
        let mut events = Vec::new();
        for (which, present) in (0u32..).zip(self.present.iter_mut()) {
            let path = device_path(&self.dir, which);
            let now = if *present {
                path.exists()
            } else {
                File::open(&path).is_ok()
            };
            if now == *present {
                continue;
            }
            *present = now;
            events.push(if now {
                ConsoleEvent::JoyAdded { which }
            } else {
                ConsoleEvent::JoyRemoved { which }
            });
        }
        events
    }
}

#[cfg(target_os = "linux")]
pub use linux::{JsDevice, LinuxJoysticks};

#[cfg(target_os = "linux")]
mod linux {
    use super::{device_path, parse_js_event, JS_EVENT_SIZE};
    use crate::error::JoystickError;
    use crate::platform::{ButtonEvent, JoystickBackend, JoystickDevice};
    use std::fs::{File, OpenOptions};
    use std::io::{self, Read};
    use std::os::unix::fs::OpenOptionsExt;
    use std::path::PathBuf;
    use tracing::debug;

    /// An open `/dev/input/jsN` node, read without blocking.
    #[derive(Debug)]
    pub struct JsDevice {
        index: u32,
        file: File,
    }

    impl JoystickDevice for JsDevice {
        fn poll_button(&mut self) -> Option<ButtonEvent> {
            let mut record = [0u8; JS_EVENT_SIZE];
            loop {
                match self.file.read_exact(&mut record) {
                    Ok(()) => {
                        if let Some(event) = parse_js_event(&record) {
                            return Some(event);
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::WouldBlock => return None,
                    Err(err) => {
                        debug!(index = self.index, error = %err, "joystick read failed");
                        return None;
                    }
                }
            }
        }
    }

    /// Opens joysticks from a device directory.
    #[derive(Debug)]
    pub struct LinuxJoysticks {
        dir: PathBuf,
    }

    impl LinuxJoysticks {
        /// Backend for the nodes under `dir`.
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }
    }

    impl Default for LinuxJoysticks {
        fn default() -> Self {
            Self::new(super::DEVICE_DIR)
        }
    }

    impl JoystickBackend for LinuxJoysticks {
        type Device = JsDevice;

        fn open(&mut self, index: u32) -> Result<JsDevice, JoystickError> {
            let file = OpenOptions::new()
                .read(true)
                .custom_flags(libc::O_NONBLOCK)
                .open(device_path(&self.dir, index))
                .map_err(|source| JoystickError::Open { index, source })?;
            Ok(JsDevice { index, file })
        }
    }
}

/// Device type of [`NoJoysticks`]; never constructed.
#[derive(Debug)]
pub enum NoDevice {}

impl JoystickDevice for NoDevice {
    fn poll_button(&mut self) -> Option<ButtonEvent> {
        match *self {}
    }
}

/// Backend for platforms without joystick support: every open fails.
#[derive(Debug, Default)]
pub struct NoJoysticks;

impl JoystickBackend for NoJoysticks {
    type Device = NoDevice;

    fn open(&mut self, index: u32) -> Result<NoDevice, JoystickError> {
        debug!(index, "joysticks unsupported on this platform");
        Err(JoystickError::Open {
            index,
            source: io::Error::from(io::ErrorKind::Unsupported),
        })
    }
}

/// The joystick backend for the current platform.
#[cfg(target_os = "linux")]
pub type PlatformJoysticks = LinuxJoysticks;

/// The joystick backend for the current platform.
#[cfg(not(target_os = "linux"))]
pub type PlatformJoysticks = NoJoysticks;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(value: i16, kind: u8, number: u8) -> [u8; JS_EVENT_SIZE] {
        let mut record = [0u8; JS_EVENT_SIZE];
        record[..4].copy_from_slice(&1234u32.to_le_bytes());
        record[4..6].copy_from_slice(&value.to_le_bytes());
        record[6] = kind;
        record[7] = number;
        record
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("padterm-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_button_press_and_release() {
        assert_eq!(
            parse_js_event(&record(1, 0x01, 3)),
            Some(ButtonEvent {
                button: 3,
                pressed: true
            })
        );
        assert_eq!(
            parse_js_event(&record(0, 0x01, 3)),
            Some(ButtonEvent {
                button: 3,
                pressed: false
            })
        );
    }

    #[test]
    fn test_parse_skips_axis_and_init_records() {
        assert_eq!(parse_js_event(&record(-32767, 0x02, 0)), None);
        assert_eq!(parse_js_event(&record(1, 0x81, 0)), None);
        assert_eq!(parse_js_event(&record(0, 0x82, 1)), None);
    }

    #[test]
    fn test_scan_reports_changes_once() {
        let dir = scratch_dir("scan");
        let mut scan = JoystickScan::new(&dir);
        assert!(scan.scan().is_empty());

        fs::write(dir.join("js0"), b"").unwrap();
        fs::write(dir.join("js3"), b"").unwrap();
        assert_eq!(
            scan.scan(),
            [
                ConsoleEvent::JoyAdded { which: 0 },
                ConsoleEvent::JoyAdded { which: 3 }
            ]
        );
        assert!(scan.scan().is_empty());

        fs::remove_file(dir.join("js0")).unwrap();
        assert_eq!(scan.scan(), [ConsoleEvent::JoyRemoved { which: 0 }]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_retries_node_that_cannot_be_opened_yet() {
        use std::os::unix::net::UnixListener;

        let dir = scratch_dir("unready");
        let node = dir.join("js2");
        // A socket exists but refuses open(2), even for root.
        let listener = UnixListener::bind(&node).unwrap();
        let mut scan = JoystickScan::new(&dir);
        assert!(scan.scan().is_empty());
        assert!(scan.scan().is_empty());

        drop(listener);
        fs::remove_file(&node).unwrap();
        fs::write(&node, b"").unwrap();
        assert_eq!(scan.scan(), [ConsoleEvent::JoyAdded { which: 2 }]);
        assert!(scan.scan().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_scan_ignores_indices_past_registry() {
        let dir = scratch_dir("range");
        fs::write(dir.join("js16"), b"").unwrap();
        let mut scan = JoystickScan::new(&dir);
        assert!(scan.scan().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_no_joysticks_never_opens() {
        let mut backend = NoJoysticks;
        assert!(matches!(
            backend.open(0),
            Err(JoystickError::Open { index: 0, .. })
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_backend_reads_buttons_from_node() {
        let dir = scratch_dir("device");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&record(1, 0x81, 0));
        bytes.extend_from_slice(&record(500, 0x02, 1));
        bytes.extend_from_slice(&record(1, 0x01, 2));
        fs::write(dir.join("js1"), &bytes).unwrap();

        let mut backend = LinuxJoysticks::new(&dir);
        let mut device = backend.open(1).unwrap();
        assert_eq!(
            device.poll_button(),
            Some(ButtonEvent {
                button: 2,
                pressed: true
            })
        );
        assert_eq!(device.poll_button(), None);
        assert!(backend.open(2).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
