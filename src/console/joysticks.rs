//! Joystick registry: open handles for up to [`MAX_JOYSTICKS`] devices.

use crate::error::JoystickError;
use crate::platform::{ConsoleEvent, JoystickBackend, JoystickDevice};
use std::array;
use tracing::{info, warn};

/// Number of device indices the registry tracks.
pub const MAX_JOYSTICKS: usize = 16;

/// Device index → open handle. The registry owns each handle while the
/// device is connected; clearing a slot closes it.
#[derive(Debug)]
pub struct JoystickRegistry<D> {
    slots: [Option<D>; MAX_JOYSTICKS],
}

impl<D: JoystickDevice> JoystickRegistry<D> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            slots: array::from_fn(|_| None),
        }
    }

    /// Open the device at `index` and keep its handle.
    ///
    /// An occupied slot is closed and replaced. Failures are logged and leave
    /// the slot empty. Returns whether the device is now open.
    pub fn add<B>(&mut self, index: u32, backend: &mut B) -> bool
    where
        B: JoystickBackend<Device = D>,
    {
        let slot = match slot_index(index) {
            Ok(slot) => slot,
            Err(err) => {
                warn!(error = %err, "joystick ignored");
                return false;
            }
        };

        // Close the old handle before the device node is opened again.
        self.slots[slot] = None;
        match backend.open(index) {
            Ok(device) => {
                self.slots[slot] = Some(device);
                info!(index, "joystick connected");
                true
            }
            Err(err) => {
                warn!(index, error = %err, "joystick connect failed");
                false
            }
        }
    }

    /// Close and forget the device at `index`. Returns whether a handle was
    /// open.
    pub fn remove(&mut self, index: u32) -> bool {
        let slot = match slot_index(index) {
            Ok(slot) => slot,
            Err(err) => {
                warn!(error = %err, "joystick removal ignored");
                return false;
            }
        };

        let was_open = self.slots[slot].take().is_some();
        info!(index, "joystick disconnected");
        was_open
    }

    /// Whether a handle is open at `index`.
    pub fn is_connected(&self, index: u32) -> bool {
        slot_index(index).is_ok_and(|slot| self.slots[slot].is_some())
    }

    /// Number of open handles.
    pub fn connected(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Drain pending button changes from every open device.
    pub fn poll_buttons(&mut self) -> Vec<ConsoleEvent> {
        let mut events = Vec::new();
        for (which, device) in (0u32..).zip(self.slots.iter_mut()) {
            let Some(device) = device else { continue };
            while let Some(button) = device.poll_button() {
                events.push(ConsoleEvent::JoyButton {
                    which,
                    button: button.button,
                    pressed: button.pressed,
                });
            }
        }
        events
    }
}

impl<D: JoystickDevice> Default for JoystickRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_index(index: u32) -> Result<usize, JoystickError> {
    usize::try_from(index)
        .ok()
        .filter(|&slot| slot < MAX_JOYSTICKS)
        .ok_or(JoystickError::OutOfRange(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockJoystick, MockJoysticks};
    use crate::platform::ButtonEvent;

    fn registry() -> JoystickRegistry<MockJoystick> {
        JoystickRegistry::new()
    }

    #[test]
    fn test_add_then_remove_leaves_slot_empty() {
        let mut backend = MockJoysticks::default();
        let mut joysticks = registry();

        assert!(joysticks.add(3, &mut backend));
        assert!(joysticks.is_connected(3));
        assert_eq!(backend.live.get(), 1);

        assert!(joysticks.remove(3));
        assert!(!joysticks.is_connected(3));
        assert_eq!(backend.live.get(), 0);
    }

    #[test]
    fn test_remove_unopened_index_is_noop() {
        let mut joysticks = registry();
        assert!(!joysticks.remove(5));
        assert_eq!(joysticks.connected(), 0);
    }

    #[test]
    fn test_open_failure_leaves_slot_empty() {
        let mut backend = MockJoysticks {
            missing: vec![2],
            ..MockJoysticks::default()
        };
        let mut joysticks = registry();

        assert!(!joysticks.add(2, &mut backend));
        assert!(!joysticks.is_connected(2));
    }

    #[test]
    fn test_readd_replaces_handle() {
        let mut backend = MockJoysticks::default();
        let mut joysticks = registry();

        joysticks.add(0, &mut backend);
        joysticks.add(0, &mut backend);

        assert_eq!(backend.live.get(), 1);
        assert_eq!(joysticks.connected(), 1);
    }

    #[test]
    fn test_out_of_range_indices_rejected() {
        let mut backend = MockJoysticks::default();
        let mut joysticks = registry();

        assert!(!joysticks.add(16, &mut backend));
        assert!(!joysticks.add(u32::MAX, &mut backend));
        assert!(!joysticks.remove(16));
        assert!(!joysticks.is_connected(16));
        assert_eq!(backend.live.get(), 0);
    }

    #[test]
    fn test_last_index_accepted() {
        let mut backend = MockJoysticks::default();
        let mut joysticks = registry();
        assert!(joysticks.add(15, &mut backend));
        assert!(joysticks.is_connected(15));
    }

    #[test]
    fn test_poll_buttons_tags_device_index() {
        let mut backend = MockJoysticks {
            buttons: vec![ButtonEvent {
                button: 4,
                pressed: true,
            }],
            ..MockJoysticks::default()
        };
        let mut joysticks = registry();
        joysticks.add(7, &mut backend);

        let events = joysticks.poll_buttons();
        assert_eq!(
            events,
            [ConsoleEvent::JoyButton {
                which: 7,
                button: 4,
                pressed: true
            }]
        );
        assert!(joysticks.poll_buttons().is_empty());
    }

    #[test]
    fn test_drop_closes_all_handles() {
        let mut backend = MockJoysticks::default();
        {
            let mut joysticks = registry();
            joysticks.add(0, &mut backend);
            joysticks.add(9, &mut backend);
            assert_eq!(backend.live.get(), 2);
        }
        assert_eq!(backend.live.get(), 0);
    }
}
