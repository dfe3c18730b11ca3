//! Virtual switch: remembers the last command and logs it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use nightlight_app::ports::LightSwitch;

/// A simulated light switch for hosts without the relay attached.
#[derive(Debug, Default)]
pub struct VirtualSwitch {
    state: Mutex<bool>,
}

impl VirtualSwitch {
    /// Create a switch that starts in the given state.
    #[must_use]
    pub fn new(on: bool) -> Self {
        Self {
            state: Mutex::new(on),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, bool> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LightSwitch for VirtualSwitch {
    fn name(&self) -> &'static str {
        "virtual"
    }

    fn turn_on(&self) {
        let mut state = self.lock_state();
        if !*state {
            tracing::info!("virtual light on");
        }
        *state = true;
    }

    fn turn_off(&self) {
        let mut state = self.lock_state();
        if *state {
            tracing::info!("virtual light off");
        }
        *state = false;
    }

    fn is_on(&self) -> bool {
        *self.lock_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_off() {
        let switch = VirtualSwitch::default();
        assert!(!switch.is_on());
    }

    #[test]
    fn should_turn_on_when_commanded() {
        let switch = VirtualSwitch::default();
        switch.turn_on();
        assert!(switch.is_on());
    }

    #[test]
    fn should_turn_off_when_commanded() {
        let switch = VirtualSwitch::new(true);
        switch.turn_off();
        assert!(!switch.is_on());
    }

    #[test]
    fn should_stay_on_when_turned_on_twice() {
        let switch = VirtualSwitch::default();
        switch.turn_on();
        switch.turn_on();
        assert!(switch.is_on());
    }

    #[test]
    fn should_dispatch_set_to_matching_command() {
        let switch = VirtualSwitch::default();
        switch.set(true);
        assert!(switch.is_on());
        switch.set(false);
        assert!(!switch.is_on());
    }

    #[test]
    fn should_report_virtual_as_name() {
        assert_eq!(VirtualSwitch::default().name(), "virtual");
    }
}
