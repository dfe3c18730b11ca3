//! Light switch port: the output side of the controller.

/// Something that can switch the light fixture on and off.
///
/// Implementations keep their own record of the last applied command so that
/// [`is_on`](Self::is_on) never reports a pending action. Commands do not
/// fail: peripherals that can fail are acquired up front by their
/// constructors, and runtime write errors are logged by the implementation.
pub trait LightSwitch: Send + Sync {
    /// Short name used in logs (e.g. `"gpio"`, `"virtual"`).
    fn name(&self) -> &'static str;

    fn turn_on(&self);

    fn turn_off(&self);

    fn is_on(&self) -> bool;

    /// Convenience: dispatch to [`turn_on`](Self::turn_on) or
    /// [`turn_off`](Self::turn_off).
    fn set(&self, on: bool) {
        if on {
            self.turn_on();
        } else {
            self.turn_off();
        }
    }
}

impl<T: LightSwitch + ?Sized> LightSwitch for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn turn_on(&self) {
        (**self).turn_on();
    }

    fn turn_off(&self) {
        (**self).turn_off();
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}
