//! Light controller: the auto/manual state machine and its evaluation loop.
//!
//! A [`LightController`] owns one [`LightSwitch`] and at most one
//! [`AmbientSensor`]. On [`start`](LightController::start) it spawns a tokio
//! task that, every poll interval, reads the sensor and (in auto mode) turns
//! the light on when the reading is at or below the darkness threshold.
//!
//! ## Synchronisation
//!
//! Mode, threshold and the last reading live in a single mutex. Every
//! hardware command, whether it comes from the loop or from
//! [`set_manual`](LightController::set_manual), is issued while that mutex is
//! held, so a tick that re-checks the mode after its sensor read can never
//! overwrite a manual override that landed during the read. The lock is never
//! held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use nightlight_domain::error::{SensorReadError, ValidationError};
use nightlight_domain::light_level::LightLevel;
use nightlight_domain::mode::Mode;
use nightlight_domain::poll_interval::PollInterval;
use nightlight_domain::status::ControllerStatus;
use nightlight_domain::threshold::DarknessThreshold;

use crate::ports::{AmbientSensor, LightSwitch};

/// Construction-time settings for a [`LightController`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerSettings {
    pub poll_interval: PollInterval,
    /// Time budget for a single sensor read. Defaults to the poll interval.
    pub read_timeout: Option<Duration>,
    pub mode: Mode,
    pub darkness_threshold: DarknessThreshold,
}

/// The evaluation loop could not be confirmed stopped.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    /// The loop did not exit in time and was aborted.
    #[error("evaluation loop did not stop within {0:?}")]
    TimedOut(Duration),

    /// The loop task panicked before it could be joined.
    #[error("evaluation loop panicked")]
    Panicked,
}

#[derive(Debug)]
struct ControlState {
    mode: Mode,
    threshold: DarknessThreshold,
    last_reading: Option<LightLevel>,
    /// Set once shutdown begins; the loop never drives the switch afterwards.
    stopped: bool,
}

/// State shared between the controller handle and the loop task.
struct Shared<W, S> {
    switch: W,
    sensor: Option<Arc<S>>,
    state: Mutex<ControlState>,
    /// A read that outlived its timeout and is still running on the blocking pool.
    stalled_read: Mutex<Option<JoinHandle<Result<LightLevel, SensorReadError>>>>,
    poll_interval: PollInterval,
    read_timeout: Duration,
}

impl<W, S> Shared<W, S> {
    fn lock_state(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_stalled_read(
        &self,
    ) -> MutexGuard<'_, Option<JoinHandle<Result<LightLevel, SensorReadError>>>> {
        self.stalled_read
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W, S> Shared<W, S>
where
    W: LightSwitch,
    S: AmbientSensor + 'static,
{
    /// One evaluation tick: read, decide, act.
    async fn evaluate(&self) {
        let Some(sensor) = &self.sensor else {
            return;
        };

        // The threshold is fixed for the whole tick.
        let threshold = {
            let state = self.lock_state();
            if state.stopped || !state.mode.is_auto() {
                return;
            }
            state.threshold
        };

        match self.read(sensor).await {
            Ok(level) => {
                let mut state = self.lock_state();
                if state.stopped {
                    tracing::debug!(level = level.value(), "stopped during read, dropping reading");
                    return;
                }
                state.last_reading = Some(level);
                if state.mode.is_auto() {
                    let on = threshold.is_dark(level);
                    tracing::debug!(
                        level = level.value(),
                        threshold = threshold.value(),
                        on,
                        "sensor reading"
                    );
                    self.switch.set(on);
                } else {
                    tracing::debug!(
                        level = level.value(),
                        "switched to manual during read, leaving the light alone"
                    );
                }
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    sensor = sensor.name(),
                    "sensor read failed, skipping this tick"
                );
            }
        }
    }

    /// Read the sensor on the blocking pool, at most one read at a time.
    ///
    /// A read that times out keeps running; until it returns, later ticks
    /// fail with [`SensorReadError::TimedOut`] instead of starting another.
    async fn read(&self, sensor: &Arc<S>) -> Result<LightLevel, SensorReadError> {
        let mut read = {
            let mut stalled = self.lock_stalled_read();
            match stalled.take() {
                Some(handle) if !handle.is_finished() => {
                    *stalled = Some(handle);
                    tracing::debug!("previous sensor read still running");
                    return Err(SensorReadError::TimedOut(self.read_timeout));
                }
                _ => {
                    let sensor = Arc::clone(sensor);
                    tokio::task::spawn_blocking(move || sensor.read())
                }
            }
        };
        let outcome = tokio::time::timeout(self.read_timeout, &mut read).await;
        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(SensorReadError::Interrupted),
            Err(_) => {
                *self.lock_stalled_read() = Some(read);
                Err(SensorReadError::TimedOut(self.read_timeout))
            }
        }
    }
}

async fn run_loop<W, S>(shared: Arc<Shared<W, S>>, mut stop: watch::Receiver<bool>)
where
    W: LightSwitch,
    S: AmbientSensor + 'static,
{
    tracing::debug!("evaluation loop started");
    while !*stop.borrow_and_update() {
        shared.evaluate().await;
        tokio::select! {
            () = tokio::time::sleep(shared.poll_interval.as_duration()) => {}
            changed = stop.changed() => {
                // The controller handle is gone.
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("evaluation loop stopped");
}

/// Supervisory controller for a single light fixture.
///
/// Cheap to share behind an `Arc`: every command takes `&self`.
pub struct LightController<W, S> {
    shared: Arc<Shared<W, S>>,
    stop: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<W, S> LightController<W, S>
where
    W: LightSwitch + 'static,
    S: AmbientSensor + 'static,
{
    /// Build the controller and spawn its evaluation loop.
    ///
    /// The first tick runs immediately. Must be called from within a tokio
    /// runtime.
    pub fn start(switch: W, sensor: Option<S>, settings: ControllerSettings) -> Self {
        let read_timeout = settings
            .read_timeout
            .unwrap_or_else(|| settings.poll_interval.as_duration());

        tracing::info!(
            switch = switch.name(),
            sensor = sensor.as_ref().map_or("none", |s| s.name()),
            mode = %settings.mode,
            threshold = settings.darkness_threshold.value(),
            poll_interval_ms = settings.poll_interval.as_duration().as_millis(),
            "light controller starting"
        );

        let shared = Arc::new(Shared {
            switch,
            sensor: sensor.map(Arc::new),
            state: Mutex::new(ControlState {
                mode: settings.mode,
                threshold: settings.darkness_threshold,
                last_reading: None,
                stopped: false,
            }),
            stalled_read: Mutex::new(None),
            poll_interval: settings.poll_interval,
            read_timeout,
        });

        let (stop, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(Arc::clone(&shared), stop_rx));

        Self {
            shared,
            stop,
            task: Mutex::new(Some(task)),
        }
    }
}

impl<W: LightSwitch, S> LightController<W, S> {
    /// Enable or disable automatic control.
    ///
    /// Disabling leaves the light as it is; enabling takes effect at the next
    /// evaluation tick.
    #[tracing::instrument(skip(self))]
    pub fn set_auto_mode(&self, enabled: bool) {
        let mode = Mode::from_auto_enabled(enabled);
        let previous = std::mem::replace(&mut self.shared.lock_state().mode, mode);
        tracing::info!(%previous, %mode, "auto mode set");
    }

    /// Switch to manual mode and immediately turn the light on or off.
    #[tracing::instrument(skip(self))]
    pub fn set_manual(&self, turn_on: bool) {
        let mut state = self.shared.lock_state();
        state.mode = Mode::Manual;
        self.shared.switch.set(turn_on);
        drop(state);
        tracing::info!(turn_on, "manual override applied");
    }

    /// Store a new darkness threshold, clamped into `[0, 1]`.
    ///
    /// The loop picks it up at the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdNotANumber`] for NaN; the stored
    /// threshold is left untouched.
    #[tracing::instrument(skip(self))]
    pub fn set_darkness_threshold(&self, value: f64) -> Result<DarknessThreshold, ValidationError> {
        let threshold = DarknessThreshold::new(value)?;
        self.shared.lock_state().threshold = threshold;
        tracing::info!(threshold = threshold.value(), "darkness threshold set");
        Ok(threshold)
    }

    #[must_use]
    pub fn status(&self) -> ControllerStatus {
        let state = self.shared.lock_state();
        ControllerStatus::new(
            state.mode,
            self.shared.switch.is_on(),
            state.last_reading,
            state.threshold,
        )
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.shared.lock_state().mode
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.shared.switch.is_on()
    }

    #[must_use]
    pub fn last_reading(&self) -> Option<LightLevel> {
        self.shared.lock_state().last_reading
    }

    #[must_use]
    pub fn darkness_threshold(&self) -> DarknessThreshold {
        self.shared.lock_state().threshold
    }
}

impl<W, S> LightController<W, S> {
    #[must_use]
    pub fn poll_interval(&self) -> PollInterval {
        self.shared.poll_interval
    }

    /// Stop the evaluation loop and wait for it to exit.
    ///
    /// The loop stops driving the switch as soon as this is called. It then
    /// gets at most twice the poll interval to exit; if it has not (typically
    /// because a sensor read is still in flight) it is aborted and the
    /// timeout is reported. The mode is left as it was. Calling this again after the
    /// loop is gone returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::TimedOut`] if the loop had to be aborted, or
    /// [`ShutdownError::Panicked`] if it crashed.
    pub async fn shutdown(&self) -> Result<(), ShutdownError> {
        // Under the state lock, so a tick that already holds a reading either
        // acts before this returns or not at all.
        self.shared.lock_state().stopped = true;
        self.stop.send_replace(true);

        let Some(mut handle) = self.take_task() else {
            return Ok(());
        };

        let bound = self.shared.poll_interval.shutdown_bound();
        match tokio::time::timeout(bound, &mut handle).await {
            Ok(Ok(())) => {
                tracing::info!("light controller stopped");
                Ok(())
            }
            Ok(Err(err)) => {
                tracing::error!(error = %err, "evaluation loop crashed");
                Err(ShutdownError::Panicked)
            }
            Err(_) => {
                handle.abort();
                tracing::warn!(
                    bound_ms = bound.as_millis(),
                    "evaluation loop did not stop in time, aborted"
                );
                Err(ShutdownError::TimedOut(bound))
            }
        }
    }

    fn take_task(&self) -> Option<JoinHandle<()>> {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<W, S> Drop for LightController<W, S> {
    fn drop(&mut self) {
        self.shared.lock_state().stopped = true;
        if let Some(handle) = self.take_task() {
            handle.abort();
        }
    }
}
