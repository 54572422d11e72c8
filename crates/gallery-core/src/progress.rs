//! Cancellable, steppable progress simulation
//!
//! [`ProgressTask`] is the state machine behind the determinate download
//! demo. It is a plain owned value with no clock of its own; a driver calls
//! [`ProgressTask::tick`] every `tick_interval` while the task is running.
//!
//! ```text
//! Idle --start--> Running --tick [< 1.0]--> Running
//!                 Running --tick [== 1.0]--> Completed
//!                 Running --cancel--> Cancelled
//! Completed | Cancelled --start--> Running (reset)
//! ```
//!
//! Every operation is total. Calls that do not apply to the current status
//! are ignored and return `None`.

use crate::config::ProgressConfig;
use crate::error::Result;
use crate::gallery_debug;
use crate::logging::LogCategory;
use std::time::Duration;

/// Values this close to 1.0 count as complete
const COMPLETION_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl ProgressStatus {
    pub fn is_running(self) -> bool {
        self == ProgressStatus::Running
    }
}

/// Transition produced by a successful operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Started,
    Completed,
    Cancelled,
}

/// Point-in-time view of a task, as read by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub status: ProgressStatus,
    pub fraction: f32,
}

impl ProgressSnapshot {
    pub const IDLE: ProgressSnapshot = ProgressSnapshot {
        status: ProgressStatus::Idle,
        fraction: 0.0,
    };

    /// Completion as a whole percentage, 0..=100
    pub fn percent(&self) -> u8 {
        (self.fraction.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Button text for the start/cancel toggle, e.g. `Cancel Download (30%)`
    pub fn action_label(&self, subject: &str) -> String {
        if self.status.is_running() {
            format!("Cancel {} ({}%)", subject, self.percent())
        } else {
            format!("Start {}", subject)
        }
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone)]
pub struct ProgressTask {
    status: ProgressStatus,
    ticks: u32,
    fraction: f32,
    step_size: f32,
    tick_interval: Duration,
}

impl ProgressTask {
    /// Task with the default 0.1 step every 300 ms
    pub fn new() -> Self {
        let defaults = ProgressConfig::default();
        Self::from_parts(defaults.step_size, defaults.tick_interval())
    }

    /// Build a task from configuration, rejecting invalid steps or intervals
    pub fn with_config(config: &ProgressConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.step_size, config.tick_interval()))
    }

    fn from_parts(step_size: f32, tick_interval: Duration) -> Self {
        Self {
            status: ProgressStatus::Idle,
            ticks: 0,
            fraction: 0.0,
            step_size,
            tick_interval,
        }
    }

    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Begin a run. From a terminal state this resets progress to 0.0.
    pub fn start(&mut self) -> Option<ProgressEvent> {
        if self.status.is_running() {
            gallery_debug!(LogCategory::Progress, "start ignored: already running");
            return None;
        }

        let previous = self.status;
        self.status = ProgressStatus::Running;
        self.ticks = 0;
        self.fraction = 0.0;
        gallery_debug!(LogCategory::Progress, ?previous, "progress started");
        Some(ProgressEvent::Started)
    }

    /// Advance by one step. Returns `Completed` on the tick that reaches 1.0.
    pub fn tick(&mut self) -> Option<ProgressEvent> {
        if !self.status.is_running() {
            gallery_debug!(LogCategory::Progress, status = ?self.status, "tick ignored");
            return None;
        }

        self.ticks = self.ticks.saturating_add(1);
        let raw = self.ticks as f32 * self.step_size;
        self.fraction = if raw >= 1.0 - COMPLETION_EPSILON {
            1.0
        } else {
            raw.clamp(0.0, 1.0)
        };

        if self.fraction >= 1.0 {
            self.status = ProgressStatus::Completed;
            gallery_debug!(LogCategory::Progress, ticks = self.ticks, "progress completed");
            return Some(ProgressEvent::Completed);
        }
        None
    }

    /// Stop a running task, keeping the fraction reached so far
    pub fn cancel(&mut self) -> Option<ProgressEvent> {
        if !self.status.is_running() {
            gallery_debug!(LogCategory::Progress, status = ?self.status, "cancel ignored");
            return None;
        }

        self.status = ProgressStatus::Cancelled;
        gallery_debug!(LogCategory::Progress, fraction = self.fraction, "progress cancelled");
        Some(ProgressEvent::Cancelled)
    }

    pub fn observe(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            status: self.status,
            fraction: self.fraction,
        }
    }
}

impl Default for ProgressTask {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_new_task_is_idle() {
        let task = ProgressTask::new();
        assert_eq!(task.observe(), ProgressSnapshot::IDLE);
        assert_eq!(task.step_size(), 0.1);
        assert_eq!(task.tick_interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_ten_ticks_complete() {
        let mut task = ProgressTask::new();
        assert_eq!(task.start(), Some(ProgressEvent::Started));

        let events: Vec<_> = (0..10).filter_map(|_| task.tick()).collect();

        assert_eq!(events, vec![ProgressEvent::Completed]);
        assert_eq!(task.status(), ProgressStatus::Completed);
        assert_eq!(task.fraction(), 1.0);
    }

    #[test]
    fn test_cancel_keeps_fraction() {
        let mut task = ProgressTask::new();
        task.start();
        task.tick();
        task.tick();
        task.tick();
        assert!(approx(task.fraction(), 0.3));

        assert_eq!(task.cancel(), Some(ProgressEvent::Cancelled));
        assert_eq!(task.status(), ProgressStatus::Cancelled);
        assert!(approx(task.fraction(), 0.3));

        assert_eq!(task.tick(), None);
        assert!(approx(task.fraction(), 0.3));
    }

    #[test]
    fn test_cancel_while_idle_is_noop() {
        let mut task = ProgressTask::new();
        assert_eq!(task.cancel(), None);
        assert_eq!(task.observe(), ProgressSnapshot::IDLE);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut task = ProgressTask::new();
        task.start();
        task.tick();
        assert_eq!(task.start(), None);
        assert!(approx(task.fraction(), 0.1));
    }

    #[test]
    fn test_uneven_step_clamps() {
        let config = ProgressConfig {
            step_size: 0.3,
            tick_interval_ms: 10,
        };
        let mut task = ProgressTask::with_config(&config).unwrap();
        task.start();
        assert_eq!(task.tick(), None);
        assert_eq!(task.tick(), None);
        assert_eq!(task.tick(), None);
        assert_eq!(task.tick(), Some(ProgressEvent::Completed));
        assert_eq!(task.fraction(), 1.0);
    }

    #[test]
    fn test_with_config_rejects_invalid_step() {
        let config = ProgressConfig {
            step_size: 0.0,
            tick_interval_ms: 300,
        };
        assert!(ProgressTask::with_config(&config).is_err());
    }

    #[test]
    fn test_action_label() {
        let mut task = ProgressTask::new();
        assert_eq!(task.observe().action_label("Download"), "Start Download");

        task.start();
        task.tick();
        task.tick();
        task.tick();
        assert_eq!(
            task.observe().action_label("Download"),
            "Cancel Download (30%)"
        );

        task.cancel();
        assert_eq!(task.observe().action_label("Download"), "Start Download");
    }

    #[test]
    fn test_percent_rounds() {
        let snapshot = ProgressSnapshot {
            status: ProgressStatus::Running,
            fraction: 0.699_999,
        };
        assert_eq!(snapshot.percent(), 70);
    }
}
