//! Indeterminate loaders
//!
//! The circular and linear indicator demos have no measurable progress: a
//! button press shows the spinner for a fixed delay, then a notice appears.

use gallery_core::logging::LogCategory;
use gallery_core::{gallery_debug, gallery_info, LoadingConfig, Signal};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStatus {
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingEvent {
    Finished { name: String },
}

pub struct LoadingTask {
    name: String,
    delay: Duration,
    status: Signal<LoadingStatus>,
    events: mpsc::UnboundedSender<LoadingEvent>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl LoadingTask {
    pub fn new(
        name: impl Into<String>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<LoadingEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let task = Self {
            name: name.into(),
            delay,
            status: Signal::new(LoadingStatus::Idle),
            events,
            pending: Mutex::new(None),
        };
        (task, receiver)
    }

    /// Loader for the linear indicator demo
    pub fn linear(config: &LoadingConfig) -> (Self, mpsc::UnboundedReceiver<LoadingEvent>) {
        Self::new("Linear", config.linear_delay())
    }

    /// Loader for the circular indicator demo
    pub fn circular(config: &LoadingConfig) -> (Self, mpsc::UnboundedReceiver<LoadingEvent>) {
        Self::new("Circular", config.circular_delay())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> LoadingStatus {
        self.status.get()
    }

    /// Begin loading. Returns false, changing nothing, if already loading.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        let mut pending = self.pending.lock();
        if self.status.get() == LoadingStatus::Loading {
            gallery_debug!(LogCategory::Loading, name = %self.name, "start ignored: already loading");
            return false;
        }

        self.status.set(LoadingStatus::Loading);
        gallery_debug!(LogCategory::Loading, name = %self.name, delay = ?self.delay, "loading started");

        let name = self.name.clone();
        let delay = self.delay;
        let status = self.status.clone();
        let events = self.events.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.set(LoadingStatus::Idle);
            gallery_info!(LogCategory::Loading, name = %name, "loading finished");
            let _ = events.send(LoadingEvent::Finished { name });
        }));
        true
    }
}

impl Drop for LoadingTask {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
