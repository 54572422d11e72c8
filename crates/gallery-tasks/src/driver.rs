//! Timer-driven driver for a [`ProgressTask`]
//!
//! The task lives inside a spawned tokio task. The presentation layer talks to
//! it through a [`ProgressController`]: commands go in over a channel, the
//! latest snapshot comes back through a [`Signal`], and terminal transitions
//! are pushed on a single-consumer event channel.

use gallery_core::logging::LogCategory;
use gallery_core::{
    gallery_debug, gallery_info, GalleryError, ProgressEvent, ProgressSnapshot, ProgressTask,
    Result, Signal, SubscriptionId,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Cancel,
    Toggle,
    Shutdown,
}

/// Spawns progress drivers on the current tokio runtime
pub struct ProgressDriver;

impl ProgressDriver {
    /// Move `task` into a driver loop and return its controller
    pub fn spawn(task: ProgressTask) -> ProgressController {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let snapshot = Signal::new(task.observe());

        let handle = tokio::spawn(run(task, command_rx, snapshot.clone(), event_tx));

        ProgressController {
            commands: command_tx,
            snapshot,
            events: Mutex::new(Some(event_rx)),
            handle,
        }
    }
}

/// Handle held by the presentation layer
pub struct ProgressController {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: Signal<ProgressSnapshot>,
    events: Mutex<Option<mpsc::UnboundedReceiver<ProgressEvent>>>,
    handle: JoinHandle<ProgressTask>,
}

impl ProgressController {
    /// Request a (re)start. Ignored by the task if it is already running.
    pub fn start(&self) -> Result<()> {
        self.send(Command::Start)
    }

    /// Request cancellation. Ignored by the task unless it is running.
    pub fn cancel(&self) -> Result<()> {
        self.send(Command::Cancel)
    }

    /// Start when idle or finished, cancel when running. Decided by the
    /// driver against the task itself, so quick repeated presses alternate.
    pub fn toggle(&self) -> Result<()> {
        self.send(Command::Toggle)
    }

    pub fn observe(&self) -> ProgressSnapshot {
        self.snapshot.get()
    }

    /// Run `callback` on every snapshot change
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ProgressSnapshot) + Send + Sync + 'static,
    {
        self.snapshot.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.snapshot.unsubscribe(id)
    }

    /// Take the event receiver. Only one consumer exists per driver.
    pub fn events(&self) -> Result<mpsc::UnboundedReceiver<ProgressEvent>> {
        self.events
            .lock()
            .take()
            .ok_or_else(|| GalleryError::state("progress event receiver already taken"))
    }

    /// Stop the driver and return the final snapshot
    pub async fn shutdown(self) -> Result<ProgressSnapshot> {
        // The loop also exits once every sender is gone, so a failed send
        // here just means it has already stopped.
        let _ = self.commands.send(Command::Shutdown);
        let task = self
            .handle
            .await
            .map_err(|e| GalleryError::state(format!("progress driver failed: {}", e)))?;
        Ok(task.observe())
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| GalleryError::state("progress driver has stopped"))
    }
}

async fn run(
    mut task: ProgressTask,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshot: Signal<ProgressSnapshot>,
    events: mpsc::UnboundedSender<ProgressEvent>,
) -> ProgressTask {
    let mut ticker = time::interval(task.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let running = task.status().is_running();

        // Commands win over a tick that is due at the same time, so a cancel
        // always lands before the next step.
        let event = tokio::select! {
            biased;
            command = commands.recv() => match command {
                Some(Command::Start) => start(&mut task, &mut ticker),
                Some(Command::Cancel) => task.cancel(),
                Some(Command::Toggle) if task.status().is_running() => task.cancel(),
                Some(Command::Toggle) => start(&mut task, &mut ticker),
                Some(Command::Shutdown) | None => break,
            },
            _ = ticker.tick(), if running => task.tick(),
        };

        snapshot.set_if_changed(task.observe());

        if let Some(event) = event {
            match event {
                ProgressEvent::Started => {
                    gallery_debug!(LogCategory::Progress, "driver started run")
                }
                ProgressEvent::Completed | ProgressEvent::Cancelled => gallery_info!(
                    LogCategory::Progress,
                    ?event,
                    percent = task.observe().percent(),
                    "run finished"
                ),
            }
            // Nobody listening is fine; the snapshot still carries the state.
            let _ = events.send(event);
        }
    }

    gallery_debug!(LogCategory::Progress, "driver stopped");
    task
}

/// Start a run; the first step lands one full interval later.
fn start(task: &mut ProgressTask, ticker: &mut time::Interval) -> Option<ProgressEvent> {
    let event = task.start();
    if event.is_some() {
        ticker.reset();
    }
    event
}
