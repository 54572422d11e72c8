//! Transient notices shown when a demo task finishes

use crate::loading::LoadingEvent;
use gallery_core::ProgressEvent;
use std::fmt;
use std::time::Duration;

/// How long a notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_millis(2_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn duration(&self) -> Duration {
        NOTICE_DURATION
    }

    /// Completion and cancellation get distinct notices; starting gets none.
    pub fn for_progress(event: &ProgressEvent) -> Option<Self> {
        match event {
            ProgressEvent::Started => None,
            ProgressEvent::Completed => Some(Self::new("Download finished!")),
            ProgressEvent::Cancelled => Some(Self::new("Download cancelled")),
        }
    }

    pub fn for_loading(event: &LoadingEvent) -> Self {
        match event {
            LoadingEvent::Finished { name } => Self::new(format!("{} loading finished!", name)),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_notices_are_distinct() {
        let finished = Notice::for_progress(&ProgressEvent::Completed).unwrap();
        let cancelled = Notice::for_progress(&ProgressEvent::Cancelled).unwrap();

        assert_eq!(finished.to_string(), "Download finished!");
        assert_eq!(cancelled.to_string(), "Download cancelled");
        assert_ne!(finished, cancelled);
        assert_eq!(Notice::for_progress(&ProgressEvent::Started), None);
    }

    #[test]
    fn test_loading_notice() {
        let notice = Notice::for_loading(&LoadingEvent::Finished {
            name: "Circular".to_string(),
        });
        assert_eq!(notice.message, "Circular loading finished!");
        assert_eq!(notice.duration(), Duration::from_secs(2));
    }
}
