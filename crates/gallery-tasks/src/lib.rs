//! Async task drivers for the widget gallery
//!
//! Runs the progress and loading demos on tokio timers and turns their
//! terminal transitions into user-facing [`Notice`]s.

pub mod driver;
pub mod loading;
pub mod notice;

pub use driver::{ProgressController, ProgressDriver};
pub use loading::{LoadingEvent, LoadingStatus, LoadingTask};
pub use notice::{Notice, NOTICE_DURATION};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        driver::{ProgressController, ProgressDriver},
        loading::{LoadingEvent, LoadingStatus, LoadingTask},
        notice::Notice,
    };
}
