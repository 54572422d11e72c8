//! Core functionality for the widget gallery
//!
//! This crate provides the progress-tracking state machine behind the
//! download demo, the reactive [`Signal`] container the presentation layer
//! reads from, and the shared error, configuration and logging services.

pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod state;

pub use config::{ConfigManager, GalleryConfig, LoadingConfig, LoggingConfig, ProgressConfig};
pub use error::{GalleryError, Result};
pub use logging::{LogCategory, LogLevel};
pub use progress::{ProgressEvent, ProgressSnapshot, ProgressStatus, ProgressTask};
pub use state::{Signal, SubscriptionId};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        config::GalleryConfig,
        error::{GalleryError, Result},
        progress::{ProgressEvent, ProgressSnapshot, ProgressStatus, ProgressTask},
        state::Signal,
    };
}

/// Framework version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from the given configuration
pub fn init(config: &GalleryConfig) -> Result<()> {
    config.validate()?;
    logging::init(&config.logging)?;
    gallery_info!(LogCategory::Core, "Gallery core v{} initialized", VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let mut config = GalleryConfig::default();
        config.progress.tick_interval_ms = 0;
        assert!(init(&config).is_err());
    }
}
