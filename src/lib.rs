//! Gallery SDK - progress tracking for the widget gallery demos
//!
//! Bundles the [`ProgressTask`](gallery_core::ProgressTask) state machine
//! with the tokio drivers that run it, so a presentation layer only needs to
//! forward button presses and redraw from snapshots.
//!
//! ```no_run
//! use gallery_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = gallery_sdk::init()?;
//!     let controller = ProgressDriver::spawn(ProgressTask::with_config(&config.progress)?);
//!     let mut events = controller.events()?;
//!
//!     controller.start()?;
//!     while let Some(event) = events.recv().await {
//!         if let Some(notice) = Notice::for_progress(&event) {
//!             println!("{}", notice);
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub use gallery_core;
pub use gallery_tasks;

use gallery_core::config::{self, GalleryConfig};
use gallery_core::Result;

/// Unified prelude module that exports all commonly used types
pub mod prelude {
    pub use gallery_core::prelude::*;
    pub use gallery_tasks::prelude::*;
}

/// Initialize with default configuration
pub fn init() -> Result<GalleryConfig> {
    init_with_config(GalleryConfig::default())
}

/// Validate `config`, install it as the global configuration and start logging.
///
/// If a global configuration already exists it is kept and returned instead.
pub fn init_with_config(config: GalleryConfig) -> Result<GalleryConfig> {
    config.validate()?;
    let manager = config::init_config_with(config);
    let active = manager.get_config();
    gallery_core::init(&active)?;
    Ok(active)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
