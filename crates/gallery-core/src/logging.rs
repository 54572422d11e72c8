//! Logging system for the gallery SDK
//!
//! Thin layer over `tracing`: every message is emitted under a category
//! target, and the per-category levels from [`LoggingConfig`] become
//! `EnvFilter` directives. `RUST_LOG` still wins when it is set.

use crate::config::LoggingConfig;
use crate::error::{GalleryError, Result};
use parking_lot::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories for organizing log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Core,
    Progress,
    Loading,
    Config,
}

impl LogCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Core => "core",
            LogCategory::Progress => "progress",
            LogCategory::Loading => "loading",
            LogCategory::Config => "config",
        }
    }
}

impl std::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[macro_export]
macro_rules! gallery_debug {
    ($category:expr, $($arg:tt)*) => {
        ::tracing::debug!(target: $category.as_str(), $($arg)*)
    };
}

#[macro_export]
macro_rules! gallery_info {
    ($category:expr, $($arg:tt)*) => {
        ::tracing::info!(target: $category.as_str(), $($arg)*)
    };
}

#[macro_export]
macro_rules! gallery_warn {
    ($category:expr, $($arg:tt)*) => {
        ::tracing::warn!(target: $category.as_str(), $($arg)*)
    };
}

static INITIALIZED: Mutex<bool> = Mutex::new(false);

/// Build the filter directive string, e.g. `info,progress=debug,config=warn`
pub fn filter_directives(config: &LoggingConfig) -> Result<String> {
    let default = LogLevel::parse(&config.default_level).ok_or_else(|| {
        GalleryError::configuration(format!(
            "unknown log level '{}'",
            config.default_level
        ))
    })?;

    let mut categories: Vec<_> = config.category_levels.iter().collect();
    categories.sort();

    let mut directives = vec![default.as_str().to_string()];
    for (category, level) in categories {
        let level = LogLevel::parse(level).ok_or_else(|| {
            GalleryError::configuration(format!(
                "unknown log level '{}' for category '{}'",
                level, category
            ))
        })?;
        directives.push(format!("{}={}", category, level));
    }
    Ok(directives.join(","))
}

/// Pick the active filter. An environment filter wins, and a config error is
/// then handed back for reporting instead of failing.
fn build_filter(
    config: &LoggingConfig,
    env_filter: Option<EnvFilter>,
) -> Result<(EnvFilter, Option<GalleryError>)> {
    let directives = filter_directives(config);
    match env_filter {
        Some(filter) => Ok((filter, directives.err())),
        None => Ok((EnvFilter::new(directives?), None)),
    }
}

/// Initialize the logging system. Calling it again is a no-op.
///
/// When `RUST_LOG` is set it replaces the configured levels, and an invalid
/// `category_levels` entry is then only reported as a warning.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let mut initialized = INITIALIZED.lock();
    if *initialized {
        return Ok(());
    }

    let (filter, ignored) = build_filter(config, EnvFilter::try_from_default_env().ok())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| GalleryError::initialization(format!("tracing subscriber: {}", e)))?;

    *initialized = true;
    if let Some(err) = ignored {
        crate::gallery_warn!(LogCategory::Config, %err, "logging config ignored in favor of RUST_LOG");
    }
    Ok(())
}

pub fn is_initialized() -> bool {
    *INITIALIZED.lock()
}
