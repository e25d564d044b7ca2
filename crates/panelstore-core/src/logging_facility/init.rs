//! Subscriber installation
//!
//! All events go to stderr so that command output on stdout stays parseable.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// How log events are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug and above
    Development,
    /// One JSON object per event, info and above
    Production,
    /// In-memory capture only (see [`init_test_capture`](super::init_test_capture))
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset or invalid
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development | Profile::Test => "panelstore=debug",
            Profile::Production => "panelstore=info",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has any effect.
///
/// ```
/// use panelstore_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(profile.filter())
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr)
                .with_env_filter(profile.filter())
                .init();
        }
        Profile::Test => {
            super::init_test_capture();
        }
    });
}
