//! Process-wide subscriber setup

use std::sync::OnceLock;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output profile for the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines on stderr, debug and up
    Development,
    /// One JSON object per line on stderr, info and up
    Production,
    /// Bare registry with no output
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "staplay=debug",
            Profile::Production | Profile::Test => "staplay=info",
        }
    }
}

static ACTIVE: OnceLock<Profile> = OnceLock::new();

/// Install the global subscriber for `profile`
///
/// Only the first call installs anything. Every call returns the profile
/// that is actually active. If some other subscriber was already set
/// globally, it stays in place and this records the requested profile.
pub fn init(profile: Profile) -> Profile {
    *ACTIVE.get_or_init(|| {
        if !install(profile) {
            tracing::debug!(?profile, "global subscriber already set");
        }
        profile
    })
}

fn install(profile: Profile) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));

    match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init()
            .is_ok(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init()
            .is_ok(),
        Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
    }
}
