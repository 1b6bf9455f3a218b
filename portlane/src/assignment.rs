//! The process-wide allocator used by test code.
//!
//! Every test in a process must draw from the same cursor, otherwise two
//! tests could be handed the same port before either binds it. The shared
//! allocator is built on first use from [`ConfigBuilder`] (file, environment
//! and process arguments) and lives until the process exits.
//!
//! # Examples
//!
//! ```no_run
//! use std::net::TcpListener;
//!
//! let port = portlane::unique_port().unwrap();
//! let listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
//! ```

use std::sync::OnceLock;

use crate::config::{Config, ConfigBuilder};
use crate::port::allocator::SequentialPortAllocator;
use crate::{Port, Result};

static GLOBAL: OnceLock<SequentialPortAllocator> = OnceLock::new();

/// Returns the shared allocator, building it on first use.
///
/// A configuration that cannot be loaded is logged and replaced by the
/// default configuration, which owns the whole global range.
pub fn global_allocator() -> &'static SequentialPortAllocator {
    GLOBAL.get_or_init(|| {
        let config = load_config();
        let allocator = config.build_allocator();
        log::debug!("port allocator ready: {config}");
        allocator
    })
}

/// Assigns a port that is unique within this process and bindable right now.
///
/// # Errors
///
/// Returns [`crate::Error::RangeExhausted`] if every port of this worker's
/// range is occupied.
pub fn unique() -> Result<Port> {
    global_allocator().allocate()
}

/// Like [`unique`], but returns the bare port number.
///
/// # Errors
///
/// Returns [`crate::Error::RangeExhausted`] if every port of this worker's
/// range is occupied.
pub fn unique_port() -> Result<u16> {
    unique().map(Port::value)
}

fn load_config() -> Config {
    match ConfigBuilder::new().build() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring port allocator configuration: {e}");
            Config::default()
        }
    }
}
