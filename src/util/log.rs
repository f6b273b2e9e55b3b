use std::collections::HashMap;
use std::path::Path;
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::time::OffsetTime;

pub static LAST_LOG: LazyLock<Mutex<HashMap<String, Instant>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[macro_export]
macro_rules! warn_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        let loc = $crate::util::assert::current_location!().to_string();
        {
            let mut last_log = $crate::util::log::LAST_LOG.lock().unwrap();
            if last_log.get(&loc).map_or(true, |then| then.elapsed().as_secs() >= $seconds) {
                $crate::core::prelude::warn!($($args),+);
                last_log.insert(loc.clone(), std::time::Instant::now());
            }
        }
    }
}
#[allow(unused_imports)]
pub use warn_every_seconds;

#[macro_export]
macro_rules! error_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        let loc = $crate::util::assert::current_location!().to_string();
        {
            let mut last_log = $crate::util::log::LAST_LOG.lock().unwrap();
            if last_log.get(&loc).map_or(true, |then| then.elapsed().as_secs() >= $seconds) {
                $crate::core::prelude::error!($($args),+);
                last_log.insert(loc.clone(), std::time::Instant::now());
            }
        }
    }
}
#[allow(unused_imports)]
pub use error_every_seconds;

/// Installs the global `tracing` subscriber. Logs go to `logfile` (truncated) when given,
/// otherwise to stderr.
pub fn setup_log(logfile: Option<&Path>) -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .with_source_location(true)
        .with_timer(timer);
    match logfile {
        Some(path) => {
            let logfile = std::fs::OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(path)
                .with_context(|| format!("could not open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .event_format(format)
                .with_writer(Mutex::new(logfile))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .event_format(format)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
