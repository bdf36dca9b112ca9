use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the `env_logger` backend once per process.
///
/// Defaults to `info` for this crate and `warn` elsewhere; `RUST_LOG`
/// overrides both.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("energy_forecast", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed by the host application
        let _ = builder.try_init();
    });
}
