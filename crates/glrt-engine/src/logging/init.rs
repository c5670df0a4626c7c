use std::sync::Once;

use log::LevelFilter;

/// Crates whose info output is mostly windowing chatter.
const QUIET_CRATES: [&str; 3] = ["winit", "glutin", "glutin_winit"];

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax, e.g. "glrt_engine=debug". Wins over
    /// `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Effective filter: explicit config, then `rust_log`, then the default
/// level with the windowing crates held at `warn`.
fn filter_spec(config: &LoggingConfig, rust_log: Option<String>) -> String {
    if let Some(filter) = config.env_filter.clone().or(rust_log) {
        return filter;
    }

    let mut spec = config.default_level.to_string().to_lowercase();
    if config.default_level > LevelFilter::Warn {
        for name in QUIET_CRATES {
            spec.push_str(&format!(",{name}=warn"));
        }
    }
    spec
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` once; later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let spec = filter_spec(&config, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&spec)
            .write_style(config.write_style)
            .format_target(true)
            .init();

        log::debug!("logging initialized with filter '{spec}'");
    });
}
