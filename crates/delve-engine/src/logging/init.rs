use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "delve_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted,
/// then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn default_level(mut self, level: log::LevelFilter) -> Self {
        self.default_level = level;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FilterSource {
    Explicit(String),
    Env(String),
    Level(log::LevelFilter),
}

fn resolve_filter(config: &LoggingConfig, env: Option<String>) -> FilterSource {
    if let Some(filter) = &config.env_filter {
        FilterSource::Explicit(filter.clone())
    } else if let Some(filter) = env.filter(|f| !f.trim().is_empty()) {
        FilterSource::Env(filter)
    } else {
        FilterSource::Level(config.default_level)
    }
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            FilterSource::Explicit(f) | FilterSource::Env(f) => {
                builder.parse_filters(&f);
            }
            FilterSource::Level(level) => {
                builder.filter_level(level);
            }
        }

        builder.write_style(config.write_style);

        // A logger installed elsewhere (tests, embedding app) wins.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
