//! Subscriber setup: per-environment filter defaults and a selectable output format.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, LogFormat, Settings};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "dashboard_auth=debug,tower_http=debug,info",
        Environment::Staging => "dashboard_auth=debug,tower_http=info,info",
        Environment::Prod => "dashboard_auth=info,tower_http=warn,warn",
    }
}

pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&settings.env)));

    let registry = tracing_subscriber::registry().with(filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    match settings.log_format {
        LogFormat::Json => registry.with(fmt_layer.json().flatten_event(true)).init(),
        LogFormat::Compact => registry.with(fmt_layer.compact()).init(),
        LogFormat::Pretty => registry
            .with(fmt_layer.pretty().with_file(true).with_line_number(true))
            .init(),
    }

    tracing::info!(
        env = ?settings.env,
        format = ?settings.log_format,
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_for_every_environment() {
        for env in [Environment::Dev, Environment::Staging, Environment::Prod] {
            let directives = default_filter(&env);
            assert!(directives.parse::<EnvFilter>().is_ok(), "{directives}");
            assert!(directives.starts_with("dashboard_auth="));
        }
    }

    #[test]
    fn prod_is_quieter_than_dev() {
        assert!(default_filter(&Environment::Dev).contains("dashboard_auth=debug"));
        assert!(default_filter(&Environment::Prod).contains("dashboard_auth=info"));
        assert!(default_filter(&Environment::Prod).ends_with(",warn"));
    }
}
