use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Store events are logged under the
/// `volunteer_registry` target; request spans come from `tower_http`.
fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "volunteer_registry=debug,tower_http=debug,sqlx=warn,info",
        Environment::Staging => "volunteer_registry=debug,tower_http=info,sqlx=warn,info",
        Environment::Prod => "volunteer_registry=info,tower_http=info,warn",
    }
}

/// Installs the global subscriber: JSON lines in prod, pretty output with
/// source locations in dev.
pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    let registry = tracing_subscriber::registry().with(filter);
    match env {
        Environment::Prod => registry.with(fmt_layer.json()).init(),
        Environment::Dev | Environment::Staging => registry.with(fmt_layer.pretty()).init(),
    }

    tracing::info!(environment = ?env, "Logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse() {
        for env in [Environment::Dev, Environment::Staging, Environment::Prod] {
            assert!(default_filter(&env).parse::<EnvFilter>().is_ok());
        }
    }
}
