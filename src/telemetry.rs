use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Default log level for this crate in the given environment.
pub fn default_level(environment: Environment) -> &'static str {
    match environment {
        Environment::Local => "debug",
        Environment::Production => "info",
    }
}

/// Build the log subscriber for `environment`.
///
/// `local` logs human-readable text at debug, everything else logs JSON at
/// info. `RUST_LOG` adds directives for other targets. The caller decides
/// whether to install it globally or scope it.
pub fn subscriber(environment: Environment) -> Result<Box<dyn Subscriber + Send + Sync>> {
    let level = default_level(environment);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("translation_service={}", level).parse()?)
        .add_directive(format!("tower_http={}", level).parse()?);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    Ok(match environment {
        Environment::Local => Box::new(builder.with_target(true).finish()),
        Environment::Production => Box::new(builder.json().flatten_event(true).finish()),
    })
}
