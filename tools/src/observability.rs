use std::env;

use anyhow::Context;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_LEVEL: &str = "info";

/// Installs the global fmt subscriber.
///
/// The level comes from `RUST_LOG` (default `info`) and applies to the
/// application crate `name` as well. HTTP client internals are kept at `warn`.
pub fn setup_tracing(name: &'static str) -> anyhow::Result<()> {
    let level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.to_owned());

    let filter = build_filter(name, &level)?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}

fn build_filter(name: &str, level: &str) -> anyhow::Result<EnvFilter> {
    let mut filter =
        EnvFilter::try_new(level).with_context(|| format!("Invalid log filter {level:?}"))?;

    // A bare level also applies to the binary's own target.
    if level.parse::<LevelFilter>().is_ok() {
        let crate_name = name.replace('-', "_");
        filter = filter.add_directive(format!("{crate_name}={level}").parse()?);
    }

    Ok(filter
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?))
}
