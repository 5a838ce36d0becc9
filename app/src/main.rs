use std::io::stdout;

use common::{config::Settings, pipeline, render::TerminalRenderer};
use eyre::Result;
use tracing::{error, warn};
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const CRATES: &[&str] = &["gol_bench_plot", "common"];

/// A bare level in `RUST_LOG` applies to this workspace's crates, anything
/// else is read as a full filter. An unusable value falls back to `warn`.
fn env_filter(rust_log: Option<&str>) -> (EnvFilter, Option<String>) {
    let per_crate = |level: LevelFilter| {
        CRATES.iter().fold(EnvFilter::default(), |filter, name| {
            filter.add_directive(
                format!("{name}={level}")
                    .parse()
                    .unwrap_or_else(|_| level.into()),
            )
        })
    };

    let Some(rust_log) = rust_log.map(str::trim).filter(|x| !x.is_empty()) else {
        return (per_crate(LevelFilter::WARN), None);
    };
    if let Ok(level) = rust_log.parse::<LevelFilter>() {
        return (per_crate(level), None);
    }
    match EnvFilter::try_new(rust_log) {
        Ok(filter) => (filter, None),
        Err(err) => (
            per_crate(LevelFilter::WARN),
            Some(format!("Ignoring RUST_LOG={rust_log:?}: {err}")),
        ),
    }
}

fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let (env_filter, rejected) = env_filter(rust_log.as_deref());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
    if let Some(rejected) = rejected {
        warn!("{rejected}");
    }

    let settings = Settings::default();
    let mut renderer = TerminalRenderer::new(stdout(), settings.bar_width);
    if let Err(err) = pipeline::run(&settings, &mut stdout(), &mut renderer) {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}
