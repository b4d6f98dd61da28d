use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber
///
/// Logs go to stderr so stdout carries only the rendered document. An
/// unparsable filter falls back to `info`. With `json` set, each event is a
/// single JSON line.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(log_filter: &str, json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        tracing_subscriber::registry().with(filter).with(fmt_layer.json()).try_init()?;
    } else {
        tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
    }

    Ok(())
}
