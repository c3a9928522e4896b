use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "beaunifi=info,bn_server=info";
pub const VERBOSE_FILTER: &str =
    "beaunifi=debug,bn_server=debug,bn_smart=debug,bn_codec=debug,bn_core=debug";

pub fn filter_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber. Output goes to stderr so stdout stays
/// reserved for the stdio transport and command output.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        tracing_subscriber::registry().with(filter).with(layer.json()).init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer.compact()).init();
    }
}
