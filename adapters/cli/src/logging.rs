use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global logger; `RUST_LOG` takes precedence over `verbose`.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.to_string()));
    let _ = builder.try_init();
}
