/// Logger initialization
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored and touch
/// nothing, including `log_file`.
///
/// `filter` follows the `env_logger` syntax (e.g. "warn",
/// "rasterkit_core=debug"). Without it `RUST_LOG` is consulted, then the
/// level defaults to `warn`. Output goes to `log_file` when given, stderr
/// otherwise. If the file cannot be created the logger falls back to
/// stderr and the error is returned.
pub fn init_logging(filter: Option<&str>, log_file: Option<&Path>) -> io::Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        if let Some(path) = log_file {
            match File::create(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(err) => result = Err(err),
            }
        }

        builder.init();
        log::debug!("logging initialized");
    });
    result
}
