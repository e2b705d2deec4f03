use std::{io, path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initializes logging once for the whole process, writing to `path`.
/// The original engine treats its debug log as load-bearing: if the sink
/// can't be opened, startup aborts rather than silently running unlogged.
/// Returns the I/O error from opening the file so the caller can do that.
pub fn init_logging<P: AsRef<Path>>(path: P, filter: &str) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;

    INIT.get_or_init(|| {
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let _ = GUARD.set(guard);

        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let subscriber = fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(non_blocking)
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });

    Ok(())
}
