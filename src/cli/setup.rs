//! Runtime setup: logging and the rayon thread pool.

use log::LevelFilter;

/// Rayon thread stack size (8MB for deeply nested syntax trees)
const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let workers = get_worker_count(jobs);
    let builder = rayon::ThreadPoolBuilder::new()
        .stack_size(RAYON_STACK_SIZE)
        .num_threads(workers);

    match builder.build_global() {
        Ok(()) => log::debug!("Using {} worker thread(s)", workers),
        Err(e) => log::debug!("Thread pool already configured: {}", e),
    }
}

/// Get the number of worker threads to use
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        jobs
    }
}

pub fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize `env_logger` at the level implied by `-v`. `RUST_LOG`, when
/// set, takes precedence.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbosity));
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.format_timestamp(None).try_init();
}
