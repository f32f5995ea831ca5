//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system. Defaults to info level; `RUST_LOG`
/// overrides. Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init();
        init();
    }
}
