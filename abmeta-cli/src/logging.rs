// ============================================================================
// abmeta-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// Log records go to stderr and stay separate from the diagnostics written to
// stdout. RUST_LOG overrides the default filter:
// - default: warnings and errors only
// - --verbose: debug records from the abmeta crates
// - RUST_LOG=trace: everything

use log::LevelFilter;

/// Returns the filter used when RUST_LOG is not set.
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let level = level.to_string().to_lowercase();
    format!("warn,abmeta={level},abmeta_cli={level},abmeta_core={level}")
}

/// Initializes the global logger.
pub fn init(verbose: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter(verbose)))
        .format_timestamp(None)
        .init();
}
