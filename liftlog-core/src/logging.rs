use log::LevelFilter;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error as ThisError;

/// Names accepted by `--log-level`, quietest first.
pub const LEVEL_NAMES: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("unknown log level {0:?}, expected one of: {names}", names = LEVEL_NAMES.join(", "))]
pub struct UnknownLevel(pub String);

/// Level named on the command line, or `fallback` when none was given.
pub fn resolve_level(name: Option<&str>, fallback: LevelFilter) -> Result<LevelFilter, UnknownLevel> {
    let Some(name) = name else {
        return Ok(fallback);
    };
    let name = name.trim();
    if name.eq_ignore_ascii_case("warning") {
        return Ok(LevelFilter::Warn);
    }
    LevelFilter::from_str(name).map_err(|_| UnknownLevel(name.to_string()))
}

/// Sends `liftlog` records at or above the resolved level to stderr.
/// Records from dependencies are dropped. Returns the level in effect.
pub fn init_logger(name: Option<&str>, fallback: LevelFilter) -> Result<LevelFilter, UnknownLevel> {
    let level = resolve_level(name, fallback)?;

    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .filter_level(LevelFilter::Off)
        .filter_module("liftlog", level);

    // A second call keeps the first logger; only the ceiling moves.
    let _ = builder.try_init();
    log::set_max_level(level);

    Ok(level)
}
