use log::LevelFilter;
use simplelog::{Color, ColorChoice, ConfigBuilder, Level, TermLogger, TerminalMode};

/// Environment variable read by [`init_test_logger`], e.g. `MUSUBI_LOG=debug`.
pub const LOG_ENV: &str = "MUSUBI_LOG";

/// Installs a colored terminal logger. Intended for binaries and tests; 
/// the library itself only emits records through the `log` macros.
pub fn init_simple_logger(l: LevelFilter) -> Result<(), log::SetLoggerError> { 
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_level_color(Level::Trace, Some(Color::Green))
        .build();

    TermLogger::init(
        l,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto
    )
}

/// Parses a level name (`"info"`, `"DEBUG"`, ...). Unset or unknown names give `Off`.
pub fn level_from(s: Option<&str>) -> LevelFilter {
    s.and_then(|s| s.trim().parse().ok()).unwrap_or(LevelFilter::Off)
}

/// Turns on log output for tests when `MUSUBI_LOG` is set.
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test_logger() {
    let var = std::env::var(LOG_ENV).ok();
    let l = level_from(var.as_deref());
    if l != LevelFilter::Off {
        // fails once a logger is installed.
        let _ = init_simple_logger(l);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level() {
        assert_eq!(level_from(None), LevelFilter::Off);
        assert_eq!(level_from(Some("info")), LevelFilter::Info);
        assert_eq!(level_from(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_from(Some(" trace ")), LevelFilter::Trace);
        assert_eq!(level_from(Some("loud")), LevelFilter::Off);
    }

    #[test]
    fn init_twice() {
        assert!(init_simple_logger(LevelFilter::Warn).is_ok());
        assert!(init_simple_logger(LevelFilter::Warn).is_err());
        init_test_logger();
    }
}
