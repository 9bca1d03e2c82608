use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;
use std::path::Path;

/// Resolves the log level from an explicit value or `RUST_LOG`.
///
/// Falls back to `info` when neither is set or the value does not parse.
pub fn resolve_level(explicit: Option<&str>) -> LevelFilter {
    let raw = match explicit {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
    };

    raw.parse::<LevelFilter>().unwrap_or(LevelFilter::Info)
}

/// Initializes the global logger.
///
/// Call once from `main`. Console output goes to stderr so stdout stays free
/// for the diagram JSON. When `log_file` is given, records are also appended
/// to that file (parent directories are created on demand).
pub fn init(level: LevelFilter, log_file: Option<&Path>) {
    let base_config = Dispatch::new().level(level).level_for("serde", LevelFilter::Warn);

    let console_config = Dispatch::new()
        .format(|out, message, record| {
            let colors = ColoredLevelConfig::new()
                .error(Color::Red)
                .warn(Color::Yellow)
                .info(Color::Green)
                .debug(Color::Blue)
                .trace(Color::BrightBlack);

            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = base_config.chain(console_config);

    if let Some(path) = log_file {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("Failed to create log directory at '{}': {}", dir.display(), e);
            }
        }

        match fern::log_file(path) {
            Ok(file) => {
                let file_config = Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.target(), message))
                    })
                    .chain(file);
                dispatch = dispatch.chain(file_config);
            }
            Err(e) => eprintln!("Failed to open log file '{}': {}", path.display(), e),
        }
    }

    dispatch.apply().unwrap_or_else(|e| {
        eprintln!("Failed to apply logger configuration: {}", e);
    });

    log::debug!("Logger initialized at level {}.", level);
}
