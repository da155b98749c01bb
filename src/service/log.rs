use std::io;
use std::path::Path;

use time::format_description::OwnedFormatItem;
use time::macros::format_description;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::log::LogConfig;

const LOG_FILE_NAME: &str = "numguess.log";
const ERROR_FILE_NAME: &str = "numguess.err";

/// Installs the global subscriber: a daily log file, an error-only file, and
/// stderr for anything at or above `console_level`.
///
/// Logging stops once the returned guards are dropped.
pub fn init_logger(config: &LogConfig) -> [WorkerGuard; 3] {
    let local_offset = time::UtcOffset::current_local_offset();

    let (time_format, format_err) = match parse_time_format(&config.time_format) {
        Ok(f) => (f, None),
        Err(e) => (
            OwnedFormatItem::from(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            )),
            Some(e),
        ),
    };

    let (s, s_guard) = tracing_appender::non_blocking(io::stderr());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(s.with_max_level(tracing::Level::from(config.console_level)));

    let dir = Path::new(&config.dir);
    let file_writer = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (f, f_guard) = tracing_appender::non_blocking(file_writer);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(f.with_max_level(tracing::Level::from(config.max_level)));

    let file_error_writer = tracing_appender::rolling::daily(dir.join("error"), ERROR_FILE_NAME);
    let (f_err, f_err_guard) = tracing_appender::non_blocking(file_error_writer);

    let file_error_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(f_err.with_max_level(tracing::Level::ERROR));

    let (offset, offset_err) = match local_offset {
        Ok(ofs) => (ofs, None),
        Err(e) => (time::UtcOffset::UTC, Some(e)),
    };

    let timer = OffsetTime::new(offset, time_format);
    let (stderr_layer, file_layer, file_error_layer) = (
        stderr_layer.with_timer(timer.clone()),
        file_layer.with_timer(timer.clone()),
        file_error_layer.with_timer(timer),
    );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(file_error_layer)
        .init();

    if let Some(e) = offset_err {
        warn!("初始化日志时间错误: {}, 使用UTC", e);
    }

    if let Some(e) = format_err {
        warn!("日志时间格式({})无效: {}, 使用默认格式", config.time_format, e);
    }

    [s_guard, f_guard, f_err_guard]
}

fn parse_time_format(s: &str) -> Result<OwnedFormatItem, time::error::InvalidFormatDescription> {
    time::format_description::parse_owned::<2>(s)
}
