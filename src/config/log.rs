use serde::{Deserialize, Serialize};

/// 日志配置
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// 写入日志文件的最高等级
    pub max_level: Level,
    /// 输出到终端的最高等级, 避免打断游戏画面
    pub console_level: Level,
    /// 日志目录
    pub dir: String,
    pub time_format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_level: Level::Info,
            console_level: Level::Warn,
            dir: "log".into(),
            time_format: "[year]-[month]-[day] [hour]:[minute]:[second]".into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => Self::TRACE,
            Level::Debug => Self::DEBUG,
            Level::Info => Self::INFO,
            Level::Warn => Self::WARN,
            Level::Error => Self::ERROR,
        }
    }
}
