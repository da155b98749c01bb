use std::error::Error;
use std::io;

use tracing::{error, info};

use numguess::config::game::GameConfig;
use numguess::config::log::LogConfig;
use numguess::config::ConfigFile;
use numguess::service::log::init_logger;
use numguess::terminal::Console;
use numguess::{GameSession, JsonFileStore, ScoreKeeper};

type MainResult = Result<(), Box<dyn Error>>;

fn main() -> MainResult {
    let log_config = ConfigFile::<LogConfig>::new("log").read();
    let _guards = init_logger(&log_config);

    let config = ConfigFile::<GameConfig>::new("game").read();

    let store = JsonFileStore::new(&config.leaderboard_path);
    let keeper = match ScoreKeeper::load_with_capacity(store, config.leaderboard_size) {
        Ok(k) => k,
        Err(e) => {
            error!("读取排行榜({})失败: {}", config.leaderboard_path, e);
            return Err(e.into());
        }
    };
    info!("已加载排行榜, 共 {} 条记录", keeper.entries().len());

    let session = GameSession::new(keeper);
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut console = Console::new(session, config, stdin.lock(), stdout.lock());
    if let Err(e) = console.run() {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}
