use serde::{Deserialize, Serialize};

use crate::data::DEFAULT_LEADERBOARD_PATH;
use crate::game::score::DEFAULT_CAPACITY;
use crate::game::Range;

/// 游戏配置
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// 未输入名字时使用的玩家名
    pub player_name: String,
    /// 排行榜文件
    pub leaderboard_path: String,
    /// 排行榜最多保留的记录数
    pub leaderboard_size: usize,
    /// 游戏结束后显示的记录数
    pub shown_scores: usize,
    /// 未选择难度时使用的难度名
    pub default_difficulty: String,
    /// 可选难度, 按顺序编号
    #[serde(rename = "difficulty")]
    pub difficulties: Vec<Difficulty>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub name: String,
    pub min: i64,
    pub max: i64,
    pub max_attempts: u32,
}

impl Difficulty {
    pub fn new<S: ToString>(name: S, min: i64, max: i64, max_attempts: u32) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
            max_attempts,
        }
    }

    pub fn range(&self) -> Range {
        Range::new(self.min, self.max)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".into(),
            leaderboard_path: DEFAULT_LEADERBOARD_PATH.into(),
            leaderboard_size: DEFAULT_CAPACITY,
            shown_scores: 5,
            default_difficulty: "Medium".into(),
            difficulties: vec![
                Difficulty::new("Easy", 1, 50, 8),
                Difficulty::new("Medium", 1, 100, 7),
                Difficulty::new("Hard", 1, 200, 6),
            ],
        }
    }
}

impl GameConfig {
    /// Picks a difficulty by its 1-based menu number. Anything else falls
    /// back to the default difficulty.
    pub fn difficulty(&self, choice: &str) -> Difficulty {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.difficulties.get(i))
            .cloned()
            .unwrap_or_else(|| self.default_difficulty())
    }

    pub fn default_difficulty(&self) -> Difficulty {
        self.difficulties
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(&self.default_difficulty))
            .or_else(|| self.difficulties.first())
            .cloned()
            .unwrap_or_else(|| Difficulty::new("Medium", 1, 100, 7))
    }
}
