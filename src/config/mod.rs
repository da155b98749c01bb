use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub mod game;
pub mod log;

const CONFIG_PATH: &str = "config";

pub fn config_dir_path() -> &'static Path {
    Path::new(CONFIG_PATH)
}

/// A TOML file holding `T`.
///
/// A missing file is created from `T::default()`. A file that fails to parse
/// is copied to `<name>.toml.bak` and replaced with the default.
pub struct ConfigFile<T> {
    path: PathBuf,
    name: &'static str,
    _mark: PhantomData<T>,
}

impl<T> ConfigFile<T>
where
    for<'de> T: Serialize + Deserialize<'de> + Default,
{
    pub fn new(name: &'static str) -> Self {
        Self::with_dir(config_dir_path(), name)
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P, name: &'static str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{name}.toml")),
            name,
            _mark: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> T {
        if !self.path.is_file() {
            info!("配置文件({:?})不存在, 已生成默认配置", self.path);
            return self.write_default();
        }

        match fs::read_to_string(&self.path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                error!("读取配置文件({:?})时发生错误: {}", self.path, e);

                let mut bk = self.path.clone();
                bk.pop();
                bk.push(format!("{}.toml.bak", self.name));
                if let Err(e) = fs::copy(&self.path, &bk) {
                    error!("备份配置文件到({:?})时发生错误: {}", bk, e);
                }

                self.write_default()
            }),
            Err(e) => {
                error!("读取配置文件({:?})时发生错误: {}", self.path, e);
                T::default()
            }
        }
    }

    pub fn write(&self, data: &T) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let s = toml::to_string_pretty(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, s)
    }

    fn write_default(&self) -> T {
        let default = T::default();
        if let Err(e) = self.write(&default) {
            error!("写入配置文件({:?})时发生错误: {}", self.path, e);
        }
        default
    }
}
