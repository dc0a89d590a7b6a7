use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use std::env;
use std::path::{Path, PathBuf};

/// 選擇環境的環境變數
pub const ENV_VAR: &str = "BREAKOUT_ENV";

/// 覆寫配置目錄的環境變數
pub const CONFIG_DIR_VAR: &str = "CONFIG_DIR";

/// 覆寫配置值的環境變數前綴，例如 `BREAKOUT__SCAN__HOLDING_PERIOD`
pub const ENV_PREFIX: &str = "BREAKOUT";

/// 環境類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 從環境變數取得當前環境設定
    pub fn from_env() -> Self {
        match env::var(ENV_VAR)
            .unwrap_or_else(|_| "development".into())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// 轉換為配置文件名
    pub fn as_filename(&self) -> &'static str {
        match self {
            Environment::Development => "development.toml",
            Environment::Production => "production.toml",
        }
    }
}

/// 配置加載器，依序疊加內建預設值、`default.toml`、環境配置檔與環境變數
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置目錄
    pub fn config_dir() -> PathBuf {
        PathBuf::from(env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| "config".into()))
    }

    /// 載入指定目錄與環境的配置，配置檔不存在時略過
    pub fn load_from(dir: &Path, env: Environment) -> Result<Config, ConfigError> {
        Config::builder()
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("data.directory", "data")?
            .set_default("scan.volume_threshold_pct", 200)?
            .set_default("scan.price_change_threshold_pct", 2)?
            .set_default("scan.holding_period", 10)?
            .set_default("scan.preview_rows", 5)?
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join(env.as_filename())).required(false))
            // 環境變數優先級高於文件配置
            .add_source(
                ConfigEnvironment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
    }

    /// 載入指定環境的配置
    pub fn load(env: Environment) -> Result<Config, ConfigError> {
        Self::load_from(&Self::config_dir(), env)
    }

    /// 載入當前環境的配置
    pub fn load_current() -> Result<Config, ConfigError> {
        Self::load(Environment::from_env())
    }
}
