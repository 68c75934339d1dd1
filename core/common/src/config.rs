//! 環境変数からの設定読み込み

use crate::error::Error;
use std::env;
use std::path::PathBuf;

/// 配布テンプレートに入っているダミーキー。実キーに差し替えずに
/// 使われた場合は設定エラーとして即座に失敗させる
const PLACEHOLDER_KEY: &str = "nagi-portfolio-api-key";

/// 生成・モデル一覧エンドポイントの既定ベースURL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// 生成APIの接続設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ApiConfig {
    /// 環境変数から設定を読む。
    ///
    /// - `GEMINI_API_KEY` - APIキー（必須）
    /// - `STORY_API_BASE` - エンドポイントのベースURL（省略時は既定値）
    pub fn from_env() -> Result<Self, Error> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| Error::config("GEMINI_API_KEY environment variable is not set"))?;
        let base_url = env::var("STORY_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, base_url)
    }

    /// キーの検証込みで構築する（環境変数には依存しない。テストはこちらを使う）
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::config("GEMINI_API_KEY is empty"));
        }
        if api_key == PLACEHOLDER_KEY {
            return Err(Error::config(
                "GEMINI_API_KEY is still the placeholder value; replace it with a real key",
            ));
        }
        Ok(Self {
            api_key,
            base_url: base_url.into(),
        })
    }
}

/// ログファイルのパスを解決する。
/// `STORY_HOME` > `$XDG_STATE_HOME/story` > `$HOME/.local/state/story` の順。
/// どれも決まらなければ None（ログなしで動く）。
pub fn log_file_path() -> Option<PathBuf> {
    let dir = if let Ok(home) = env::var("STORY_HOME") {
        PathBuf::from(home)
    } else if let Ok(state) = env::var("XDG_STATE_HOME") {
        PathBuf::from(state).join("story")
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".local/state/story")
    } else {
        return None;
    };
    Some(dir.join("story.jsonl"))
}
