//! 配線と実行
//!
//! 設定 → APIクライアント → ジェネレータを組み立てて1回の生成を行う。
//! 生成はブロッキングで同時に1件だけ。多重リクエストの無効化は
//! プロセスモデルそのものが保証する。

use common::config::{self, ApiConfig};
use common::domain::{ModelName, Story};
use common::error::Error;
use common::llm::candidates;
use common::llm::gemini::GeminiApi;
use common::llm::{error_story, FallbackOrchestrator, StoryGenerator};
use common::log::{now_iso8601, FileJsonLog, Log, LogLevel, LogRecord, NoopLog};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cli::Config;
use crate::presenter;

pub fn run(config: Config) -> Result<i32, Error> {
    let theme = config.theme_args.join(" ");
    if theme.trim().is_empty() {
        return Err(Error::invalid_argument(
            "No theme provided. Pass one or more theme words.",
        ));
    }

    let logger: Arc<dyn Log> = match config::log_file_path() {
        Some(path) => Arc::new(FileJsonLog::new(path)),
        None => Arc::new(NoopLog),
    };
    log_lifecycle(logger.as_ref(), "generation started", &theme);

    let result = generate(&config, &theme, logger.clone());
    let (story, code) = match result {
        Ok(story) => (story, 0),
        Err(e) if e.is_usage() => return Err(e),
        Err(e) => {
            // 失敗もStoryの形で表示する。表示経路は成功時と共通
            let _ = logger.log(&LogRecord {
                ts: now_iso8601(),
                level: LogLevel::Error,
                message: e.to_string(),
                fields: None,
            });
            (error_story(&e), e.exit_code())
        }
    };

    presenter::present(&story, config.no_type, config.speed_ms);
    log_lifecycle(logger.as_ref(), "generation finished", &theme);
    Ok(code)
}

fn generate(config: &Config, theme: &str, logger: Arc<dyn Log>) -> Result<Story, Error> {
    let api_config = ApiConfig::from_env()?;
    let api = GeminiApi::new(&api_config);

    let mut list = candidates::default_candidates();
    if let Some(model) = &config.model {
        list.insert(0, ModelName::new(model.clone()));
    }

    let orchestrator = FallbackOrchestrator::new(api, list).with_logger(logger);
    StoryGenerator::new(orchestrator).generate(theme)
}

fn log_lifecycle(logger: &dyn Log, message: &str, theme: &str) {
    let _ = logger.log(&LogRecord {
        ts: now_iso8601(),
        level: LogLevel::Info,
        message: message.to_string(),
        fields: {
            let mut m = BTreeMap::new();
            m.insert("theme".to_string(), serde_json::json!(theme));
            Some(m)
        },
    });
}
