//! テーマからStoryを得るユースケース

use crate::domain::{Story, ERROR_TITLE};
use crate::error::Error;
use crate::hidden;
use crate::llm::extract;
use crate::llm::invoker::GenerationApi;
use crate::llm::orchestrator::FallbackOrchestrator;
use crate::prompt;

/// 物語ジェネレータ
///
/// 隠しテーマの照合 → プロンプト組み立て → フォールバック実行 →
/// Story抽出、までを1つにまとめる。
pub struct StoryGenerator<A: GenerationApi> {
    orchestrator: FallbackOrchestrator<A>,
}

impl<A: GenerationApi> StoryGenerator<A> {
    pub fn new(orchestrator: FallbackOrchestrator<A>) -> Self {
        Self { orchestrator }
    }

    /// テーマ1つからStoryを1つ作る。
    ///
    /// 隠しテーマに一致した場合はネットワークを使わずテーブルの物語を返す。
    /// それ以外はプロンプトを組み立てて候補モデルを順に試し、
    /// 成功した出力をStoryに変換して返す。
    pub fn generate(&self, theme: &str) -> Result<Story, Error> {
        if theme.trim().is_empty() {
            return Err(Error::invalid_argument("theme is empty"));
        }
        if let Some(story) = hidden::lookup(theme) {
            return Ok(story);
        }
        let prompt = prompt::render(theme);
        let (_model, raw) = self.orchestrator.run(&prompt)?;
        Ok(extract::extract_story(&raw))
    }
}

/// 失敗を表示用のStoryに変換する。
/// 表示経路（タイプライター）は成功時と共通のままでよい。
pub fn error_story(error: &Error) -> Story {
    let message = match error {
        Error::Exhausted { kind, .. } => kind.user_message().to_string(),
        Error::Config(msg) => msg.clone(),
        other => other.to_string(),
    };
    Story::new(ERROR_TITLE, format!("[SYSTEM ERROR] {}", message))
}
