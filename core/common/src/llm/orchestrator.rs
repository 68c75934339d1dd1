//! 候補モデルの順次フォールバック
//!
//! 候補を優先順に試し、一時的な失敗には上限つきの再試行、
//! それ以外は次の候補へ進む。静的リストが尽きたら動的な
//! モデル一覧を一度だけ取得して同じ方針で試す。

use crate::domain::ModelName;
use crate::error::{Error, FailureKind};
use crate::llm::candidates;
use crate::llm::invoker::{GenerationApi, InvokeOutcome};
use crate::log::{now_iso8601, Log, LogLevel, LogRecord, NoopLog};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// 再試行ポリシー
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retryable / Transport のとき同じ候補を追加で試す回数
    pub retries_per_candidate: u32,
    /// 再試行前に待つ時間。指数バックオフにはせず、この値が上限
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries_per_candidate: 1,
            backoff: Duration::from_millis(700),
        }
    }
}

/// 1試行の記録。フォールバック判断と診断ログにだけ使い、永続化しない
#[derive(Debug, Clone)]
pub struct GenerationAttempt {
    pub model: ModelName,
    /// HTTPステータス。トランスポート断ではNone
    pub status: Option<u16>,
    pub error: String,
}

impl GenerationAttempt {
    fn kind(&self) -> FailureKind {
        match self.status {
            Some(status) => FailureKind::from_status(status),
            None => FailureKind::Unknown,
        }
    }
}

/// 候補モデルの順次フォールバック
pub struct FallbackOrchestrator<A: GenerationApi> {
    api: A,
    candidates: Vec<ModelName>,
    policy: RetryPolicy,
    logger: Arc<dyn Log>,
}

impl<A: GenerationApi> FallbackOrchestrator<A> {
    /// 新しいオーケストレータを作成
    pub fn new(api: A, candidates: Vec<ModelName>) -> Self {
        Self {
            api,
            candidates,
            policy: RetryPolicy::default(),
            logger: Arc::new(NoopLog),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = logger;
        self
    }

    /// APIを取得（テストでモックの記録を確認するのに使う）
    pub fn api(&self) -> &A {
        &self.api
    }

    /// プロンプトを候補順に投げ、最初に成功した（モデル, 生テキスト）を返す。
    ///
    /// 静的候補がすべて失敗した場合だけ動的一覧を1回取得して再挑戦する。
    /// それでも成功しなければ、最後に記録したエラーの分類を持つ
    /// `Error::Exhausted` を返す。panicや未分類のエラーは漏らさない。
    pub fn run(&self, prompt: &str) -> Result<(ModelName, String), Error> {
        let mut last: Option<GenerationAttempt> = None;

        if let Some(hit) = self.try_candidates(&self.candidates, prompt, &mut last) {
            return Ok(hit);
        }

        // 動的フォールバックは1回だけ。一覧取得自体の失敗は
        // 直前の生成エラーの分類を上書きしない
        match self.api.list_models() {
            Ok(models) => {
                let dynamic = candidates::rank(models);
                self.log(
                    LogLevel::Info,
                    format!("dynamic discovery returned {} models", dynamic.len()),
                    None,
                );
                if let Some(hit) = self.try_candidates(&dynamic, prompt, &mut last) {
                    return Ok(hit);
                }
            }
            Err(e) => {
                self.log(LogLevel::Warn, format!("dynamic discovery failed: {}", e), None);
            }
        }

        let (kind, message) = match last {
            Some(attempt) => (
                attempt.kind(),
                format!("{}: {}", attempt.model, attempt.error),
            ),
            None => (FailureKind::Unknown, "no candidates were available".to_string()),
        };
        Err(Error::exhausted(kind, message))
    }

    /// 候補リストを順に試す。成功すればSome、リストが尽きればNone
    fn try_candidates(
        &self,
        list: &[ModelName],
        prompt: &str,
        last: &mut Option<GenerationAttempt>,
    ) -> Option<(ModelName, String)> {
        for model in list {
            let mut retries_left = self.policy.retries_per_candidate;
            loop {
                match self.api.generate(model, prompt) {
                    InvokeOutcome::Success(raw) => {
                        self.log(
                            LogLevel::Info,
                            "generation succeeded".to_string(),
                            Some(model),
                        );
                        return Some((model.clone(), raw));
                    }
                    InvokeOutcome::Retryable(status) => {
                        self.record(
                            last,
                            GenerationAttempt {
                                model: model.clone(),
                                status: Some(status),
                                error: format!("HTTP {} (overloaded)", status),
                            },
                        );
                        if retries_left == 0 {
                            break;
                        }
                        retries_left -= 1;
                        thread::sleep(self.policy.backoff);
                    }
                    InvokeOutcome::Transport(message) => {
                        self.record(
                            last,
                            GenerationAttempt {
                                model: model.clone(),
                                status: None,
                                error: message,
                            },
                        );
                        if retries_left == 0 {
                            break;
                        }
                        retries_left -= 1;
                        thread::sleep(self.policy.backoff);
                    }
                    InvokeOutcome::NonRetryable(status, body) => {
                        self.record(
                            last,
                            GenerationAttempt {
                                model: model.clone(),
                                status: Some(status),
                                error: format!("HTTP {}: {}", status, body),
                            },
                        );
                        break;
                    }
                }
            }
        }
        None
    }

    fn record(&self, last: &mut Option<GenerationAttempt>, attempt: GenerationAttempt) {
        self.log(
            LogLevel::Debug,
            format!("candidate failed: {}", attempt.error),
            Some(&attempt.model),
        );
        *last = Some(attempt);
    }

    fn log(&self, level: LogLevel, message: String, model: Option<&ModelName>) {
        let fields = model.map(|m| {
            let mut f = BTreeMap::new();
            f.insert("model".to_string(), serde_json::json!(m.as_str()));
            f
        });
        let _ = self.logger.log(&LogRecord {
            ts: now_iso8601(),
            level,
            message,
            fields,
        });
    }
}
