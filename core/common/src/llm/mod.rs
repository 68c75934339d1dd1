//! 生成APIクライアント
//!
//! 外部生成APIを呼ぶための部品を提供します。
//! 呼び出し（invoker / gemini）、候補の順次フォールバック（orchestrator）、
//! 出力テキストのStory化（extract）、ユースケース（generator）。

pub mod candidates;
pub mod extract;
pub mod gemini;
pub mod generator;
pub mod invoker;
pub mod orchestrator;

pub use generator::{error_story, StoryGenerator};
pub use invoker::{DiscoveredModel, GenerationApi, InvokeOutcome};
pub use orchestrator::{FallbackOrchestrator, GenerationAttempt, RetryPolicy};
