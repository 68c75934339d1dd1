//! モデル呼び出しのOutboundポートと結果分類

use crate::domain::ModelName;
use crate::error::Error;

/// 1回の呼び出し結果の分類
///
/// 呼び出し側（orchestrator）はこの分類だけを見てフォールバックを決める。
/// HTTPの詳細をここで畳み込み、上位へ生のエラーを漏らさない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// HTTP 2xx。中身はまだJSONとして検証していない生テキスト
    Success(String),
    /// HTTP 503など一時的な過負荷。同じ候補をもう一度だけ試してよい
    Retryable(u16),
    /// その他の非2xx。この候補への再試行はせず次の候補へ進む
    NonRetryable(u16, String),
    /// ネットワークレベルの失敗。一度だけ再試行し、だめなら次の候補へ
    Transport(String),
}

/// 発見されたモデル（動的フォールバック用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModel {
    pub name: String,
    /// テキスト生成（generateContent）に対応しているか
    pub supports_generation: bool,
}

/// 生成APIのOutboundポート
///
/// 実装はGeminiApi（実HTTP）のほか、テスト用のモックを各テストが定義する。
pub trait GenerationApi {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// 1候補へ1回だけリクエストを送り、結果を分類して返す。
    /// panicしないこと。失敗はすべてInvokeOutcomeとして返す。
    fn generate(&self, model: &ModelName, prompt: &str) -> InvokeOutcome;

    /// 現在利用可能なモデル一覧を取得する（動的フォールバック用）
    fn list_models(&self) -> Result<Vec<DiscoveredModel>, Error>;
}
