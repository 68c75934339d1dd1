//! エラーハンドリング
//!
//! プロバイダ/ネットワーク起因の失敗はすべてこのモジュールの型に畳み込む。
//! 未分類の panic や unwrap を上位レイヤーへ漏らさないこと。

use thiserror::Error as ThisError;

/// 全候補が失敗したときの分類
///
/// フォールバックで最後に記録されたエラーから決まり、
/// ユーザー向けメッセージの出し分けに使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 429（レート制限）
    RateLimited,
    /// HTTP 404（モデルが存在しない・未対応）
    NotFound,
    /// HTTP 503（過負荷）
    Overloaded,
    /// その他（ネットワーク断など）
    Unknown,
}

impl FailureKind {
    /// HTTPステータスコードから分類を決める
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            404 => Self::NotFound,
            503 => Self::Overloaded,
            _ => Self::Unknown,
        }
    }

    /// ユーザー向けメッセージ（表示経路にそのまま流せる文面）
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited => {
                "アクセスが集中しています。しばらくしてからもう一度お試しください。"
            }
            Self::NotFound => "利用できるモデルが見つかりませんでした。",
            Self::Overloaded => "サーバーが混み合っています。少し時間をおいてお試しください。",
            Self::Unknown => "不明なエラーが発生しました。",
        }
    }
}

/// エラー型
#[derive(Debug, ThisError)]
pub enum Error {
    /// 設定エラー（APIキー未設定・プレースホルダのまま等）。リトライしない
    #[error("configuration error: {0}")]
    Config(String),
    /// 引数不正（usage表示の対象）
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("HTTP error: {0}")]
    Http(String),
    /// 静的候補も動的候補もすべて失敗した
    #[error("all candidates failed: {message}")]
    Exhausted { kind: FailureKind, message: String },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn exhausted(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Exhausted {
            kind,
            message: message.into(),
        }
    }

    /// usage表示が必要なエラーかどうか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Exhausted { .. } => 69,
            Self::Io(_) | Self::Json(_) | Self::Http(_) => 74,
            Self::Config(_) => 78,
        }
    }
}
