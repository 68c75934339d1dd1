//! 物語ジェネレータ共通ライブラリ
//!
//! `story`コマンドから使われる生成クライアントとドメイン型を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型
pub mod domain;

/// 環境変数からの設定読み込み
pub mod config;

/// 隠し物語テーブル
pub mod hidden;

/// ペルソナプロンプトの組み立て
pub mod prompt;

/// 生成APIクライアント（呼び出し・フォールバック・抽出）
pub mod llm;

/// 構造化ログ（JSONL）
pub mod log;
