//! 候補モデルの優先順位
//!
//! 単一モデル固定はクライアント単体では運用に耐えない
//! （モデル単位の容量制限・廃止・地域差がある）ため、
//! 優先順のリストを持ち、枯渇時は動的一覧を並べ替えて使う。

use crate::domain::ModelName;
use crate::llm::invoker::DiscoveredModel;

/// 静的な既定候補（優先順）
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "gemini-2.0-flash-lite",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
];

/// 既定候補リストを返す
pub fn default_candidates() -> Vec<ModelName> {
    DEFAULT_CANDIDATES.iter().map(|s| ModelName::from(*s)).collect()
}

/// スコア: "lite" を含む < "flash" を含む < その他。同点は元の順序を保つ
fn score(name: &str) -> u8 {
    if name.contains("lite") {
        0
    } else if name.contains("flash") {
        1
    } else {
        2
    }
}

/// 動的に取得したモデル一覧を、生成対応のものに絞って並べ替える
pub fn rank(models: Vec<DiscoveredModel>) -> Vec<ModelName> {
    let mut usable: Vec<String> = models
        .into_iter()
        .filter(|m| m.supports_generation)
        .map(|m| m.name)
        .collect();
    // sort_by_keyは安定ソート
    usable.sort_by_key(|name| score(name));
    usable.into_iter().map(ModelName::new).collect()
}
