//! ドメイン型（Newtype）
//!
//! String を直接運ばず、意味のある型に包んで境界を明確にする。

use serde::{Deserialize, Serialize};

/// タイトルが取れなかったときの既定タイトル
pub const UNTITLED: &str = "無題";

/// 本文をプレーンテキストとして救済したときのタイトル
pub const FRAGMENT_TITLE: &str = "断片";

/// どうしても本文が得られないときの余韻
pub const EMPTY_BODY: &str = "——";

/// 生成失敗を表示するときのタイトル
pub const ERROR_TITLE: &str = "エラー発生";

/// 生成された物語（タイトル + 本文）
///
/// 一度作ったら変更しない。表示レイヤーへ渡る時点で
/// title / body は必ず空でない文字列になっている。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub body: String,
}

impl Story {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// モデル識別子（候補リストの1要素）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_new() {
        let story = Story::new("凪", "風が止んだ。——");
        assert_eq!(story.title, "凪");
        assert_eq!(story.body, "風が止んだ。——");
    }

    #[test]
    fn test_story_serialize_roundtrip() {
        let story = Story::new("A", "B");
        let json = serde_json::to_string(&story).unwrap();
        let back: Story = serde_json::from_str(&json).unwrap();
        assert_eq!(story, back);
    }

    #[test]
    fn test_model_name() {
        let m = ModelName::new("gemini-2.0-flash");
        assert_eq!(m.as_str(), "gemini-2.0-flash");
        assert_eq!(m.to_string(), "gemini-2.0-flash");
        assert_eq!(ModelName::from("x"), ModelName::new("x"));
    }
}
