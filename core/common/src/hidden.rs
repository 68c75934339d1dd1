//! 隠し物語テーブル（HiddenEntryMatcher）
//!
//! 特定のテーマ文字列には生成APIを使わず、あらかじめ用意した物語を返す。
//! この照合はネットワークアクセスより必ず先に行うこと。
//! コストゼロ・決定的に発見できることが隠し要素の前提になっている。

use crate::domain::Story;

/// トリガー（小文字）→ 物語のテーブル。プロセス起動時から不変。
/// 複数のトリガーが同じ内容を指してもよい（別名）。
const HIDDEN_ENTRIES: &[(&str, &str, &str)] = &[
    (
        "nagi",
        "凪",
        "風の止んだ街で、わたしはファインダー越しに息をひそめている。ガラスの向こうの光は、まだ誰のものでもない。——",
    ),
    (
        "error",
        "エラー",
        "物語は見つからなかった。それでも夜は、静かに更けていく。——",
    ),
    // "error" の別名。内容は同一
    (
        "エラー",
        "エラー",
        "物語は見つからなかった。それでも夜は、静かに更けていく。——",
    ),
    (
        "深夜",
        "午前三時",
        "信号はずっと点滅のまま。誰も渡らない横断歩道を、街灯だけが照らしていた。——",
    ),
];

/// テーマを正規化（trim + 小文字化）して完全一致で引く。
/// 一致すればテーブルの Story を、なければ None を返す。副作用なし。
pub fn lookup(theme: &str) -> Option<Story> {
    let key = theme.trim().to_lowercase();
    HIDDEN_ENTRIES
        .iter()
        .find(|(trigger, _, _)| *trigger == key)
        .map(|(_, title, body)| Story::new(*title, *body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_match() {
        let story = lookup("nagi").unwrap();
        assert_eq!(story.title, "凪");
        assert!(story.body.ends_with("——"));
    }

    #[test]
    fn test_lookup_case_insensitive() {
        // 格納キーは "error"。大文字でも一致する
        let lower = lookup("error").unwrap();
        let upper = lookup("ERROR").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_lookup_trims_whitespace() {
        assert_eq!(lookup("  nagi  "), lookup("nagi"));
    }

    #[test]
    fn test_lookup_alias_shares_content() {
        // "エラー" は "error" の別名
        assert_eq!(lookup("エラー"), lookup("error"));
    }

    #[test]
    fn test_lookup_no_match() {
        assert!(lookup("雨").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_lookup_is_exact_not_substring() {
        assert!(lookup("nagi portfolio").is_none());
    }
}
