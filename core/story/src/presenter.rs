//! タイプライター表示
//!
//! 表示内容は（全文, 表示済み文字数）の純関数で決め、
//! タイマーは外側のループ1つだけにする。データ取得と演出を結合しない。

use common::domain::Story;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// 全文のうち先頭n文字（char単位）を返す純関数。
/// nが文字数を超えたら全文を返す。
pub fn revealed(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Storyを表示する。no_typeなら一括、それ以外は1文字ずつ。
/// 本文のあとにタイトルを余韻つきで出す。
pub fn present(story: &Story, no_type: bool, speed_ms: u64) {
    if no_type {
        println!("{}", story.body);
    } else {
        let total = story.body.chars().count();
        let mut prev_len = 0;
        for n in 1..=total {
            let prefix = revealed(&story.body, n);
            print!("{}", &prefix[prev_len..]);
            io::stdout().flush().ok();
            prev_len = prefix.len();
            thread::sleep(Duration::from_millis(speed_ms));
        }
        println!();
    }
    println!();
    println!("—— 『{}』", story.title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revealed_ascii() {
        assert_eq!(revealed("hello", 0), "");
        assert_eq!(revealed("hello", 3), "hel");
        assert_eq!(revealed("hello", 5), "hello");
        assert_eq!(revealed("hello", 100), "hello");
    }

    #[test]
    fn test_revealed_multibyte() {
        let text = "夜の街——";
        assert_eq!(revealed(text, 1), "夜");
        assert_eq!(revealed(text, 3), "夜の街");
        assert_eq!(revealed(text, 5), text);
    }

    #[test]
    fn test_revealed_is_monotonic_prefix() {
        let text = "ガラス越しの光";
        let mut prev = "";
        for n in 0..=text.chars().count() {
            let cur = revealed(text, n);
            assert!(cur.starts_with(prev));
            prev = cur;
        }
        assert_eq!(prev, text);
    }

    #[test]
    fn test_revealed_empty_text() {
        assert_eq!(revealed("", 0), "");
        assert_eq!(revealed("", 10), "");
    }
}
