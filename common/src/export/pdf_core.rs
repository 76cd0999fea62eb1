//! PDF export core utilities shared by CLI/WASM.
//!
//! 描画ライブラリに依存しない計算部分（折り返し・画像サイズ・改ページ）。

use crate::layout::{A4_HEIGHT_MM, MARGIN_MM};

/// Helveticaの平均文字幅（em比）
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// 指定幅に収まるおおよその文字数
pub fn max_chars_for(width_mm: f32, font_pt: f32) -> usize {
    let char_mm = crate::layout::pt_to_mm(font_pt * AVG_CHAR_WIDTH_EM);
    ((width_mm / char_mm).floor() as usize).max(1)
}

/// 単語単位で折り返す（長すぎる単語は強制分割）
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// 枠に収まるよう縦横比を保って縮小（拡大はしない）
pub fn fit_into(width_mm: f32, height_mm: f32, box_w_mm: f32, box_h_mm: f32) -> (f32, f32) {
    if width_mm <= 0.0 || height_mm <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (box_w_mm / width_mm).min(box_h_mm / height_mm).min(1.0);
    (width_mm * scale, height_mm * scale)
}

/// 縦方向の配置カーソル（mm、ページ上端からの残り）
#[derive(Debug, Clone)]
pub struct FlowCursor {
    /// 現在のベースラインY（mm、下から）
    y_mm: f32,
    page_count: usize,
}

impl Default for FlowCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowCursor {
    pub fn new() -> Self {
        Self {
            y_mm: Self::top(),
            page_count: 1,
        }
    }

    fn top() -> f32 {
        A4_HEIGHT_MM - MARGIN_MM
    }

    pub fn y_mm(&self) -> f32 {
        self.y_mm
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// 高さを確保する。収まらなければ改ページして true を返す
    pub fn reserve(&mut self, height_mm: f32) -> bool {
        let mut new_page = false;
        if self.y_mm - height_mm < MARGIN_MM && self.y_mm < Self::top() {
            self.break_page();
            new_page = true;
        }
        self.y_mm -= height_mm;
        new_page
    }

    /// 強制改ページ
    pub fn break_page(&mut self) {
        self.y_mm = Self::top();
        self.page_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("N/A", 40), vec!["N/A"]);
    }

    #[test]
    fn test_wrap_on_words() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let lines = wrap_text("first\nsecond", 40);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_fit_into() {
        let (w, h) = fit_into(240.0, 120.0, 120.0, 80.0);
        assert!((w - 120.0).abs() < 0.01);
        assert!((h - 60.0).abs() < 0.01);

        // 小さい画像は拡大しない
        assert_eq!(fit_into(50.0, 40.0, 120.0, 80.0), (50.0, 40.0));
    }

    #[test]
    fn test_flow_cursor_breaks_page() {
        let mut cursor = FlowCursor::new();
        assert!(!cursor.reserve(100.0));
        assert!(!cursor.reserve(100.0));
        assert!(cursor.reserve(100.0));
        assert_eq!(cursor.page_count(), 2);
    }

    #[test]
    fn test_max_chars() {
        assert!(max_chars_for(100.0, 10.0) > 40);
        assert_eq!(max_chars_for(0.0, 10.0), 1);
    }
}
