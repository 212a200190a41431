const INVISIBLE: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];
// CR, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR all end a line.
const LINE_BREAKS: [char; 5] = ['\n', '\r', '\u{0085}', '\u{2028}', '\u{2029}'];

/// Strips zero-width characters and BOMs, folds every line-ending variant
/// into `\n`, drops lines that hold only whitespace (NBSP included) and
/// trims the ends.
pub fn normalize_text(text: &str) -> String {
    let visible: String = text.chars().filter(|c| !INVISIBLE.contains(c)).collect();

    visible
        .replace("\r\n", "\n")
        .split(LINE_BREAKS)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_noise() {
        let raw = "\u{FEFF}첫 줄\u{200B}\r\n\r\n \u{00A0}\t\r\n둘째 줄\r셋째 줄\n   \n";
        let clean = normalize_text(raw);
        assert_eq!(clean, "첫 줄\n둘째 줄\n셋째 줄");
        assert!(!clean.contains('\u{200B}'));
        assert!(!clean.contains('\u{FEFF}'));
        assert!(!clean.contains('\r'));
    }

    #[test]
    fn test_unicode_line_breaks() {
        let raw = "하나\u{2028}둘\u{2029}\u{2028}셋\u{0085}넷";
        assert_eq!(normalize_text(raw), "하나\n둘\n셋\n넷");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "  lead\n\n  indented\n\u{00A0}\ntrail  ",
            "\u{200D}\r\n\r\n",
            "",
            "Line1\nLine2",
            "a\u{2028}\u{2028}b\u{0085}",
        ];
        for raw in inputs {
            let once = normalize_text(raw);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_keeps_inner_indentation() {
        assert_eq!(normalize_text("a\n  - b\n"), "a\n  - b");
    }
}
