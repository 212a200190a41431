use regex::Regex;
use std::sync::OnceLock;

pub const COMMENT_LABEL: &str = "한줄 코멘트";
pub const SUMMARY_LABEL: &str = "요약";
pub const SOURCE_LABEL: &str = "원문";
pub const COMMENT_NOT_FOUND: &str = "한줄 코멘트를 찾을 수 없습니다.";

// Label, optional markdown bold, ASCII or full-width colon; the comment
// runs lazily until the next section label or the end of the text.
const COMMENT_PATTERN: &str =
    r"(?s)한줄\s*코멘트\s*\**\s*[:：]\s*\**\s*(.*?)\s*\**\s*(?:(?:요약|원문)\s*\**\s*[:：]|\z)";

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COMMENT_PATTERN).expect("comment pattern is valid"))
}

/// Pulls the one-line comment out of a finished summary. Missing or empty
/// comments yield [`COMMENT_NOT_FOUND`].
pub fn extract_comment(summary: &str) -> String {
    comment_regex()
        .captures(summary)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| COMMENT_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_before_source() {
        assert_eq!(extract_comment("한줄 코멘트: Hello\n원문: ..."), "Hello");
    }

    #[test]
    fn test_comment_before_summary_block() {
        let text = "한줄 코멘트: 금리는 결국 내려갑니다.\n\n요약:\n- 첫째\n- 둘째";
        assert_eq!(extract_comment(text), "금리는 결국 내려갑니다.");
    }

    #[test]
    fn test_markdown_bold_and_fullwidth_colon() {
        let text = "**한줄 코멘트：** 시장은 기다림입니다.\n**요약:**\n- a";
        assert_eq!(extract_comment(text), "시장은 기다림입니다.");
    }

    #[test]
    fn test_comment_runs_to_end() {
        assert_eq!(extract_comment("서론\n한줄 코멘트: 끝까지"), "끝까지");
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(extract_comment("요약:\n- 첫째"), COMMENT_NOT_FOUND);
        assert_eq!(extract_comment(""), COMMENT_NOT_FOUND);
        assert_eq!(extract_comment("한줄 코멘트:\n요약: x"), COMMENT_NOT_FOUND);
    }
}
