use crate::comment::{COMMENT_LABEL, SOURCE_LABEL, SUMMARY_LABEL};

/// Single user message asking for a one-line comment and a bulleted
/// summary quoted from the post, followed by the post itself.
pub fn build_prompt(content: &str) -> String {
    format!(
        "다음 블로그 글에서 {comment}와 {summary}을 추출해 주세요.\n\
         - 원문의 문장을 바꾸거나 새로 쓰지 말고 그대로 인용하세요.\n\
         - {comment}는 글 전체를 대표하는 문장 하나입니다.\n\
         - {summary}은 핵심 문장을 \"- \"로 시작하는 글머리표로 나열합니다.\n\
         \n\
         아래 형식을 지켜 주세요:\n\
         {comment}: <문장>\n\
         {summary}:\n\
         - <문장>\n\
         - <문장>\n\
         \n\
         {source}:\n\
         {content}",
        comment = COMMENT_LABEL,
        summary = SUMMARY_LABEL,
        source = SOURCE_LABEL,
        content = content,
    )
}
