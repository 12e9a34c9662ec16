//! Prompt template for lyric generation.
//!
//! The three section markers are the contract between the prompt and
//! `parser`: the model is told to emit them, the parser splits on them.
//! Both sides read the same constants.

/// Header of the lyrics section.
pub const LYRICS_MARKER: &str = "**가사:**";

/// Header of the style recommendation section.
pub const STYLE_MARKER: &str = "**추천 스타일:**";

/// Header of the SUNO AI formatted section.
pub const SUNO_MARKER: &str = "**SUNO AI 형식:**";

/// Build the full prompt for a topic.
///
/// The topic is inserted once, on the `주제:` line. No escaping or length
/// check happens here; an overlong topic is the API's to reject.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "\n\
다음 주제나 내용을 바탕으로 한국어 노래 가사를 작성해주세요:\n\
\n\
주제: {topic}\n\
\n\
다음 형식으로 응답해주세요:\n\
\n\
{LYRICS_MARKER}\n\
[여기에 2-3절의 가사를 작성해주세요. 각 절은 4-6줄 정도로 구성하고, 후렴구도 포함해주세요.]\n\
\n\
{STYLE_MARKER}\n\
[이 가사에 어울리는 음악 스타일을 추천해주세요. 예: 팝, 발라드, 락, 재즈, R&B, 힙합 등]\n\
\n\
{SUNO_MARKER}\n\
[가사와 스타일을 SUNO AI에서 사용할 수 있는 형식으로 정리해주세요. 가사는 그대로 유지하고, 스타일 정보를 명확하게 포함해주세요.]\n\
\n\
가사는 감정적이고 리듬감 있게 작성해주시고, 주제와 잘 어울리는 메타포와 이미지를 사용해주세요.\n"
    )
}
