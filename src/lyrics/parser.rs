//! Marker-based response parser.
//!
//! Splits one free-text model response into three sections. Each section
//! is an independent search over the same string: find the first
//! occurrence of its marker, then cut at the first terminating marker that
//! follows it (or end of string). Never fails; a missing marker yields an
//! empty field.

use serde::Serialize;

use super::prompt::{LYRICS_MARKER, STYLE_MARKER, SUNO_MARKER};

/// The three sections extracted from a raw response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSections {
    pub lyrics: String,
    pub style: String,
    pub suno_format: String,
}

impl ParsedSections {
    /// True when no marker was found at all.
    pub fn is_empty(&self) -> bool {
        self.lyrics.is_empty() && self.style.is_empty() && self.suno_format.is_empty()
    }
}

/// Parse a raw response into its three sections.
pub fn parse(raw: &str) -> ParsedSections {
    ParsedSections {
        lyrics: section(raw, LYRICS_MARKER, &[STYLE_MARKER, SUNO_MARKER]),
        style: section(raw, STYLE_MARKER, &[SUNO_MARKER]),
        suno_format: section(raw, SUNO_MARKER, &[]),
    }
}

/// Trimmed text after the first `marker`, up to the nearest of `until`
/// that follows it. Empty if `marker` is absent.
fn section(raw: &str, marker: &str, until: &[&str]) -> String {
    let Some(pos) = raw.find(marker) else {
        return String::new();
    };
    let body = &raw[pos + marker.len()..];
    let end = until
        .iter()
        .filter_map(|m| body.find(m))
        .min()
        .unwrap_or(body.len());
    body[..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "**가사:**A\n**추천 스타일:**B\n**SUNO AI 형식:**C";

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), ParsedSections::default());
        assert!(parse("").is_empty());
    }

    #[test]
    fn all_three_sections() {
        let parsed = parse(FULL);
        assert_eq!(parsed.lyrics, "A");
        assert_eq!(parsed.style, "B");
        assert_eq!(parsed.suno_format, "C");
    }

    #[test]
    fn no_markers_all_empty() {
        let parsed = parse("그냥 가사만 있고 형식은 없는 응답입니다.");
        assert!(parsed.is_empty());
    }

    #[test]
    fn reparsing_a_field_yields_nothing() {
        let raw = "intro\n**가사:**\n첫 줄\n둘째 줄\n\n**추천 스타일:**\n발라드\n\n**SUNO AI 형식:**\n[Verse]\n첫 줄";
        let parsed = parse(raw);
        for field in [&parsed.lyrics, &parsed.style, &parsed.suno_format] {
            assert!(!field.is_empty());
            assert!(parse(field).is_empty());
        }
    }

    #[test]
    fn lyrics_marker_missing() {
        let parsed = parse("서론\n**추천 스타일:** 재즈 \n**SUNO AI 형식:** [Jazz] 가사");
        assert_eq!(parsed.lyrics, "");
        assert_eq!(parsed.style, "재즈");
        assert_eq!(parsed.suno_format, "[Jazz] 가사");
    }

    #[test]
    fn style_marker_missing_lyrics_stops_at_suno() {
        let parsed = parse("**가사:**라라라\n**SUNO AI 형식:**[Pop] 라라라");
        assert_eq!(parsed.lyrics, "라라라");
        assert_eq!(parsed.style, "");
        assert_eq!(parsed.suno_format, "[Pop] 라라라");
    }

    #[test]
    fn only_lyrics_runs_to_end() {
        let parsed = parse("**가사:**\n  끝까지 가사  \n");
        assert_eq!(parsed.lyrics, "끝까지 가사");
        assert_eq!(parsed.style, "");
        assert_eq!(parsed.suno_format, "");
    }

    #[test]
    fn extra_blank_lines_do_not_change_content() {
        let spaced = "\n\n**가사:**\n\n\nA\n\n\n**추천 스타일:**\n\n  B\n\n\n**SUNO AI 형식:**\n\n\tC\n\n";
        assert_eq!(parse(spaced), parse(FULL));
    }

    #[test]
    fn multiline_sections_keep_inner_newlines() {
        let parsed = parse("**가사:**\n[Verse 1]\n하나\n\n[Chorus]\n둘\n**추천 스타일:**팝");
        assert_eq!(parsed.lyrics, "[Verse 1]\n하나\n\n[Chorus]\n둘");
    }

    #[test]
    fn markers_are_case_sensitive() {
        let parsed = parse("**suno ai 형식:**소문자");
        assert_eq!(parsed.suno_format, "");
    }

    #[test]
    fn duplicate_markers_use_first_occurrence() {
        let parsed = parse("**가사:**첫째\n**추천 스타일:**팝\n**가사:**둘째");
        assert_eq!(parsed.lyrics, "첫째");
        // style runs to the end: only the suno marker terminates it
        assert_eq!(parsed.style, "팝\n**가사:**둘째");
    }

    #[test]
    fn out_of_order_markers_are_forward_only() {
        // suno before style: style has no terminator after it
        let parsed = parse("**SUNO AI 형식:**S\n**추천 스타일:**T");
        assert_eq!(parsed.style, "T");
        assert_eq!(parsed.suno_format, "S\n**추천 스타일:**T");
        assert_eq!(parsed.lyrics, "");
    }

    #[test]
    fn serializes_with_camel_case_suno_field() {
        let json = serde_json::to_value(parse(FULL)).unwrap();
        assert_eq!(json["sunoFormat"], "C");
        assert_eq!(json["lyrics"], "A");
    }
}
