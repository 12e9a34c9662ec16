//! Display form of a parsed response, and the clipboard text built from it.

use super::parser::ParsedSections;

pub const LYRICS_FALLBACK: &str = "가사를 생성할 수 없습니다.";
pub const STYLE_FALLBACK: &str = "스타일을 추천할 수 없습니다.";
pub const SUNO_FALLBACK: &str = "SUNO 형식을 생성할 수 없습니다.";

/// Which part of the sheet to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CopyTarget {
    /// All three sections with headings.
    All,
    /// Lyrics section only.
    Lyrics,
    /// SUNO AI section only.
    Suno,
}

/// What the user sees: parsed sections with empty ones replaced by a
/// fallback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricSheet {
    pub lyrics: String,
    pub style: String,
    pub suno: String,
}

impl LyricSheet {
    pub fn from_sections(sections: &ParsedSections) -> Self {
        Self {
            lyrics: or_fallback(&sections.lyrics, LYRICS_FALLBACK),
            style: or_fallback(&sections.style, STYLE_FALLBACK),
            suno: or_fallback(&sections.suno_format, SUNO_FALLBACK),
        }
    }

    /// Line count of the longest section.
    pub fn longest_section_lines(&self) -> usize {
        [&self.lyrics, &self.style, &self.suno]
            .iter()
            .map(|text| text.lines().count())
            .max()
            .unwrap_or(0)
    }

    /// Text placed on the clipboard for a copy request.
    pub fn clipboard_text(&self, target: CopyTarget) -> String {
        match target {
            CopyTarget::All => format!(
                "🎵 가사\n{}\n\n🎨 추천 스타일\n{}\n\n🎤 SUNO AI 형식\n{}",
                self.lyrics, self.style, self.suno
            ),
            CopyTarget::Lyrics => self.lyrics.clone(),
            CopyTarget::Suno => self.suno.clone(),
        }
    }
}

impl From<ParsedSections> for LyricSheet {
    fn from(sections: ParsedSections) -> Self {
        Self::from_sections(&sections)
    }
}

fn or_fallback(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(lyrics: &str, style: &str, suno: &str) -> ParsedSections {
        ParsedSections {
            lyrics: lyrics.into(),
            style: style.into(),
            suno_format: suno.into(),
        }
    }

    #[test]
    fn longest_section_counts_lines() {
        let sheet = LyricSheet::from(sections("a\nb\nc", "d", "e\nf"));
        assert_eq!(sheet.longest_section_lines(), 3);
        assert_eq!(LyricSheet::from(ParsedSections::default()).longest_section_lines(), 1);
    }

    #[test]
    fn empty_sections_get_fallbacks() {
        let sheet = LyricSheet::from(ParsedSections::default());
        assert_eq!(sheet.lyrics, LYRICS_FALLBACK);
        assert_eq!(sheet.style, STYLE_FALLBACK);
        assert_eq!(sheet.suno, SUNO_FALLBACK);
    }

    #[test]
    fn present_sections_pass_through() {
        let sheet = LyricSheet::from(sections("L", "", "S"));
        assert_eq!(sheet.lyrics, "L");
        assert_eq!(sheet.style, STYLE_FALLBACK);
        assert_eq!(sheet.suno, "S");
    }

    #[test]
    fn copy_all_has_headings_in_order() {
        let sheet = LyricSheet::from(sections("L", "P", "S"));
        assert_eq!(
            sheet.clipboard_text(CopyTarget::All),
            "🎵 가사\nL\n\n🎨 추천 스타일\nP\n\n🎤 SUNO AI 형식\nS"
        );
    }

    #[test]
    fn copy_all_includes_fallbacks() {
        let sheet = LyricSheet::from(sections("L", "", ""));
        let text = sheet.clipboard_text(CopyTarget::All);
        assert!(text.contains(STYLE_FALLBACK));
        assert!(text.contains(SUNO_FALLBACK));
    }

    #[test]
    fn copy_single_sections() {
        let sheet = LyricSheet::from(sections("L", "P", "S"));
        assert_eq!(sheet.clipboard_text(CopyTarget::Lyrics), "L");
        assert_eq!(sheet.clipboard_text(CopyTarget::Suno), "S");
    }
}
