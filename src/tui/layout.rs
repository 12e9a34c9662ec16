//! Screen layout.
//!
//! ```text
//! ┌─ API Key ───────────────────────────────────────┐
//! │ AIza************1234                            │
//! ├─ Topic ─────────────────────────────────────────┤
//! │ > 비 오는 날의 카페                              │
//! ├─ 🎵 가사 ──────────────┬─ 🎨 추천 스타일 ───────┤
//! │                        │                        │
//! │                        ├─ 🎤 SUNO AI 형식 ──────┤
//! │                        │                        │
//! ├─────────────────────────────────────────────────┤
//! │ [idle] Enter:Generate  F2/F3/F4:Copy  Esc:Quit  │
//! └─────────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::app::{Focus, TuiApp};
use crate::credentials::mask;
use crate::notify::Level;

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // api key
            Constraint::Length(3), // topic
            Constraint::Min(6),    // results
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_key_input(f, app, outer[0]);
    draw_topic_input(f, app, outer[1]);
    draw_results(f, app, outer[2]);
    draw_status(f, app, outer[3]);

    if let Some(ref n) = app.notification {
        draw_toast(f, n.level, &n.message, outer[2]);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_key_input(f: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::ApiKey;
    let block = Block::default()
        .title(" API Key ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Show the key in full only while it is being edited.
    let content = app.key_input.content();
    if focused {
        draw_editable(f, content, app.key_input.cursor(), inner);
    } else {
        f.render_widget(Paragraph::new(mask(content)), inner);
    }
}

fn draw_topic_input(f: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::Topic;
    let block = Block::default()
        .title(" Topic ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let content = app.topic_input.content();
    if focused {
        draw_editable(f, content, app.topic_input.cursor(), inner);
    } else if content.is_empty() {
        let hint = Span::styled("가사 주제를 입력하세요", Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(Line::from(hint)), inner);
    } else {
        f.render_widget(Paragraph::new(content.to_string()), inner);
    }
}

/// Render a focused single-line field, scrolled so the cursor stays inside.
fn draw_editable(f: &mut Frame, content: &str, cursor: usize, area: Rect) {
    let (shown, column) = visible_window(content, cursor, area.width);
    f.render_widget(Paragraph::new(shown), area);
    if area.width > 0 {
        f.set_cursor_position(Position::new(area.x.saturating_add(column), area.y));
    }
}

/// The slice of `text` that fits in `width` cells with the cursor visible,
/// and the cursor's column within it. Scrolls right only as far as needed.
fn visible_window(text: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = usize::from(width);
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let cells = |c: &char| c.width().unwrap_or(0);

    // the cursor cell itself must fit, hence `width - 1`
    let mut start = 0;
    let mut before: usize = chars[..cursor].iter().map(cells).sum();
    while before > width - 1 && start < cursor {
        before -= cells(&chars[start]);
        start += 1;
    }

    let mut used = 0;
    let shown = chars[start..]
        .iter()
        .take_while(|c| {
            used += cells(*c);
            used <= width
        })
        .collect();
    (shown, u16::try_from(before).unwrap_or(u16::MAX))
}

fn draw_results(f: &mut Frame, app: &TuiApp, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(columns[1]);

    let Some(ref sheet) = app.sheet else {
        let hint = if app.is_loading() {
            "가사를 생성하는 중입니다..."
        } else {
            "주제를 입력하고 Enter를 누르면 가사가 생성됩니다."
        };
        let para = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .block(Block::default().borders(Borders::ALL).title(" Result "));
        f.render_widget(para, area);
        return;
    };

    section(f, " 🎵 가사 [F3] ", &sheet.lyrics, app.result_scroll, columns[0]);
    section(f, " 🎨 추천 스타일 ", &sheet.style, app.result_scroll, right[0]);
    section(f, " 🎤 SUNO AI 형식 [F4] ", &sheet.suno, app.result_scroll, right[1]);
}

/// One result pane. Panes share a scroll offset; a shorter pane stops at
/// its own last line.
fn section(f: &mut Frame, title: &str, text: &str, scroll: u16, area: Rect) {
    let last_line = u16::try_from(text.lines().count().saturating_sub(1)).unwrap_or(u16::MAX);
    let scroll = scroll.min(last_line);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let para = Paragraph::new(text.to_string())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, app: &TuiApp, area: Rect) {
    let (label, color) = if app.is_loading() {
        ("[generating]", Color::Yellow)
    } else {
        ("[idle]", Color::Green)
    };
    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            "  Tab:Focus  Enter:Save key/Generate  ^G:Generate  F2:Copy all  F3:Lyrics  F4:SUNO  Esc:Quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Notification box pinned to the top-right of `area`.
fn draw_toast(f: &mut Frame, level: Level, message: &str, area: Rect) {
    let bg = match level {
        Level::Success => Color::Green,
        Level::Error => Color::Red,
        Level::Info => Color::Blue,
    };
    let width = u16::try_from(message.width())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width);
    let height = 3u16.min(area.height);
    let toast = Rect::new(area.x + area.width - width, area.y, width, height);

    f.render_widget(Clear, toast);
    let para = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(bg)),
    );
    f.render_widget(para, toast);
}
