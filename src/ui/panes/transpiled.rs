//! Generated JavaScript pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the JavaScript export of the current source.
///
/// `generated` holds the export, or the compile error message when the
/// source does not parse.
pub fn render_transpiled_pane(
    frame: &mut Frame,
    area: Rect,
    generated: &Result<String, String>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" JavaScript ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let (text, style) = match generated {
        Ok(code) if code.is_empty() => ("(empty program)", Style::default().fg(DEFAULT_THEME.comment)),
        Ok(code) => (code.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
        Err(message) => (message.as_str(), Style::default().fg(DEFAULT_THEME.error)),
    };

    let total_lines = text.lines().count();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(*scroll_offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
