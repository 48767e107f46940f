//! Example gallery pane rendering

use crate::gallery::ExampleProgram;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the gallery list; `selected` is highlighted
pub fn render_examples_pane(
    frame: &mut Frame,
    area: Rect,
    examples: &[ExampleProgram],
    selected: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Examples ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let items: Vec<ListItem> = examples
        .iter()
        .map(|example| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    example.title,
                    Style::default().fg(DEFAULT_THEME.fg),
                )),
                Line::from(Span::styled(
                    format!("  {}", example.description),
                    Style::default().fg(DEFAULT_THEME.comment),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(DEFAULT_THEME.primary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
