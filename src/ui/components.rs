//! Shared drawing helpers: popup placement and the module cards.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::modules::Module;

use super::{bg_selected, text, text_dim, theme};

/// Center a percent-sized rect inside `r` (used for popups)
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw one module card: icon and count up top, title, description, and a
/// "not wired up" hint at the bottom.
pub fn draw_module_card(f: &mut Frame, module: &Module, selected: bool, area: Rect) {
    let accent = theme().accent_color(module.accent);
    let border_color = if selected { accent } else { theme().inactive };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let row_style = if selected {
        Style::default().bg(bg_selected())
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", module.icon), Style::default().fg(accent)),
            Span::styled(
                format!("{}", module.count),
                Style::default()
                    .fg(theme().accent_bright)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", module.title),
            Style::default().fg(text()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", module.description),
            Style::default().fg(text_dim()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            if selected { " Enter to open →" } else { "" },
            Style::default().fg(text_dim()),
        ))
        .alignment(Alignment::Left),
    ];

    let card = Paragraph::new(lines).style(row_style).block(block);
    f.render_widget(card, area);
}
