mod components;

use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup, Section};
use crate::capture::Classification;
use crate::theme::Theme;
use components::{centered_rect, draw_module_card};

// Load theme colors from system (Omarchy/Hyprland) once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

// Helper functions to get theme colors
fn accent() -> Color {
    theme().accent
}
fn inactive() -> Color {
    theme().inactive
}
fn success() -> Color {
    theme().success
}
fn warning() -> Color {
    theme().warning
}
fn danger() -> Color {
    theme().danger
}
fn text() -> Color {
    theme().text
}
fn text_dim() -> Color {
    theme().text_dim
}
fn bg_selected() -> Color {
    theme().bg_selected
}
fn header() -> Color {
    theme().header
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // The preview panel only takes space while a classification is pending
    let preview_height = if app.pending.is_some() {
        Constraint::Length(11)
    } else {
        Constraint::Length(0)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),  // Info line
            Constraint::Length(2),  // Greeting header
            Constraint::Length(4),  // Capture box
            preview_height,         // Preview panel
            Constraint::Min(7),     // Module grid
            Constraint::Length(3),  // Today's overview
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_greeting(f, app, chunks[1]);
    draw_capture_box(f, app, chunks[2]);
    if let Some(ref pending) = app.pending {
        draw_preview(f, app, pending, chunks[3]);
    }
    draw_module_grid(f, app, chunks[4]);
    draw_overview(f, app, chunks[5]);
    draw_footer(f, app, chunks[6]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > recording indicator > pending summary > ready
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else if app.recording {
        Line::from(vec![
            Span::styled("󰍬 ", Style::default().fg(danger())),
            Span::styled("Recording…", Style::default().fg(danger())),
        ])
    } else if let Some(ref pending) = app.pending {
        Line::from(vec![
            Span::styled(
                format!("{} ", pending.kind.icon()),
                Style::default().fg(theme().kind_color(pending.kind)),
            ),
            Span::styled(
                format!("Pending {}: ", pending.kind.label()),
                Style::default().fg(text_dim()),
            ),
            Span::styled(&pending.title, Style::default().fg(text())),
        ])
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(text_dim())))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_greeting(f: &mut Frame, app: &App, area: Rect) {
    let greeting = match app.config.display_name.as_deref() {
        Some(name) => format!("󰠮 braintwo — what's on your mind, {}?", name),
        None => "󰠮 braintwo — what's on your mind?".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(
            greeting,
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Capture anything; it gets filed as a task, event or note.",
            Style::default().fg(text_dim()),
        )),
    ];

    let banner = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(banner, area);
}

fn draw_capture_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Capture;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Capture ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let cursor = if is_active && !app.recording { "_" } else { "" };
    let input_line = if app.input_buffer.is_empty() && !is_active {
        Line::from(Span::styled(
            "What's on your mind? (text or voice)",
            Style::default().fg(text_dim()),
        ))
    } else {
        Line::from(vec![
            Span::styled(&app.input_buffer, Style::default().fg(text())),
            Span::styled(cursor, Style::default().fg(accent())),
        ])
    };

    let second_line = if app.recording {
        Line::from(Span::styled(
            "󰍬 Listening… speak now (Esc cancels)",
            Style::default().fg(danger()),
        ))
    } else {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(accent())),
            Span::styled(" file it │ ", Style::default().fg(text_dim())),
            Span::styled("Ctrl+R", Style::default().fg(accent())),
            Span::styled(" voice", Style::default().fg(text_dim())),
        ])
    };

    let content = Paragraph::new(vec![input_line, second_line]).block(block);
    f.render_widget(content, area);
}

fn draw_preview(f: &mut Frame, app: &App, pending: &Classification, area: Rect) {
    let is_active = app.section == Section::Preview;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Preview ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let kind_color = theme().kind_color(pending.kind);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} {} ", pending.kind.icon(), pending.kind.label()),
                Style::default().fg(kind_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("│ {:.0}% confidence", pending.confidence * 100.0),
                Style::default().fg(text_dim()),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Original  ", Style::default().fg(header())),
            Span::styled(
                format!("\"{}\"", pending.original_text),
                Style::default().fg(text_dim()).add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Title     ", Style::default().fg(header())),
            Span::styled(
                &pending.title,
                Style::default().fg(text()).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if let Some(ref description) = pending.description {
        lines.push(Line::from(vec![
            Span::styled(" Details   ", Style::default().fg(header())),
            Span::styled(description, Style::default().fg(text_dim())),
        ]));
    }

    let mut badges: Vec<Span> = Vec::new();
    if let Some(priority) = pending.priority {
        badges.push(Span::styled(" Priority  ", Style::default().fg(header())));
        badges.push(Span::styled(
            priority.label(),
            Style::default().fg(theme().priority_color(priority)),
        ));
    }
    if let Some(ref due) = pending.due_date {
        badges.push(Span::styled("  Due ", Style::default().fg(header())));
        badges.push(Span::styled(due, Style::default().fg(text())));
    }
    if !badges.is_empty() {
        lines.push(Line::from(badges));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" y", Style::default().fg(success()).add_modifier(Modifier::BOLD)),
        Span::styled(" accept │ ", Style::default().fg(text_dim())),
        Span::styled("n", Style::default().fg(danger()).add_modifier(Modifier::BOLD)),
        Span::styled(" toss │ ", Style::default().fg(text_dim())),
        Span::styled("e", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(" edit", Style::default().fg(text_dim())),
    ]));

    let content = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(content, area);
}

fn draw_module_grid(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Modules;

    let block = Block::default()
        .title(Span::styled(
            " Quick Access ",
            if is_active {
                Style::default().fg(accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(inactive())
            },
        ))
        .borders(Borders::NONE);
    let inner = area;
    f.render_widget(block, area);

    if app.modules.is_empty() {
        return;
    }

    // Cards side by side; fall back to stacking pairs on narrow terminals
    let card_areas: Vec<Rect> = if inner.width >= 80 {
        let constraints: Vec<Constraint> = app
            .modules
            .iter()
            .map(|_| Constraint::Ratio(1, app.modules.len() as u32))
            .collect();
        Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints(constraints)
            .split(inner)
            .to_vec()
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(inner);
        let mut areas = Vec::new();
        for row in rows.iter() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(*row);
            areas.extend(cols.to_vec());
        }
        areas
    };

    for (i, module) in app.modules.iter().enumerate() {
        if let Some(card_area) = card_areas.get(i) {
            let selected = is_active && i == app.selected_module;
            draw_module_card(f, module, selected, *card_area);
        }
    }
}

fn draw_overview(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            " Today's Overview ",
            Style::default().fg(inactive()),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let stats = &app.stats;
    let line = Line::from(vec![
        Span::styled("󰄴 ", Style::default().fg(accent())),
        Span::styled(
            format!("{} captured", stats.captured),
            Style::default().fg(text()),
        ),
        Span::styled(" │ ", Style::default().fg(text_dim())),
        Span::styled(
            format!("󰄲 {} tasks", stats.accepted_tasks),
            Style::default().fg(accent()),
        ),
        Span::styled(" │ ", Style::default().fg(text_dim())),
        Span::styled(
            format!("󰃭 {} events", stats.accepted_events),
            Style::default().fg(warning()),
        ),
        Span::styled(" │ ", Style::default().fg(text_dim())),
        Span::styled(
            format!("󰎞 {} notes", stats.accepted_notes),
            Style::default().fg(success()),
        ),
    ]);

    let content = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.section {
        Section::Capture => vec![
            ("Enter", "File"),
            ("Ctrl+R", "Voice"),
            ("Tab", "Next"),
            ("F1", "Help"),
            ("Ctrl+C", "Quit"),
        ],
        Section::Preview => vec![
            ("y", "Accept"),
            ("n", "Toss"),
            ("e", "Edit"),
            ("Tab", "Next"),
            ("q", "Quit"),
        ],
        Section::Modules => vec![
            ("←→", "Nav"),
            ("Enter", "Open"),
            ("Tab", "Next"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 40 { 90 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Capture ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Submit the typed text for classification"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+R    ", Style::default().fg(accent())),
            Span::raw("Start/stop a voice capture session"),
        ]),
        Line::from(vec![
            Span::styled("  Esc       ", Style::default().fg(accent())),
            Span::raw("Clear the input (or cancel recording)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Preview ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  y / Enter ", Style::default().fg(accent())),
            Span::raw("Accept the classification"),
        ]),
        Line::from(vec![
            Span::styled("  n / Esc   ", Style::default().fg(accent())),
            Span::raw("Toss it"),
        ]),
        Line::from(vec![
            Span::styled("  e         ", Style::default().fg(accent())),
            Span::raw("Edit the record in $EDITOR (external window)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Modules ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ←/→ h/l   ", Style::default().fg(accent())),
            Span::raw("Select a card"),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Open the module (not wired up yet)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Scripting ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  braintwo --classify \"todo: x\"  ", Style::default().fg(accent())),
            Span::raw("Print the record as JSON"),
        ]),
        Line::from(vec![
            Span::styled("  braintwo --voice               ", Style::default().fg(accent())),
            Span::raw("One voice capture, JSON out"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Config ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![Span::styled(
            "  ~/.config/braintwo/config.toml",
            Style::default().fg(text_dim()),
        )]),
        Line::from(vec![Span::raw(
            "  voice_command = speech-to-text command printing a transcript",
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("F1", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(
                    " 󰋖 braintwo Help ",
                    Style::default().fg(accent()),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}
