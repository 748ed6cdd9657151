mod attendance;
mod calendar;
mod dashboard;
mod finance;
mod login;
mod registry;
mod shell;
pub mod theme;

use crate::app::{App, Screen};
use crate::views::{FieldKind, FormState};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();
    match app.screen {
        Screen::Login => login::render(frame, app, &theme),
        Screen::Shell => shell::render(frame, app, &theme),
    }
}

// Helper: shrink rect by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    let x = (area.width - width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}

/// One modal renderer for every editing form.
fn render_form_modal(frame: &mut Frame, form: &FormState, theme: &Theme) {
    let height = form.fields.len() as u16 + 6;
    let area = center_rect(frame.area(), 60, height);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(format!(" {} ", form.title))
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = inner_rect(area, 2);
    let mut constraints: Vec<Constraint> = vec![Constraint::Length(1); form.fields.len()];
    constraints.push(Constraint::Length(1)); // error / status line
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // key hints
    let layout = Layout::default().constraints(constraints).split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "▸ " } else { "  " };
        let value = match &field.kind {
            FieldKind::Text => {
                if focused {
                    format!("{}_", field.value)
                } else {
                    field.value.clone()
                }
            }
            FieldKind::Select(_) => format!("◂ {} ▸", field.value),
        };
        let line = Line::from(vec![
            Span::styled(
                format!("{}{:<18}", marker, field.label),
                if focused { theme.key_hint } else { theme.muted },
            ),
            Span::styled(value, if focused { theme.title } else { theme.normal }),
        ]);
        frame.render_widget(Paragraph::new(line), layout[i]);
    }

    let status_area = layout[form.fields.len()];
    if form.busy {
        frame.render_widget(
            Paragraph::new("Saving...").style(theme.muted),
            status_area,
        );
    } else if let Some(err) = &form.error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(theme.danger),
            status_area,
        );
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Tab ", theme.key_hint),
        Span::styled("Next", theme.muted),
        Span::raw("  "),
        Span::styled(" ◂/▸ ", theme.key_hint),
        Span::styled("Change", theme.muted),
        Span::raw("  "),
        Span::styled(" Enter ", theme.key_hint),
        Span::styled("Save", theme.muted),
        Span::raw("  "),
        Span::styled(" Esc ", theme.key_hint),
        Span::styled("Cancel", theme.muted),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[form.fields.len() + 2]);
}

fn render_confirm_modal(frame: &mut Frame, subject: &str, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 8);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.danger)
        .title(" Confirm Delete ")
        .title_style(theme.danger);
    frame.render_widget(block, area);

    let inner = inner_rect(area, 2);
    let display = if subject.chars().count() > 40 {
        let head: String = subject.chars().take(37).collect();
        format!("{head}...")
    } else {
        subject.to_string()
    };

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(display, theme.title)),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [Y] ", theme.key_hint),
            Span::styled("Yes, delete", theme.danger),
            Span::raw("    "),
            Span::styled(" [N] ", theme.key_hint),
            Span::raw("Cancel"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}
