use super::{center_rect, inner_rect, theme::Theme};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 12);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" {} ", app.club_name))
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = inner_rect(area, 2);
    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // tagline
            Constraint::Length(1),
            Constraint::Length(1), // label
            Constraint::Length(1), // input
            Constraint::Length(1),
            Constraint::Length(1), // error / busy
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let tagline = Paragraph::new("MANAGER CONSOLE")
        .style(theme.muted)
        .alignment(Alignment::Center);
    frame.render_widget(tagline, layout[0]);

    let label = Paragraph::new("Staff access — email")
        .style(theme.muted)
        .alignment(Alignment::Center);
    frame.render_widget(label, layout[2]);

    let input = Paragraph::new(format!("{}_", app.login.email))
        .style(theme.title)
        .alignment(Alignment::Center);
    frame.render_widget(input, layout[3]);

    if app.login.busy {
        let busy = Paragraph::new("Checking access...")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(busy, layout[5]);
    } else if let Some(error) = &app.login.error {
        let error = Paragraph::new(error.as_str())
            .style(theme.danger)
            .alignment(Alignment::Center);
        frame.render_widget(error, layout[5]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled(" Enter ", theme.key_hint),
        Span::styled("Sign in", theme.muted),
        Span::raw("  "),
        Span::styled(" Esc ", theme.key_hint),
        Span::styled("Quit", theme.muted),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hints, layout[7]);
}
