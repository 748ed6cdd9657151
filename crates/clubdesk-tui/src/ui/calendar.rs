use super::{render_confirm_modal, render_form_modal, theme::Theme};
use crate::app::App;
use crate::views::CalendarMode;
use clubdesk_core::EventKind;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.calendar;

    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // error
            Constraint::Min(0),    // table
        ])
        .split(area);

    if let Some(error) = &view.error {
        frame.render_widget(
            Paragraph::new(format!(" {error}")).style(theme.danger),
            layout[0],
        );
    }

    if view.loading {
        let loading = Paragraph::new("Loading schedule...")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(loading, layout[1]);
    } else if view.events.is_empty() {
        let empty = Paragraph::new("Nothing scheduled yet")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(empty, layout[1]);
    } else {
        let rows: Vec<Row> = view
            .events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let selected = i == view.selected;
                let base = if selected { theme.selected } else { theme.normal };
                let kind_style = if selected {
                    theme.selected
                } else {
                    match event.kind {
                        EventKind::Match => theme.warning,
                        EventKind::Training => theme.title,
                        EventKind::SpecialEvent => theme.success,
                    }
                };
                let instructor = if event.instructor.is_empty() {
                    "Unassigned".to_string()
                } else {
                    event.instructor.clone()
                };
                Row::new(vec![
                    Cell::from(event.kind.as_str()).style(kind_style),
                    Cell::from(event.day.clone()).style(base),
                    Cell::from(event.category.label()).style(base),
                    Cell::from(event.time.clone()).style(base),
                    Cell::from(event.location.clone()).style(base),
                    Cell::from(instructor).style(base),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Percentage(20),
                Constraint::Percentage(22),
                Constraint::Length(8),
                Constraint::Percentage(22),
                Constraint::Percentage(18),
            ],
        )
        .header(
            Row::new(vec!["KIND", "DAY", "CATEGORY", "TIME", "LOCATION", "INSTRUCTOR"])
                .style(theme.muted),
        );
        frame.render_widget(table, layout[1]);
    }

    match &view.mode {
        CalendarMode::Form { form, .. } => render_form_modal(frame, form, theme),
        CalendarMode::ConfirmDelete(id) => {
            let label = view
                .events
                .iter()
                .find(|e| e.id == *id)
                .map(|e| format!("{} — {}", e.day, e.category.label()))
                .unwrap_or_else(|| id.clone());
            render_confirm_modal(frame, &label, theme);
        }
        CalendarMode::List => {}
    }
}
