use super::theme::Theme;
use crate::app::App;
use crate::views::AttendanceMode;
use chrono::Datelike;
use clubdesk_core::month_name;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match app.attendance.mode {
        AttendanceMode::Roster => render_roster(frame, app, theme, area),
        AttendanceMode::Report => render_report(frame, app, theme, area),
    }
}

fn render_roster(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.attendance;

    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // filters
            Constraint::Length(1), // notices
            Constraint::Min(0),    // roster
        ])
        .split(area);

    let date_span = match &view.date_input {
        Some(buffer) => Span::styled(format!("{buffer}_"), theme.title),
        None => Span::styled(view.filter.date.clone(), theme.normal),
    };
    let mut filter_spans = vec![
        Span::styled(" Date ", theme.muted),
        date_span,
        Span::raw("   "),
        Span::styled("Category ", theme.muted),
        Span::styled(format!("◂ {} ▸", view.filter.category.label()), theme.normal),
    ];
    if view.draft.dirty {
        filter_spans.push(Span::raw("   "));
        filter_spans.push(Span::styled("● unsaved changes", theme.warning));
    }
    frame.render_widget(Paragraph::new(Line::from(filter_spans)), layout[0]);

    if view.saving {
        frame.render_widget(
            Paragraph::new(" Saving attendance...").style(theme.muted),
            layout[1],
        );
    } else if view.saved_notice {
        frame.render_widget(
            Paragraph::new(" Attendance saved.").style(theme.success),
            layout[1],
        );
    } else if let Some(error) = &view.error {
        frame.render_widget(
            Paragraph::new(format!(" {error}")).style(theme.danger),
            layout[1],
        );
    }

    let roster = view.roster();
    if view.loading {
        let loading = Paragraph::new("Loading roster...")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(loading, layout[2]);
    } else if roster.is_empty() {
        let empty = Paragraph::new("No players in this category.")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(empty, layout[2]);
    } else {
        let rows: Vec<Row> = roster
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let present = view.draft.is_present(&member.id);
                let style = if i == view.selected {
                    theme.selected
                } else {
                    theme.normal
                };
                let mark = if present {
                    Cell::from("✓ present").style(if i == view.selected {
                        theme.selected
                    } else {
                        theme.success
                    })
                } else {
                    Cell::from("· absent").style(if i == view.selected {
                        theme.selected
                    } else {
                        theme.muted
                    })
                };
                Row::new(vec![Cell::from(member.full_name()).style(style), mark])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(70), Constraint::Percentage(30)])
            .header(Row::new(vec!["PLAYER", "TODAY"]).style(theme.muted));
        frame.render_widget(table, layout[2]);
    }
}

fn render_report(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.attendance;
    let period = format!(
        "{} {} — {}",
        month_name(view.report_month),
        view.report_year,
        view.filter.category.label()
    );

    let layout = Layout::default()
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Monthly summary ", theme.title),
            Span::styled(period, theme.normal),
        ])),
        layout[0],
    );

    let Some(report) = view.report() else {
        let empty = Paragraph::new("No attendance data for this month.")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(empty, layout[1]);
        return;
    };

    let mut header: Vec<Cell> = vec![Cell::from("PLAYER")];
    for date in &report.active_dates {
        header.push(Cell::from(format!("{:02}", date.day())));
    }
    header.push(Cell::from("TOTAL"));
    header.push(Cell::from("%"));

    let date_count = report.active_dates.len();
    let rows: Vec<Row> = report
        .rows
        .iter()
        .map(|row| {
            let mut cells: Vec<Cell> = vec![Cell::from(row.member_name.clone())];
            for present in &row.presences {
                cells.push(if *present {
                    Cell::from("✓").style(theme.success)
                } else {
                    Cell::from("·").style(theme.muted)
                });
            }
            cells.push(Cell::from(format!("{}/{}", row.present_count, date_count)));
            cells.push(Cell::from(format!("{:.0}%", row.percent)));
            Row::new(cells)
        })
        .collect();

    let mut widths: Vec<Constraint> = vec![Constraint::Min(20)];
    widths.extend(std::iter::repeat(Constraint::Length(4)).take(date_count));
    widths.push(Constraint::Length(7));
    widths.push(Constraint::Length(5));

    let table = Table::new(rows, widths).header(Row::new(header).style(theme.muted));
    frame.render_widget(table, layout[1]);
}
