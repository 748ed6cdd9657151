use super::{render_form_modal, theme::Theme};
use crate::app::App;
use crate::views::FinanceMode;
use clubdesk_core::PaymentStatus;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.finance;

    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // search
            Constraint::Length(1), // error
            Constraint::Min(0),    // table
        ])
        .split(area);

    let search = if view.searching {
        Line::from(vec![
            Span::styled(" Search: ", theme.key_hint),
            Span::styled(format!("{}_", view.search), theme.title),
        ])
    } else if view.search.is_empty() {
        Line::from(Span::styled(" Press / to search by player", theme.muted))
    } else {
        Line::from(vec![
            Span::styled(" Filter: ", theme.muted),
            Span::styled(view.search.clone(), theme.normal),
        ])
    };
    frame.render_widget(Paragraph::new(search), layout[0]);

    if let Some(error) = &view.error {
        frame.render_widget(
            Paragraph::new(format!(" {error}")).style(theme.danger),
            layout[1],
        );
    }

    let rows_data = view.rows();
    if view.loading {
        let loading = Paragraph::new("Loading charges...")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(loading, layout[2]);
    } else if rows_data.is_empty() {
        let empty = Paragraph::new("No charges recorded")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(empty, layout[2]);
    } else {
        let rows: Vec<Row> = rows_data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = i == view.selected;
                let base = if selected { theme.selected } else { theme.normal };
                let name = match &row.member_name {
                    Some(name) => Cell::from(name.clone()).style(base),
                    None => Cell::from(format!("ID: {}", row.payment.member_id)).style(
                        if selected { theme.selected } else { theme.muted },
                    ),
                };
                let status_style = if selected {
                    theme.selected
                } else if row.payment.status == PaymentStatus::Paid {
                    theme.success
                } else {
                    theme.warning
                };
                Row::new(vec![
                    name,
                    Cell::from(format!("{} {}", row.payment.month, row.payment.year)).style(base),
                    Cell::from(format!("${}", row.payment.amount)).style(base),
                    Cell::from(row.payment.status.as_str()).style(status_style),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
                Constraint::Percentage(20),
            ],
        )
        .header(Row::new(vec!["PLAYER", "PERIOD", "AMOUNT", "STATUS"]).style(theme.muted));
        frame.render_widget(table, layout[2]);
    }

    if let FinanceMode::Form { form, .. } = &view.mode {
        render_form_modal(frame, form, theme);
    }
}
