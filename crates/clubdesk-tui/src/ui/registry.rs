use super::{render_confirm_modal, render_form_modal, theme::Theme};
use crate::app::App;
use crate::views::RegistryMode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.registry;

    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // search
            Constraint::Length(1), // banner
            Constraint::Min(0),    // table
        ])
        .split(area);

    let search = if view.searching {
        Line::from(vec![
            Span::styled(" Search: ", theme.key_hint),
            Span::styled(format!("{}_", view.search), theme.title),
        ])
    } else if view.search.is_empty() {
        Line::from(Span::styled(" Press / to search", theme.muted))
    } else {
        Line::from(vec![
            Span::styled(" Filter: ", theme.muted),
            Span::styled(view.search.clone(), theme.normal),
        ])
    };
    frame.render_widget(Paragraph::new(search), layout[0]);

    if let Some(banner) = &view.banner {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {banner} "), theme.warning),
            Span::styled("(Esc to dismiss)", theme.muted),
        ]));
        frame.render_widget(banner, layout[1]);
    }

    let filtered = view.filtered();
    if view.loading {
        let loading = Paragraph::new("Loading players...")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(loading, layout[2]);
    } else if filtered.is_empty() {
        let empty = Paragraph::new("No players registered")
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(empty, layout[2]);
    } else {
        let rows: Vec<Row> = filtered
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let style = if i == view.selected {
                    theme.selected
                } else if member.active {
                    theme.normal
                } else {
                    theme.muted
                };
                Row::new(vec![
                    Cell::from(member.full_name()),
                    Cell::from(member.category.label()),
                    Cell::from(format!(
                        "{} · {}",
                        member.guardian_name, member.guardian_phone
                    )),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Percentage(40),
            ],
        )
        .header(
            Row::new(vec!["PLAYER", "CATEGORY", "GUARDIAN"]).style(theme.muted),
        );
        frame.render_widget(table, layout[2]);
    }

    match &view.mode {
        RegistryMode::Form { form, .. } => render_form_modal(frame, form, theme),
        RegistryMode::ConfirmDelete(id) => {
            let name = view
                .members
                .iter()
                .find(|m| m.id == *id)
                .map(|m| m.full_name())
                .unwrap_or_else(|| id.clone());
            render_confirm_modal(frame, &name, theme);
        }
        RegistryMode::List => {}
    }
}
