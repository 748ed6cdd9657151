use super::{inner_rect, theme::Theme};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.dashboard;

    if view.loading {
        let loading = Paragraph::new(format!("Syncing with {} records...", app.club_name))
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // period line
            Constraint::Length(4), // stat tiles
            Constraint::Min(0),    // overdue + advisor
        ])
        .split(area);

    let (month, year) = view.period;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Club overview — ", theme.muted),
            Span::styled(format!("{month} {year}"), theme.normal),
        ])),
        layout[0],
    );

    render_tiles(frame, app, theme, layout[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[2]);
    render_overdue(frame, app, theme, columns[0]);
    render_advisor(frame, app, theme, columns[1]);
}

fn render_tiles(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.dashboard;
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let values = [
        ("Players", view.stats.total_members.to_string(), theme.title),
        (
            "Active squad",
            view.stats.active_members.to_string(),
            theme.success,
        ),
        (
            "Overdue this month",
            view.stats.overdue_count.to_string(),
            theme.danger,
        ),
        (
            "Collected",
            format!("${}", view.stats.total_collected),
            theme.success,
        ),
    ];

    for (i, (title, value, style)) in values.iter().enumerate() {
        render_tile(frame, tiles[i], title, value, *style, theme);
    }
}

fn render_tile(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    value_style: Style,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border);
    frame.render_widget(block, area);
    let inner = inner_rect(area, 1);
    let text = Paragraph::new(vec![
        Line::from(Span::styled(title.to_string(), theme.muted)),
        Line::from(Span::styled(value.to_string(), value_style)),
    ]);
    frame.render_widget(text, inner);
}

fn render_overdue(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.dashboard;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" Payment Alerts ")
        .title_style(theme.normal);
    frame.render_widget(block, area);
    let inner = inner_rect(area, 1);

    if view.overdue_preview.is_empty() {
        let all_clear = Paragraph::new("All dues are in. Nothing pending this month.")
            .style(theme.muted)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(all_clear, inner);
        return;
    }

    let items: Vec<ListItem> = view
        .overdue_preview
        .iter()
        .map(|member| {
            ListItem::new(Line::from(vec![
                Span::styled(member.full_name(), theme.normal),
                Span::raw("  "),
                Span::styled(member.category.label(), theme.muted),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn render_advisor(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.dashboard;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" AI Advisor ")
        .title_style(theme.title);
    frame.render_widget(block, area);
    let inner = inner_rect(area, 1);

    let text = if view.insights_loading {
        Paragraph::new("Analyzing finances...").style(theme.muted)
    } else {
        match &view.insights {
            Some(insights) => Paragraph::new(format!("\u{201c}{insights}\u{201d}"))
                .style(theme.normal)
                .wrap(Wrap { trim: true }),
            None => Paragraph::new("Add club data so the advisor has something to analyze.")
                .style(theme.muted)
                .wrap(Wrap { trim: true }),
        }
    };
    frame.render_widget(text, inner);
}
