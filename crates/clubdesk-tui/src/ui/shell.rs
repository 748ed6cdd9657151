use super::{attendance, calendar, dashboard, finance, registry, theme::Theme};
use crate::app::App;
use crate::routes::Route;
use crate::views::AttendanceMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(0)])
        .split(frame.area());

    render_sidebar(frame, app, theme, chunks[0]);
    render_main(frame, app, theme, chunks[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" {} ", app.club_name))
        .title_style(theme.title);
    frame.render_widget(block, area);

    let inner = super::inner_rect(area, 1);
    let layout = Layout::default()
        .constraints([
            Constraint::Length(1), // tag
            Constraint::Length(1),
            Constraint::Min(3),    // nav
            Constraint::Length(3), // user box
        ])
        .split(inner);

    let tag = Paragraph::new(" OFFICIAL CLUB ").style(theme.muted);
    frame.render_widget(tag, layout[0]);

    let Some(user) = &app.user else { return };
    let items: Vec<ListItem> = Route::nav_items(user.rol)
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let active = *route == app.route;
            let marker = if active { "▸" } else { " " };
            let style = if active { theme.selected } else { theme.normal };
            ListItem::new(format!(" {} {} {}", marker, i + 1, route.title())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), layout[2]);

    let user_box = Paragraph::new(vec![
        Line::from(Span::styled(user.email.clone(), theme.normal)),
        Line::from(Span::styled(user.rol.title(), theme.muted)),
        Line::from(vec![
            Span::styled(" o ", theme.key_hint),
            Span::styled("Sign out", theme.muted),
        ]),
    ]);
    frame.render_widget(user_box, layout[3]);
}

fn render_main(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let layout = Layout::default()
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // content
            Constraint::Length(1), // key hints
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", app.route.title()), theme.title),
        Span::styled(app.route.path(), theme.muted),
    ]));
    frame.render_widget(header, layout[0]);

    match app.route {
        Route::Dashboard => dashboard::render(frame, app, theme, layout[1]),
        Route::Registry => registry::render(frame, app, theme, layout[1]),
        Route::Attendance => attendance::render(frame, app, theme, layout[1]),
        Route::Finance => finance::render(frame, app, theme, layout[1]),
        Route::Calendar => calendar::render(frame, app, theme, layout[1]),
    }

    let hints = Paragraph::new(hint_line(app, theme)).alignment(Alignment::Center);
    frame.render_widget(hints, layout[2]);
}

fn hint_line(app: &App, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    let mut push = |key: &'static str, label: &'static str| {
        spans.push(Span::styled(format!(" {key} "), theme.key_hint));
        spans.push(Span::styled(label.to_string(), theme.muted));
        spans.push(Span::raw(" "));
    };

    match app.route {
        Route::Dashboard => {}
        Route::Registry => {
            push("↑/↓", "Select");
            push("n", "New");
            push("e", "Edit");
            push("d", "Delete");
            push("/", "Search");
        }
        Route::Attendance => {
            if app.attendance.mode == AttendanceMode::Report {
                push("◂/▸", "Month");
                push("Esc", "Roster");
            } else {
                push("Space", "Toggle");
                push("s", "Save");
                push("d", "Date");
                push("c", "Category");
                push("m", "Monthly report");
            }
        }
        Route::Finance => {
            push("Space", "Toggle paid");
            push("n", "New charge");
            push("/", "Search");
        }
        Route::Calendar => {
            push("n", "New");
            push("e", "Edit");
            push("d", "Delete");
        }
    }
    push("r", "Refresh");
    push("Tab", "Views");
    push("q", "Quit");
    Line::from(spans)
}
