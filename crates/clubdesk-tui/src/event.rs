use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::{App, Screen};
use crate::routes::Route;
use crate::views::{
    form_to_event, form_to_member, form_to_payment, AttendanceMode, CalendarMode, FinanceMode,
    RegistryMode,
};
use clubdesk_core::{Member, Payment, TrainingEvent};

/// Poll for keyboard events with timeout, so the loop keeps draining
/// fetch results while idle.
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(app: &mut App, event: Event) {
    let Event::Key(key) = event else { return };
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Login => handle_login(app, key.code),
        Screen::Shell => handle_shell(app, key.code),
    }
}

fn handle_login(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => {
            app.login.email.push(c);
            app.login.error = None;
        }
        KeyCode::Backspace => {
            app.login.email.pop();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_shell(app: &mut App, code: KeyCode) {
    let consumed = match app.route {
        Route::Registry => handle_registry(app, code),
        Route::Attendance => handle_attendance(app, code),
        Route::Finance => handle_finance(app, code),
        Route::Calendar => handle_calendar(app, code),
        Route::Dashboard => false,
    };
    if !consumed {
        handle_global(app, code);
    }
}

fn handle_global(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('o') => app.logout(),
        KeyCode::Char('r') => app.refresh_current(),
        KeyCode::Tab => app.nav_step(1),
        KeyCode::BackTab => app.nav_step(-1),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(user) = &app.user {
                let items = Route::nav_items(user.rol);
                let index = (c as usize) - ('1' as usize);
                if let Some(route) = items.get(index) {
                    app.navigate(*route);
                }
            }
        }
        _ => {}
    }
}

// --- Registry ---

fn handle_registry(app: &mut App, code: KeyCode) -> bool {
    match &app.registry.mode {
        RegistryMode::Form { .. } => {
            handle_registry_form(app, code);
            return true;
        }
        RegistryMode::ConfirmDelete(id) => {
            let id = id.clone();
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.registry.mode = RegistryMode::List;
                    app.delete_member(id);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.registry.mode = RegistryMode::List;
                }
                _ => {}
            }
            return true;
        }
        RegistryMode::List => {}
    }

    if app.registry.searching {
        match code {
            KeyCode::Esc => {
                app.registry.searching = false;
                app.registry.search.clear();
                app.registry.clamp_selection();
            }
            KeyCode::Enter => app.registry.searching = false,
            KeyCode::Backspace => {
                app.registry.search.pop();
                app.registry.clamp_selection();
            }
            KeyCode::Char(c) => {
                app.registry.search.push(c);
                app.registry.clamp_selection();
            }
            _ => {}
        }
        return true;
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.registry.move_up();
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.registry.move_down();
            true
        }
        KeyCode::Char('/') => {
            app.registry.searching = true;
            true
        }
        KeyCode::Char('n') => {
            app.registry.open_form(None);
            true
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(member) = app.registry.selected_member().cloned() {
                app.registry.open_form(Some(member));
            }
            true
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(member) = app.registry.selected_member() {
                app.registry.mode = RegistryMode::ConfirmDelete(member.id.clone());
            }
            true
        }
        KeyCode::Esc => {
            if app.registry.banner.is_some() {
                app.registry.banner = None;
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

fn handle_registry_form(app: &mut App, code: KeyCode) {
    let mut submit: Option<Member> = None;
    let mut close = false;
    {
        let RegistryMode::Form { form, editing } = &mut app.registry.mode else {
            return;
        };
        match code {
            KeyCode::Esc => close = true,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if !form.busy => match form_to_member(form, editing.as_ref()) {
                Ok(member) => submit = Some(member),
                Err(err) => form.error = Some(err),
            },
            KeyCode::Char(c) => form.input(c),
            _ => {}
        }
    }
    if close {
        app.registry.close_modal();
    }
    if let Some(member) = submit {
        app.save_member(member);
    }
}

// --- Attendance ---

fn handle_attendance(app: &mut App, code: KeyCode) -> bool {
    if app.attendance.date_input.is_some() {
        handle_date_input(app, code);
        return true;
    }

    if app.attendance.mode == AttendanceMode::Report {
        match code {
            KeyCode::Left => {
                app.attendance.report_prev_month();
                true
            }
            KeyCode::Right => {
                app.attendance.report_next_month();
                true
            }
            KeyCode::Esc | KeyCode::Char('m') => {
                app.attendance.mode = AttendanceMode::Roster;
                true
            }
            _ => false,
        }
    } else {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.attendance.move_up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.attendance.move_down();
                true
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                app.attendance.toggle_selected();
                true
            }
            KeyCode::Char('s') => {
                app.save_attendance();
                true
            }
            KeyCode::Char('c') => {
                let next = app.attendance.filter.category.next();
                app.attendance.set_category(next);
                app.start_attendance_fetch();
                true
            }
            KeyCode::Char('C') => {
                let prev = app.attendance.filter.category.prev();
                app.attendance.set_category(prev);
                app.start_attendance_fetch();
                true
            }
            KeyCode::Char('d') => {
                app.attendance.date_input = Some(app.attendance.filter.date.clone());
                true
            }
            KeyCode::Char('m') => {
                app.attendance.mode = AttendanceMode::Report;
                true
            }
            KeyCode::Esc => {
                if app.attendance.error.is_some() || app.attendance.saved_notice {
                    app.attendance.error = None;
                    app.attendance.saved_notice = false;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}

fn handle_date_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if let Some(buf) = &mut app.attendance.date_input {
                buf.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(buf) = &mut app.attendance.date_input {
                buf.pop();
            }
        }
        KeyCode::Enter => {
            let Some(buf) = app.attendance.date_input.clone() else {
                return;
            };
            if app.attendance.set_date(&buf) {
                app.attendance.date_input = None;
                app.attendance.error = None;
                app.start_attendance_fetch();
            } else {
                app.attendance.error = Some("Use the YYYY-MM-DD format.".to_string());
            }
        }
        KeyCode::Esc => app.attendance.date_input = None,
        _ => {}
    }
}

// --- Finance ---

fn handle_finance(app: &mut App, code: KeyCode) -> bool {
    if matches!(app.finance.mode, FinanceMode::Form { .. }) {
        handle_finance_form(app, code);
        return true;
    }

    if app.finance.searching {
        match code {
            KeyCode::Esc => {
                app.finance.searching = false;
                app.finance.search.clear();
            }
            KeyCode::Enter => app.finance.searching = false,
            KeyCode::Backspace => {
                app.finance.search.pop();
            }
            KeyCode::Char(c) => {
                app.finance.search.push(c);
            }
            _ => {}
        }
        return true;
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.finance.move_up();
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.finance.move_down();
            true
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_payment_status();
            true
        }
        KeyCode::Char('n') => {
            app.open_charge_form();
            true
        }
        KeyCode::Char('/') => {
            app.finance.searching = true;
            true
        }
        KeyCode::Esc => {
            if app.finance.error.is_some() {
                app.finance.error = None;
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

fn handle_finance_form(app: &mut App, code: KeyCode) {
    let mut submit: Option<Payment> = None;
    let mut close = false;
    {
        let FinanceMode::Form { form, member_ids } = &mut app.finance.mode else {
            return;
        };
        match code {
            KeyCode::Esc => close = true,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if !form.busy => match form_to_payment(form, member_ids) {
                Ok(payment) => submit = Some(payment),
                Err(err) => form.error = Some(err),
            },
            KeyCode::Char(c) => form.input(c),
            _ => {}
        }
    }
    if close {
        app.finance.close_modal();
    }
    if let Some(payment) = submit {
        app.save_payment(payment);
    }
}

// --- Calendar ---

fn handle_calendar(app: &mut App, code: KeyCode) -> bool {
    match &app.calendar.mode {
        CalendarMode::Form { .. } => {
            handle_calendar_form(app, code);
            return true;
        }
        CalendarMode::ConfirmDelete(id) => {
            let id = id.clone();
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.calendar.mode = CalendarMode::List;
                    app.delete_event(id);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.calendar.mode = CalendarMode::List;
                }
                _ => {}
            }
            return true;
        }
        CalendarMode::List => {}
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.calendar.move_up();
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.calendar.move_down();
            true
        }
        KeyCode::Char('n') => {
            app.calendar.open_form(None);
            true
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(event) = app.calendar.selected_event().cloned() {
                app.calendar.open_form(Some(event));
            }
            true
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(event) = app.calendar.selected_event() {
                app.calendar.mode = CalendarMode::ConfirmDelete(event.id.clone());
            }
            true
        }
        KeyCode::Esc => {
            if app.calendar.error.is_some() {
                app.calendar.error = None;
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

fn handle_calendar_form(app: &mut App, code: KeyCode) {
    let mut submit: Option<TrainingEvent> = None;
    let mut close = false;
    {
        let CalendarMode::Form { form, editing } = &mut app.calendar.mode else {
            return;
        };
        match code {
            KeyCode::Esc => close = true,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if !form.busy => match form_to_event(form, editing.as_ref()) {
                Ok(event) => submit = Some(event),
                Err(err) => form.error = Some(err),
            },
            KeyCode::Char(c) => form.input(c),
            _ => {}
        }
    }
    if close {
        app.calendar.close_modal();
    }
    if let Some(event) = submit {
        app.save_event(event);
    }
}
