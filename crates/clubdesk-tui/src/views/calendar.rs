use super::form::{FormField, FormState};
use clubdesk_core::{Category, EventKind, TrainingEvent};

const FIELD_KIND: usize = 0;
const FIELD_CATEGORY: usize = 1;
const FIELD_DAY: usize = 2;
const FIELD_DATE: usize = 3;
const FIELD_TIME: usize = 4;
const FIELD_LOCATION: usize = 5;
const FIELD_INSTRUCTOR: usize = 6;
const FIELD_PLAN: usize = 7;

#[derive(Debug, PartialEq)]
pub enum CalendarMode {
    List,
    Form {
        form: FormState,
        editing: Option<TrainingEvent>,
    },
    ConfirmDelete(String),
}

/// Training and match calendar.
pub struct CalendarView {
    pub events: Vec<TrainingEvent>,
    pub loading: bool,
    pub selected: usize,
    pub mode: CalendarMode,
    pub error: Option<String>,
    pub last_seq: u64,
}

impl Default for CalendarView {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            loading: false,
            selected: 0,
            mode: CalendarMode::List,
            error: None,
            last_seq: 0,
        }
    }
}

impl CalendarView {
    pub fn begin_fetch(&mut self, seq: u64) {
        self.last_seq = seq;
        self.loading = true;
    }

    pub fn apply_fetch(&mut self, seq: u64, events: Vec<TrainingEvent>) -> bool {
        if seq != self.last_seq {
            return false;
        }
        self.loading = false;
        self.events = events;
        if self.selected >= self.events.len() {
            self.selected = self.events.len().saturating_sub(1);
        }
        true
    }

    pub fn selected_event(&self) -> Option<&TrainingEvent> {
        self.events.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.events.len() {
            self.selected += 1;
        }
    }

    pub fn open_form(&mut self, editing: Option<TrainingEvent>) {
        let form = event_form(editing.as_ref());
        self.mode = CalendarMode::Form { form, editing };
    }

    pub fn close_modal(&mut self) {
        self.mode = CalendarMode::List;
    }
}

fn event_form(editing: Option<&TrainingEvent>) -> FormState {
    let title = if editing.is_some() {
        "Edit Entry"
    } else {
        "Schedule Entry"
    };
    let kind_options: Vec<String> = EventKind::all().iter().map(|k| k.as_str().to_string()).collect();
    let category_options: Vec<String> = Category::all()
        .iter()
        .map(|c| c.label().to_string())
        .collect();

    let (kind, category, day, date, time, location, instructor, plan) = match editing {
        Some(e) => (
            e.kind.as_str().to_string(),
            e.category.label().to_string(),
            e.day.clone(),
            e.date.clone().unwrap_or_default(),
            e.time.clone(),
            e.location.clone(),
            e.instructor.clone(),
            e.plan.clone(),
        ),
        None => (
            EventKind::Training.as_str().to_string(),
            Category::default().label().to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ),
    };

    FormState::new(
        title,
        vec![
            FormField::select("Kind", kind_options, kind),
            FormField::select("Category", category_options, category),
            FormField::text("Day", day),
            FormField::text("Date (optional)", date),
            FormField::text("Time", time),
            FormField::text("Location", location),
            FormField::text("Instructor", instructor),
            FormField::text("Plan", plan),
        ],
    )
}

pub fn form_to_event(
    form: &FormState,
    editing: Option<&TrainingEvent>,
) -> Result<TrainingEvent, String> {
    let day = form.value(FIELD_DAY).trim().to_string();
    if day.is_empty() {
        return Err("day label is required".to_string());
    }

    let kind = EventKind::all()
        .into_iter()
        .find(|k| k.as_str() == form.value(FIELD_KIND))
        .ok_or_else(|| "pick a kind".to_string())?;
    let category: Category = form
        .value(FIELD_CATEGORY)
        .parse()
        .map_err(|_| "pick a category".to_string())?;

    let date = form.value(FIELD_DATE).trim().to_string();
    Ok(TrainingEvent {
        id: editing.map(|e| e.id.clone()).unwrap_or_default(),
        category,
        kind,
        day,
        date: if date.is_empty() { None } else { Some(date) },
        time: form.value(FIELD_TIME).trim().to_string(),
        location: form.value(FIELD_LOCATION).trim().to_string(),
        instructor: form.value(FIELD_INSTRUCTOR).trim().to_string(),
        plan: form.value(FIELD_PLAN).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str) -> TrainingEvent {
        TrainingEvent {
            id: id.into(),
            category: Category::PreDecima,
            kind: EventKind::Match,
            day: "Sábado 15".into(),
            date: Some("2025-03-15".into()),
            time: "10:00".into(),
            location: "Club grounds".into(),
            instructor: "Diego".into(),
            plan: "Friendly vs. San Pablo".into(),
        }
    }

    #[test]
    fn edit_round_trip_preserves_everything() {
        let original = event("event-3");
        let mut view = CalendarView::default();
        view.open_form(Some(original.clone()));
        let CalendarMode::Form { form, editing } = &view.mode else {
            panic!("expected form");
        };
        assert_eq!(form_to_event(form, editing.as_ref()).unwrap(), original);
    }

    #[test]
    fn missing_day_is_rejected() {
        let form = event_form(None);
        assert!(form_to_event(&form, None).unwrap_err().contains("day"));
    }

    #[test]
    fn blank_date_becomes_none() {
        let mut form = event_form(None);
        form.fields[FIELD_DAY].value = "Lunes".into();
        form.fields[FIELD_DATE].value = "  ".into();
        let e = form_to_event(&form, None).unwrap();
        assert_eq!(e.date, None);
        assert!(e.id.is_empty());
    }

    #[test]
    fn stale_fetch_discarded() {
        let mut view = CalendarView::default();
        view.begin_fetch(2);
        assert!(!view.apply_fetch(1, vec![event("event-1")]));
        assert!(view.events.is_empty());
        assert!(view.apply_fetch(2, vec![event("event-2")]));
        assert_eq!(view.events.len(), 1);
    }
}
