use super::form::{FormField, FormState};
use clubdesk_core::{Category, Member};

const FIELD_FIRST_NAME: usize = 0;
const FIELD_LAST_NAME: usize = 1;
const FIELD_CATEGORY: usize = 2;
const FIELD_GUARDIAN: usize = 3;
const FIELD_PHONE: usize = 4;
const FIELD_ACTIVE: usize = 5;

#[derive(Debug, PartialEq)]
pub enum RegistryMode {
    List,
    Form {
        form: FormState,
        /// Original row when editing; carries id and enrollment date.
        editing: Option<Member>,
    },
    ConfirmDelete(String),
}

/// Player registry: list, live search, create/edit form, delete.
pub struct RegistryView {
    pub members: Vec<Member>,
    pub loading: bool,
    /// Dismissible read-failure notice.
    pub banner: Option<String>,
    pub search: String,
    pub searching: bool,
    pub selected: usize,
    pub mode: RegistryMode,
    pub last_seq: u64,
}

impl Default for RegistryView {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            loading: false,
            banner: None,
            search: String::new(),
            searching: false,
            selected: 0,
            mode: RegistryMode::List,
            last_seq: 0,
        }
    }
}

impl RegistryView {
    pub fn begin_fetch(&mut self, seq: u64) {
        self.last_seq = seq;
        self.loading = true;
    }

    /// Apply a completed fetch unless a newer one was issued meanwhile.
    pub fn apply_fetch(&mut self, seq: u64, members: Vec<Member>, error: Option<String>) -> bool {
        if seq != self.last_seq {
            return false;
        }
        self.loading = false;
        self.members = members;
        self.banner = error;
        self.clamp_selection();
        true
    }

    pub fn filtered(&self) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|m| m.name_matches(&self.search))
            .collect()
    }

    pub fn selected_member(&self) -> Option<&Member> {
        self.filtered().get(self.selected).copied()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.filtered().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn open_form(&mut self, editing: Option<Member>) {
        let form = member_form(editing.as_ref());
        self.mode = RegistryMode::Form { form, editing };
    }

    pub fn close_modal(&mut self) {
        self.mode = RegistryMode::List;
    }
}

fn member_form(editing: Option<&Member>) -> FormState {
    let title = if editing.is_some() {
        "Edit Player"
    } else {
        "New Player"
    };
    let category_options: Vec<String> = Category::all()
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    let yes_no = vec!["Yes".to_string(), "No".to_string()];

    let (first, last, category, guardian, phone, active) = match editing {
        Some(m) => (
            m.first_name.clone(),
            m.last_name.clone(),
            m.category.label().to_string(),
            m.guardian_name.clone(),
            m.guardian_phone.clone(),
            if m.active { "Yes" } else { "No" }.to_string(),
        ),
        None => (
            String::new(),
            String::new(),
            Category::default().label().to_string(),
            String::new(),
            String::new(),
            "Yes".to_string(),
        ),
    };

    FormState::new(
        title,
        vec![
            FormField::text("First name", first),
            FormField::text("Last name", last),
            FormField::select("Category", category_options, category),
            FormField::text("Guardian", guardian),
            FormField::text("Guardian phone", phone),
            FormField::select("Active", yes_no, active),
        ],
    )
}

/// Validate the form into a member row. The id stays empty for new rows;
/// the accessor mints one at save time.
pub fn form_to_member(form: &FormState, editing: Option<&Member>) -> Result<Member, String> {
    let first_name = form.value(FIELD_FIRST_NAME).trim().to_string();
    let last_name = form.value(FIELD_LAST_NAME).trim().to_string();
    if first_name.is_empty() || last_name.is_empty() {
        return Err("first and last name are required".to_string());
    }

    let category: Category = form
        .value(FIELD_CATEGORY)
        .parse()
        .map_err(|_| "pick a category".to_string())?;

    Ok(Member {
        id: editing.map(|m| m.id.clone()).unwrap_or_default(),
        first_name,
        last_name,
        category,
        guardian_name: form.value(FIELD_GUARDIAN).trim().to_string(),
        guardian_phone: form.value(FIELD_PHONE).trim().to_string(),
        active: form.value(FIELD_ACTIVE) == "Yes",
        enrolled_at: editing.and_then(|m| m.enrolled_at.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, first: &str) -> Member {
        Member {
            id: id.into(),
            first_name: first.into(),
            last_name: "Test".into(),
            category: Category::Cebollitas,
            guardian_name: "G".into(),
            guardian_phone: "123".into(),
            active: true,
            enrolled_at: Some("2024-02-01".into()),
        }
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut view = RegistryView::default();
        view.begin_fetch(1);
        view.begin_fetch(2);

        // The first (now stale) response arrives late.
        assert!(!view.apply_fetch(1, vec![member("a", "Old")], None));
        assert!(view.members.is_empty());
        assert!(view.loading);

        assert!(view.apply_fetch(2, vec![member("b", "New")], None));
        assert_eq!(view.members[0].first_name, "New");
        assert!(!view.loading);
    }

    #[test]
    fn search_filters_and_clamps_selection() {
        let mut view = RegistryView::default();
        view.apply_fetch(0, vec![member("a", "Ana"), member("b", "Bruno")], None);
        view.selected = 1;
        view.search = "ana".into();
        view.clamp_selection();
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(view.selected_member().unwrap().first_name, "Ana");
    }

    #[test]
    fn form_round_trip_preserves_id_and_enrollment() {
        let original = member("member-9", "Ana");
        let mut view = RegistryView::default();
        view.open_form(Some(original.clone()));
        let RegistryMode::Form { form, editing } = &view.mode else {
            panic!("expected form mode");
        };
        let saved = form_to_member(form, editing.as_ref()).unwrap();
        assert_eq!(saved, original);
    }

    #[test]
    fn empty_names_are_rejected() {
        let view_form = member_form(None);
        let err = form_to_member(&view_form, None).unwrap_err();
        assert!(err.contains("required"));
    }

    #[test]
    fn new_member_defaults_active_first_bracket() {
        let mut form = member_form(None);
        form.fields[FIELD_FIRST_NAME].value = "Ana".into();
        form.fields[FIELD_LAST_NAME].value = "Paz".into();
        let m = form_to_member(&form, None).unwrap();
        assert!(m.id.is_empty());
        assert!(m.active);
        assert_eq!(m.category, Category::Cebollitas);
    }
}
