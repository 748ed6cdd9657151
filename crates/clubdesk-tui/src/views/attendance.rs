use crate::fetch::AttendanceFilter;
use chrono::{Datelike, Local, NaiveDate};
use clubdesk_core::{
    ids_match, monthly_attendance, AttendanceRecord, Category, Member, MonthlyReport,
};
use std::collections::HashMap;

/// Local presence marks, seeded from fetched truth and reconciled against
/// it only when the roster is saved. `dirty` is the unsaved-changes flag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttendanceDraft {
    marks: HashMap<String, bool>,
    pub dirty: bool,
}

impl AttendanceDraft {
    pub fn seed(roster: &[&Member], records: &[AttendanceRecord], date: &str) -> Self {
        let marks = roster
            .iter()
            .map(|m| {
                let present = records
                    .iter()
                    .find(|r| ids_match(&r.member_id, &m.id) && r.date.trim() == date)
                    .map(|r| r.present)
                    .unwrap_or(false);
                (m.id.clone(), present)
            })
            .collect();
        Self {
            marks,
            dirty: false,
        }
    }

    pub fn is_present(&self, member_id: &str) -> bool {
        self.marks.get(member_id).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, member_id: &str) {
        let entry = self.marks.entry(member_id.to_string()).or_insert(false);
        *entry = !*entry;
        self.dirty = true;
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AttendanceMode {
    Roster,
    Report,
}

/// Attendance view: a (date, category) roster with a draft overlay, plus
/// the monthly summary report.
pub struct AttendanceView {
    pub filter: AttendanceFilter,
    pub members: Vec<Member>,
    pub records: Vec<AttendanceRecord>,
    pub draft: AttendanceDraft,
    pub loading: bool,
    pub saving: bool,
    pub saved_notice: bool,
    pub error: Option<String>,
    pub selected: usize,
    pub mode: AttendanceMode,
    /// Edit buffer while the user is typing a new date; None otherwise.
    pub date_input: Option<String>,
    pub report_year: i32,
    pub report_month: u32,
    pub last_seq: u64,
}

impl Default for AttendanceView {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            filter: AttendanceFilter {
                date: today.to_string(),
                category: Category::default(),
            },
            members: Vec::new(),
            records: Vec::new(),
            draft: AttendanceDraft::default(),
            loading: false,
            saving: false,
            saved_notice: false,
            error: None,
            selected: 0,
            mode: AttendanceMode::Roster,
            date_input: None,
            report_year: today.year(),
            report_month: today.month(),
            last_seq: 0,
        }
    }
}

impl AttendanceView {
    pub fn begin_fetch(&mut self, seq: u64) {
        self.last_seq = seq;
        self.loading = true;
    }

    /// Apply a completed fetch only if it is the latest one issued and
    /// was issued under the filter still in effect; otherwise it is a
    /// stale response racing a newer filter and is dropped.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        filter: &AttendanceFilter,
        members: Vec<Member>,
        records: Vec<AttendanceRecord>,
    ) -> bool {
        if seq != self.last_seq || *filter != self.filter {
            return false;
        }
        self.loading = false;
        self.members = members;
        self.records = records;
        self.reseed_draft();
        self.clamp_selection();
        true
    }

    pub fn roster(&self) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|m| m.category == self.filter.category)
            .collect()
    }

    fn reseed_draft(&mut self) {
        let draft = {
            let roster = self.roster();
            AttendanceDraft::seed(&roster, &self.records, &self.filter.date)
        };
        self.draft = draft;
    }

    pub fn toggle_selected(&mut self) {
        let id = self.roster().get(self.selected).map(|m| m.id.clone());
        if let Some(id) = id {
            self.draft.toggle(&id);
            self.saved_notice = false;
        }
    }

    /// The full roster for the current (category, date), draft applied.
    /// This is the batch submitted as one overwrite unit.
    pub fn batch(&self) -> Vec<AttendanceRecord> {
        let category = self.filter.category.label();
        self.roster()
            .iter()
            .map(|m| {
                AttendanceRecord::mark(
                    &m.id,
                    &self.filter.date,
                    category,
                    self.draft.is_present(&m.id),
                )
            })
            .collect()
    }

    pub fn set_category(&mut self, category: Category) {
        self.filter.category = category;
        self.selected = 0;
    }

    /// Accepts only a well-formed ISO date; everything else keeps the
    /// current filter untouched.
    pub fn set_date(&mut self, date: &str) -> bool {
        match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
            Ok(parsed) => {
                self.filter.date = parsed.to_string();
                self.report_year = parsed.year();
                self.report_month = parsed.month();
                true
            }
            Err(_) => false,
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.roster().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.roster().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    // --- Monthly report ---

    pub fn report(&self) -> Option<MonthlyReport> {
        monthly_attendance(
            &self.members,
            &self.records,
            self.filter.category,
            self.report_year,
            self.report_month,
        )
    }

    pub fn report_prev_month(&mut self) {
        if self.report_month == 1 {
            self.report_month = 12;
            self.report_year -= 1;
        } else {
            self.report_month -= 1;
        }
    }

    pub fn report_next_month(&mut self) {
        if self.report_month == 12 {
            self.report_month = 1;
            self.report_year += 1;
        } else {
            self.report_month += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, category: Category) -> Member {
        Member {
            id: id.into(),
            first_name: id.to_uppercase(),
            last_name: "Test".into(),
            category,
            guardian_name: String::new(),
            guardian_phone: String::new(),
            active: true,
            enrolled_at: None,
        }
    }

    fn view_with_roster() -> AttendanceView {
        let mut view = AttendanceView::default();
        view.filter = AttendanceFilter {
            date: "2025-03-10".into(),
            category: Category::Decima,
        };
        view.begin_fetch(1);
        let members = vec![
            member("a", Category::Decima),
            member("b", Category::Decima),
            member("c", Category::Infantil),
        ];
        let records = vec![AttendanceRecord::mark(
            "a",
            "2025-03-10",
            Category::Decima.label(),
            true,
        )];
        assert!(view.apply_fetch(1, &view.filter.clone(), members, records));
        view
    }

    #[test]
    fn draft_seeds_from_fetched_truth() {
        let view = view_with_roster();
        assert!(view.draft.is_present("a"));
        assert!(!view.draft.is_present("b"));
        assert!(!view.draft.dirty);
    }

    #[test]
    fn toggle_sets_unsaved_flag() {
        let mut view = view_with_roster();
        view.selected = 1;
        view.toggle_selected();
        assert!(view.draft.is_present("b"));
        assert!(view.draft.dirty);
    }

    #[test]
    fn batch_covers_exactly_the_filtered_roster() {
        let mut view = view_with_roster();
        view.selected = 1;
        view.toggle_selected();
        let batch = view.batch();
        assert_eq!(batch.len(), 2); // "c" is another category
        assert!(batch.iter().all(|r| r.date == "2025-03-10"));
        assert!(batch
            .iter()
            .all(|r| r.category == Category::Decima.label()));
        assert!(batch.iter().any(|r| r.member_id == "a" && r.present));
        assert!(batch.iter().any(|r| r.member_id == "b" && r.present));
    }

    #[test]
    fn response_for_an_outdated_filter_is_dropped() {
        let mut view = view_with_roster();
        let old_filter = view.filter.clone();

        // User flips to another category; a new fetch goes out.
        view.set_category(Category::Infantil);
        view.begin_fetch(2);

        // The fetch issued under the old filter limps in afterwards.
        let late = vec![member("z", Category::Decima)];
        assert!(!view.apply_fetch(2, &old_filter, late, Vec::new()));
        assert!(view.loading);

        // The matching response applies.
        let fresh_filter = view.filter.clone();
        assert!(view.apply_fetch(2, &fresh_filter, vec![member("c", Category::Infantil)], vec![]));
        assert_eq!(view.roster().len(), 1);
    }

    #[test]
    fn superseded_sequence_is_dropped_even_with_same_filter() {
        let mut view = view_with_roster();
        let filter = view.filter.clone();
        view.begin_fetch(2);
        view.begin_fetch(3);
        assert!(!view.apply_fetch(2, &filter, Vec::new(), Vec::new()));
        assert!(view.apply_fetch(3, &filter, Vec::new(), Vec::new()));
    }

    #[test]
    fn set_date_rejects_garbage() {
        let mut view = view_with_roster();
        assert!(!view.set_date("next tuesday"));
        assert_eq!(view.filter.date, "2025-03-10");
        assert!(view.set_date("2025-04-02"));
        assert_eq!(view.report_month, 4);
    }

    #[test]
    fn report_month_navigation_wraps_years() {
        let mut view = view_with_roster();
        view.report_year = 2025;
        view.report_month = 1;
        view.report_prev_month();
        assert_eq!((view.report_year, view.report_month), (2024, 12));
        view.report_next_month();
        assert_eq!((view.report_year, view.report_month), (2025, 1));
    }

    #[test]
    fn report_uses_fetched_records() {
        let view = view_with_roster();
        let report = view.report().unwrap();
        assert_eq!(report.active_dates.len(), 1);
        let row_a = report.rows.iter().find(|r| r.member_id == "a").unwrap();
        assert_eq!(row_a.percent, 100.0);
    }
}
