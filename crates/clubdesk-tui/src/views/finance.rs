use super::form::{FieldKind, FormField, FormState};
use clubdesk_core::{ids_match, Member, Payment, PaymentStatus, MONTHS};

const FIELD_MEMBER: usize = 0;
const FIELD_MONTH: usize = 1;
const FIELD_YEAR: usize = 2;
const FIELD_AMOUNT: usize = 3;

#[derive(Debug, PartialEq)]
pub enum FinanceMode {
    List,
    Form {
        form: FormState,
        /// Member ids aligned with the member select options.
        member_ids: Vec<String>,
    },
}

/// One table line: a payment joined to its member by drift-tolerant id
/// equality. `member_name` is None when the registry has no such id.
pub struct FinanceRow<'a> {
    pub payment: &'a Payment,
    pub member_name: Option<String>,
}

/// Fee tracking: the payments ledger joined against the registry.
pub struct FinanceView {
    pub payments: Vec<Payment>,
    pub members: Vec<Member>,
    pub loading: bool,
    pub search: String,
    pub searching: bool,
    pub selected: usize,
    pub mode: FinanceMode,
    pub error: Option<String>,
    pub last_seq: u64,
}

impl Default for FinanceView {
    fn default() -> Self {
        Self {
            payments: Vec::new(),
            members: Vec::new(),
            loading: false,
            search: String::new(),
            searching: false,
            selected: 0,
            mode: FinanceMode::List,
            error: None,
            last_seq: 0,
        }
    }
}

impl FinanceView {
    pub fn begin_fetch(&mut self, seq: u64) {
        self.last_seq = seq;
        self.loading = true;
    }

    pub fn apply_fetch(&mut self, seq: u64, members: Vec<Member>, payments: Vec<Payment>) -> bool {
        if seq != self.last_seq {
            return false;
        }
        self.loading = false;
        self.members = members;
        self.payments = payments;
        self.clamp_selection();
        true
    }

    fn member_for<'a>(&'a self, payment: &Payment) -> Option<&'a Member> {
        self.members
            .iter()
            .find(|m| ids_match(&m.id, &payment.member_id))
    }

    /// Joined rows, filtered by the member-name search term. An empty
    /// term shows everything, orphaned payments included.
    pub fn rows(&self) -> Vec<FinanceRow<'_>> {
        let term = self.search.trim().to_lowercase();
        self.payments
            .iter()
            .filter_map(|p| {
                let member = self.member_for(p);
                if !term.is_empty() {
                    let name = member?.full_name().to_lowercase();
                    if !name.contains(&term) {
                        return None;
                    }
                }
                Some(FinanceRow {
                    payment: p,
                    member_name: member.map(|m| m.full_name()),
                })
            })
            .collect()
    }

    pub fn selected_payment(&self) -> Option<&Payment> {
        self.rows().get(self.selected).map(|r| r.payment)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.rows().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// New-charge form, pre-filled with the current period and the
    /// configured standard fee.
    pub fn open_form(&mut self, month: &str, year: i32, fee_amount: f64) {
        let member_ids: Vec<String> = self.members.iter().map(|m| m.id.clone()).collect();
        let member_options: Vec<String> = self.members.iter().map(|m| m.full_name()).collect();
        let first_member = member_options.first().cloned().unwrap_or_default();
        let month_options: Vec<String> = MONTHS.iter().map(|m| m.to_string()).collect();

        let form = FormState::new(
            "New Charge",
            vec![
                FormField::select("Player", member_options, first_member),
                FormField::select("Month", month_options, month),
                FormField::text("Year", year.to_string()),
                FormField::text("Amount", format!("{fee_amount}")),
            ],
        );
        self.mode = FinanceMode::Form { form, member_ids };
    }

    pub fn close_modal(&mut self) {
        self.mode = FinanceMode::List;
    }
}

/// Validate the new-charge form. Fresh charges start PENDING; the row
/// gets toggled to PAID when the money actually arrives.
pub fn form_to_payment(form: &FormState, member_ids: &[String]) -> Result<Payment, String> {
    let options = match form.fields.first().map(|f| &f.kind) {
        Some(FieldKind::Select(options)) => options,
        _ => return Err("pick a player".to_string()),
    };
    let member_id = options
        .iter()
        .position(|o| o == form.value(FIELD_MEMBER))
        .and_then(|index| member_ids.get(index))
        .cloned()
        .ok_or_else(|| "pick a player".to_string())?;

    let year: i32 = form
        .value(FIELD_YEAR)
        .trim()
        .parse()
        .map_err(|_| "year must be a number".to_string())?;
    let amount: f64 = form
        .value(FIELD_AMOUNT)
        .trim()
        .parse()
        .map_err(|_| "amount must be a number".to_string())?;

    Ok(Payment {
        id: String::new(),
        member_id,
        month: form.value(FIELD_MONTH).to_string(),
        year,
        amount,
        status: PaymentStatus::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubdesk_core::Category;

    fn member(id: &str, first: &str) -> Member {
        Member {
            id: id.into(),
            first_name: first.into(),
            last_name: "Test".into(),
            category: Category::Cebollitas,
            guardian_name: String::new(),
            guardian_phone: String::new(),
            active: true,
            enrolled_at: None,
        }
    }

    fn payment(id: &str, member_id: &str) -> Payment {
        Payment {
            id: id.into(),
            member_id: member_id.into(),
            month: "March".into(),
            year: 2025,
            amount: 8500.0,
            status: PaymentStatus::Pending,
        }
    }

    fn loaded_view() -> FinanceView {
        let mut view = FinanceView::default();
        view.begin_fetch(1);
        view.apply_fetch(
            1,
            vec![member("1042", "Ana"), member("member-2", "Bruno")],
            vec![
                payment("p1", " 1042 "),
                payment("p2", "member-2"),
                payment("p3", "ghost"),
            ],
        );
        view
    }

    #[test]
    fn join_tolerates_drift_and_keeps_orphans() {
        let view = loaded_view();
        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].member_name.as_deref(), Some("Ana Test"));
        assert_eq!(rows[2].member_name, None);
    }

    #[test]
    fn search_hides_orphans_and_non_matches() {
        let mut view = loaded_view();
        view.search = "ana".into();
        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payment.id, "p1");
    }

    #[test]
    fn stale_fetch_discarded() {
        let mut view = loaded_view();
        view.begin_fetch(5);
        assert!(!view.apply_fetch(4, Vec::new(), Vec::new()));
        assert_eq!(view.payments.len(), 3);
    }

    #[test]
    fn new_charge_form_round_trip() {
        let mut view = loaded_view();
        view.open_form("March", 2025, 8500.0);
        let FinanceMode::Form { mut form, member_ids } = std::mem::replace(
            &mut view.mode,
            FinanceMode::List,
        ) else {
            panic!("expected form");
        };
        // Pick the second player.
        form.focus = 0;
        form.cycle(true);
        let p = form_to_payment(&form, &member_ids).unwrap();
        assert_eq!(p.member_id, "member-2");
        assert_eq!(p.month, "March");
        assert_eq!(p.year, 2025);
        assert_eq!(p.amount, 8500.0);
        assert_eq!(p.status, PaymentStatus::Pending);
        assert!(p.id.is_empty());
    }

    #[test]
    fn bad_year_or_amount_is_rejected() {
        let mut view = loaded_view();
        view.open_form("March", 2025, 8500.0);
        let FinanceMode::Form { mut form, member_ids } =
            std::mem::replace(&mut view.mode, FinanceMode::List)
        else {
            panic!("expected form");
        };
        form.fields[FIELD_YEAR].value = "soon".into();
        assert!(form_to_payment(&form, &member_ids).is_err());
    }
}
