use clubdesk_core::{current_period, overdue_members, DashboardStats, Member, Payment};

const OVERDUE_PREVIEW_LEN: usize = 5;

/// Owner-only overview: headline numbers, the first few overdue members
/// and the generated advisory text.
pub struct DashboardView {
    pub loading: bool,
    pub stats: DashboardStats,
    pub overdue_preview: Vec<Member>,
    pub period: (&'static str, i32),
    pub insights: Option<String>,
    pub insights_loading: bool,
    pub last_seq: u64,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            loading: false,
            stats: DashboardStats::default(),
            overdue_preview: Vec::new(),
            period: current_period(),
            insights: None,
            insights_loading: false,
            last_seq: 0,
        }
    }
}

impl DashboardView {
    pub fn begin_fetch(&mut self, seq: u64) {
        self.last_seq = seq;
        self.loading = true;
    }

    pub fn apply_fetch(&mut self, seq: u64, members: Vec<Member>, payments: Vec<Payment>) -> bool {
        if seq != self.last_seq {
            return false;
        }
        let (month, year) = current_period();
        self.period = (month, year);
        self.stats = DashboardStats::compute(&members, &payments, month, year);
        self.overdue_preview = overdue_members(&members, &payments, month, year)
            .into_iter()
            .take(OVERDUE_PREVIEW_LEN)
            .cloned()
            .collect();
        self.loading = false;
        true
    }

    pub fn apply_insights(&mut self, seq: u64, text: String) -> bool {
        if seq != self.last_seq {
            return false;
        }
        self.insights = Some(text);
        self.insights_loading = false;
        true
    }
}
