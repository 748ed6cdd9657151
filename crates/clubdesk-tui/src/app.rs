use crate::config::Settings;
use crate::fetch::{DataMsg, WriteTarget};
use crate::routes::{self, Route};
use crate::session::{builtin_role, SessionStore};
use crate::views::{
    AttendanceView, CalendarMode, CalendarView, DashboardView, FinanceMode, FinanceView,
    RegistryMode, RegistryView,
};
use clubdesk_client::{ClubData, ClubSnapshot, InsightsClient, SheetGateway};
use clubdesk_core::{current_period, Member, Payment, Role, SessionUser, TrainingEvent};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Screen {
    Login,
    Shell,
}

#[derive(Default)]
pub struct LoginState {
    pub email: String,
    pub error: Option<String>,
    pub busy: bool,
}

/// Whole-console state plus the handles the spawned fetches need.
pub struct App {
    pub screen: Screen,
    pub route: Route,
    pub user: Option<SessionUser>,
    pub should_quit: bool,

    pub club_name: String,
    pub fee_amount: f64,

    pub login: LoginState,
    pub registry: RegistryView,
    pub attendance: AttendanceView,
    pub finance: FinanceView,
    pub calendar: CalendarView,
    pub dashboard: DashboardView,

    /// Where to land after authentication (the `--open` deep link).
    start_route: Route,
    seq: u64,
    base: SheetGateway,
    data: Option<ClubData>,
    insights: InsightsClient,
    sessions: SessionStore,
    tx: UnboundedSender<DataMsg>,
}

impl App {
    pub fn new(settings: &Settings, tx: UnboundedSender<DataMsg>) -> Self {
        let base = SheetGateway::new(
            settings.endpoint.url.clone(),
            None,
            settings.endpoint.timeout(),
        );
        Self {
            screen: Screen::Login,
            route: Route::Dashboard,
            user: None,
            should_quit: false,
            club_name: settings.club.name.clone(),
            fee_amount: settings.club.fee_amount,
            login: LoginState::default(),
            registry: RegistryView::default(),
            attendance: AttendanceView::default(),
            finance: FinanceView::default(),
            calendar: CalendarView::default(),
            dashboard: DashboardView::default(),
            start_route: Route::Dashboard,
            seq: 0,
            base,
            data: None,
            insights: InsightsClient::new(settings.insights.clone()),
            sessions: SessionStore::new(settings.session.file.clone()),
            tx,
        }
    }

    /// Restore a persisted session or show the login form.
    pub fn bootstrap(&mut self, open: Route) {
        self.start_route = open;
        match self.sessions.load() {
            Some(user) => {
                info!(email = %user.email, role = %user.rol, "resuming session");
                self.enter_shell(user, open);
            }
            None => self.screen = Screen::Login,
        }
    }

    fn enter_shell(&mut self, user: SessionUser, requested: Route) {
        let role = user.rol;
        self.data = Some(ClubData::new(self.base.with_token(user.email.clone())));
        self.user = Some(user);
        self.screen = Screen::Shell;
        self.route = routes::resolve(requested, role);
        self.refresh_current();
    }

    pub fn navigate(&mut self, requested: Route) {
        let Some(user) = &self.user else { return };
        let resolved = routes::resolve(requested, user.rol);
        if resolved != self.route {
            self.route = resolved;
            self.refresh_current();
        }
    }

    /// Step through the role-filtered sidebar, wrapping.
    pub fn nav_step(&mut self, delta: isize) {
        let Some(user) = &self.user else { return };
        let items = Route::nav_items(user.rol);
        let len = items.len() as isize;
        let current = items
            .iter()
            .position(|r| *r == self.route)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.navigate(items[next]);
    }

    pub fn refresh_current(&mut self) {
        match self.route {
            Route::Dashboard => self.start_dashboard_fetch(),
            Route::Registry => self.start_registry_fetch(),
            Route::Attendance => self.start_attendance_fetch(),
            Route::Finance => self.start_finance_fetch(),
            Route::Calendar => self.start_calendar_fetch(),
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // --- Session ---

    pub fn submit_login(&mut self) {
        let email = self.login.email.trim().to_string();
        if email.is_empty() || self.login.busy {
            return;
        }
        self.login.error = None;

        // The two house identities sign in without touching the backend.
        if let Some(role) = builtin_role(&email) {
            self.finish_login(SessionUser::new(email, role));
            return;
        }

        self.login.busy = true;
        let gateway = self.base.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .validate_user(&email)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::Login { email, result });
        });
    }

    fn finish_login(&mut self, user: SessionUser) {
        if let Err(err) = self.sessions.save(&user) {
            warn!(error = %err, "could not persist session");
        }
        info!(email = %user.email, role = %user.rol, "signed in");
        let requested = self.start_route;
        self.enter_shell(user, requested);
    }

    pub fn logout(&mut self) {
        info!("signed out");
        self.sessions.clear();
        self.user = None;
        self.data = None;
        self.screen = Screen::Login;
        self.login = LoginState::default();
        // The next identity starts from clean view state.
        self.registry = RegistryView::default();
        self.attendance = AttendanceView::default();
        self.finance = FinanceView::default();
        self.calendar = CalendarView::default();
        self.dashboard = DashboardView::default();
        self.route = Route::Dashboard;
        self.start_route = Route::Dashboard;
    }

    // --- Fetches (spawned; results come back as DataMsg) ---

    pub fn start_registry_fetch(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let seq = self.next_seq();
        self.registry.begin_fetch(seq);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (members, error) = match data.fetch_members().await {
                Ok(members) => (members, None),
                Err(err) => (Vec::new(), Some(format!("Could not load players: {err}"))),
            };
            let _ = tx.send(DataMsg::Registry {
                seq,
                members,
                error,
            });
        });
    }

    pub fn start_attendance_fetch(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let seq = self.next_seq();
        self.attendance.begin_fetch(seq);
        let filter = self.attendance.filter.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (members, records) = tokio::join!(data.list_members(), data.list_attendance());
            let _ = tx.send(DataMsg::Attendance {
                seq,
                filter,
                members,
                records,
            });
        });
    }

    pub fn start_finance_fetch(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let seq = self.next_seq();
        self.finance.begin_fetch(seq);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (members, payments) = tokio::join!(data.list_members(), data.list_payments());
            let _ = tx.send(DataMsg::Finance {
                seq,
                members,
                payments,
            });
        });
    }

    pub fn start_calendar_fetch(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let seq = self.next_seq();
        self.calendar.begin_fetch(seq);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let events = data.list_events().await;
            let _ = tx.send(DataMsg::Calendar { seq, events });
        });
    }

    pub fn start_dashboard_fetch(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let seq = self.next_seq();
        self.dashboard.begin_fetch(seq);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (members, payments) = tokio::join!(data.list_members(), data.list_payments());
            let _ = tx.send(DataMsg::Dashboard {
                seq,
                members,
                payments,
            });
        });
    }

    fn start_insights_fetch(&mut self) {
        if self.dashboard.stats.total_members == 0 {
            return;
        }
        let seq = self.dashboard.last_seq;
        self.dashboard.insights_loading = true;
        let snapshot = ClubSnapshot {
            club_name: self.club_name.clone(),
            member_count: self.dashboard.stats.total_members,
            overdue_count: self.dashboard.stats.overdue_count,
            total_collected: self.dashboard.stats.total_collected,
        };
        let client = self.insights.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let text = client.summary_or_placeholder(&snapshot).await;
            let _ = tx.send(DataMsg::Insights { seq, text });
        });
    }

    // --- Writes (fire, then reconcile by re-fetching) ---

    pub fn save_member(&mut self, member: Member) {
        let Some(data) = self.data.clone() else { return };
        if let RegistryMode::Form { form, .. } = &mut self.registry.mode {
            form.busy = true;
            form.error = None;
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data
                .save_member(&member)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Registry,
                result,
            });
        });
    }

    pub fn delete_member(&mut self, id: String) {
        let Some(data) = self.data.clone() else { return };
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data.delete_member(&id).await.map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Registry,
                result,
            });
        });
    }

    pub fn save_attendance(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let batch = self.attendance.batch();
        if batch.is_empty() || self.attendance.saving {
            return;
        }
        self.attendance.saving = true;
        self.attendance.saved_notice = false;
        self.attendance.error = None;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data
                .save_attendance_batch(&batch)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Attendance,
                result,
            });
        });
    }

    pub fn toggle_payment_status(&mut self) {
        let Some(data) = self.data.clone() else { return };
        let Some(payment) = self.finance.selected_payment() else {
            return;
        };
        let id = payment.id.clone();
        let next = payment.status.toggled();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data
                .set_payment_status(&id, next)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Finance,
                result,
            });
        });
    }

    pub fn save_payment(&mut self, payment: Payment) {
        let Some(data) = self.data.clone() else { return };
        if let FinanceMode::Form { form, .. } = &mut self.finance.mode {
            form.busy = true;
            form.error = None;
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data
                .save_payment(&payment)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Finance,
                result,
            });
        });
    }

    pub fn save_event(&mut self, event: TrainingEvent) {
        let Some(data) = self.data.clone() else { return };
        if let CalendarMode::Form { form, .. } = &mut self.calendar.mode {
            form.busy = true;
            form.error = None;
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data
                .save_event(&event)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Calendar,
                result,
            });
        });
    }

    pub fn delete_event(&mut self, id: String) {
        let Some(data) = self.data.clone() else { return };
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = data.delete_event(&id).await.map_err(|e| e.to_string());
            let _ = tx.send(DataMsg::WriteDone {
                target: WriteTarget::Calendar,
                result,
            });
        });
    }

    /// The new-charge form needs the current period and the standard fee.
    pub fn open_charge_form(&mut self) {
        let (month, year) = current_period();
        let fee = self.fee_amount;
        self.finance.open_form(month, year, fee);
    }

    // --- Message application ---

    pub fn apply(&mut self, msg: DataMsg) {
        match msg {
            DataMsg::Login { email, result } => {
                self.login.busy = false;
                match result {
                    Ok(v) if v.autorizado => {
                        let role = v.rol.unwrap_or(Role::Staff);
                        self.finish_login(SessionUser::new(email, role));
                    }
                    Ok(v) => {
                        self.login.error =
                            Some(v.error.unwrap_or_else(|| "Not authorized.".to_string()));
                    }
                    Err(err) => {
                        self.login.error = Some(format!("Connection error: {err}"));
                    }
                }
            }
            DataMsg::Registry {
                seq,
                members,
                error,
            } => {
                self.registry.apply_fetch(seq, members, error);
            }
            DataMsg::Attendance {
                seq,
                filter,
                members,
                records,
            } => {
                self.attendance.apply_fetch(seq, &filter, members, records);
            }
            DataMsg::Finance {
                seq,
                members,
                payments,
            } => {
                self.finance.apply_fetch(seq, members, payments);
            }
            DataMsg::Calendar { seq, events } => {
                self.calendar.apply_fetch(seq, events);
            }
            DataMsg::Dashboard {
                seq,
                members,
                payments,
            } => {
                if self.dashboard.apply_fetch(seq, members, payments) {
                    self.start_insights_fetch();
                }
            }
            DataMsg::Insights { seq, text } => {
                self.dashboard.apply_insights(seq, text);
            }
            DataMsg::WriteDone { target, result } => self.apply_write(target, result),
        }
    }

    fn apply_write(&mut self, target: WriteTarget, result: Result<(), String>) {
        match target {
            WriteTarget::Registry => match result {
                Ok(()) => {
                    self.registry.close_modal();
                    self.start_registry_fetch();
                }
                Err(msg) => {
                    if let RegistryMode::Form { form, .. } = &mut self.registry.mode {
                        form.busy = false;
                        form.error = Some(msg);
                    } else {
                        self.registry.banner = Some(msg);
                    }
                }
            },
            WriteTarget::Attendance => {
                self.attendance.saving = false;
                match result {
                    Ok(()) => {
                        self.attendance.saved_notice = true;
                        self.attendance.draft.dirty = false;
                        self.start_attendance_fetch();
                    }
                    Err(msg) => self.attendance.error = Some(msg),
                }
            }
            WriteTarget::Finance => match result {
                Ok(()) => {
                    self.finance.close_modal();
                    self.finance.error = None;
                    self.start_finance_fetch();
                }
                Err(msg) => {
                    if let FinanceMode::Form { form, .. } = &mut self.finance.mode {
                        form.busy = false;
                        form.error = Some(msg);
                    } else {
                        self.finance.error = Some(msg);
                    }
                }
            },
            WriteTarget::Calendar => match result {
                Ok(()) => {
                    self.calendar.close_modal();
                    self.calendar.error = None;
                    self.start_calendar_fetch();
                }
                Err(msg) => {
                    if let CalendarMode::Form { form, .. } = &mut self.calendar.mode {
                        form.busy = false;
                        form.error = Some(msg);
                    } else {
                        self.calendar.error = Some(msg);
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubdesk_core::Role;
    use tokio::sync::mpsc;

    fn test_app(session_file: std::path::PathBuf) -> App {
        let mut settings = Settings::load(Some("config/definitely-missing")).unwrap();
        settings.session.file = session_file;
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(&settings, tx)
    }

    #[tokio::test]
    async fn persisted_staff_session_is_guarded_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");
        SessionStore::new(file.clone())
            .save(&SessionUser::new("staff@club.com", Role::Staff))
            .unwrap();

        let mut app = test_app(file);
        app.bootstrap(Route::Finance);
        assert_eq!(app.screen, Screen::Shell);
        assert_eq!(app.route, Route::Attendance);
    }

    #[tokio::test]
    async fn builtin_owner_logs_in_without_network_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");
        let mut app = test_app(file.clone());
        app.bootstrap(Route::Dashboard);
        assert_eq!(app.screen, Screen::Login);

        app.login.email = "admin@club.com".to_string();
        app.submit_login();
        assert_eq!(app.screen, Screen::Shell);
        assert_eq!(app.route, Route::Dashboard);
        assert!(app.user.as_ref().unwrap().is_owner());

        let stored = SessionStore::new(file).load().unwrap();
        assert_eq!(stored.rol, Role::Owner);
    }

    #[tokio::test]
    async fn rejected_identity_shows_inline_error_and_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");
        let mut app = test_app(file.clone());
        app.bootstrap(Route::Dashboard);

        app.apply(DataMsg::Login {
            email: "who@club.com".to_string(),
            result: Ok(clubdesk_client::UserValidation {
                autorizado: false,
                rol: None,
                error: Some("Not on the list.".to_string()),
            }),
        });
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.login.error.as_deref(), Some("Not on the list."));
        assert!(SessionStore::new(file).load().is_none());
    }

    #[tokio::test]
    async fn logout_clears_session_and_returns_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");
        let mut app = test_app(file.clone());
        app.bootstrap(Route::Dashboard);
        app.login.email = "admin@club.com".to_string();
        app.submit_login();
        assert_eq!(app.screen, Screen::Shell);

        app.logout();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.user.is_none());
        assert!(SessionStore::new(file).load().is_none());
    }

    #[tokio::test]
    async fn nav_step_wraps_through_role_items() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path().join("session.json"));
        app.bootstrap(Route::Dashboard);
        app.login.email = "staff@club.com".to_string();
        app.submit_login();
        // Staff lands on attendance (dashboard is owner-only).
        assert_eq!(app.route, Route::Attendance);

        app.nav_step(1);
        assert_eq!(app.route, Route::Calendar);
        app.nav_step(1);
        assert_eq!(app.route, Route::Registry);
        app.nav_step(-1);
        assert_eq!(app.route, Route::Calendar);
    }
}
