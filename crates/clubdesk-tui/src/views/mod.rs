pub mod attendance;
pub mod calendar;
pub mod dashboard;
pub mod finance;
pub mod form;
pub mod registry;

pub use attendance::{AttendanceDraft, AttendanceMode, AttendanceView};
pub use calendar::{form_to_event, CalendarMode, CalendarView};
pub use dashboard::DashboardView;
pub use finance::{form_to_payment, FinanceMode, FinanceRow, FinanceView};
pub use form::{FieldKind, FormField, FormState};
pub use registry::{form_to_member, RegistryMode, RegistryView};
