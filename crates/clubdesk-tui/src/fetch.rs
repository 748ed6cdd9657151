//! Messages flowing from spawned network tasks back into the event loop.
//!
//! Every fetch carries the sequence number it was issued under, and the
//! attendance fetch additionally the filter snapshot, so a slow response
//! that arrives after the user moved on is discarded instead of
//! overwriting fresher state.

use clubdesk_client::UserValidation;
use clubdesk_core::{AttendanceRecord, Category, Member, Payment, TrainingEvent};

/// The attendance view's filter at the moment a fetch was issued.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttendanceFilter {
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub category: Category,
}

/// Which view a completed write belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriteTarget {
    Registry,
    Attendance,
    Finance,
    Calendar,
}

#[derive(Debug)]
pub enum DataMsg {
    Login {
        email: String,
        result: Result<UserValidation, String>,
    },
    Registry {
        seq: u64,
        members: Vec<Member>,
        error: Option<String>,
    },
    Attendance {
        seq: u64,
        filter: AttendanceFilter,
        members: Vec<Member>,
        records: Vec<AttendanceRecord>,
    },
    Finance {
        seq: u64,
        members: Vec<Member>,
        payments: Vec<Payment>,
    },
    Calendar {
        seq: u64,
        events: Vec<TrainingEvent>,
    },
    Dashboard {
        seq: u64,
        members: Vec<Member>,
        payments: Vec<Payment>,
    },
    Insights {
        seq: u64,
        text: String,
    },
    WriteDone {
        target: WriteTarget,
        result: Result<(), String>,
    },
}
