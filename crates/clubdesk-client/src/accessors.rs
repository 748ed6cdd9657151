use crate::error::GatewayError;
use crate::gateway::SheetGateway;
use clubdesk_core::{
    assign_id, AttendanceRecord, Member, Payment, PaymentStatus, TrainingEvent, EVENT_ID_PREFIX,
    MEMBER_ID_PREFIX, PAYMENT_ID_PREFIX,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::warn;

/// Spreadsheet tab names, used by the row-delete action.
pub const MEMBERS_SHEET: &str = "Socios";
pub const PAYMENTS_SHEET: &str = "Pagos";
pub const EVENTS_SHEET: &str = "Entrenamientos";

/// Typed accessors over one [`SheetGateway`].
///
/// Reads never fail the caller: a transport error or an unexpected body
/// logs a warning and comes back as an empty list. Writes report
/// transport-level success only; callers re-fetch to reconcile.
#[derive(Clone)]
pub struct ClubData {
    gateway: SheetGateway,
}

impl ClubData {
    pub fn new(gateway: SheetGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &SheetGateway {
        &self.gateway
    }

    // --- Members ---

    pub async fn list_members(&self) -> Vec<Member> {
        self.list("obtain-members").await
    }

    /// Non-degrading variant for callers that surface read failures
    /// (the registry shows a dismissible banner).
    pub async fn fetch_members(&self) -> Result<Vec<Member>, GatewayError> {
        self.try_list("obtain-members").await
    }

    /// Save a member, minting `member-<millis>` when the id is absent.
    /// Returns the effective id.
    pub async fn save_member(&self, member: &Member) -> Result<String, GatewayError> {
        let id = assign_id(Some(&member.id), MEMBER_ID_PREFIX);
        let mut row = member.clone();
        row.id = id.clone();
        self.gateway
            .invoke("save-member", Some(to_row(&row)))
            .await?;
        Ok(id)
    }

    pub async fn delete_member(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(MEMBERS_SHEET, id).await
    }

    // --- Payments ---

    pub async fn list_payments(&self) -> Vec<Payment> {
        self.list("obtain-payments").await
    }

    pub async fn save_payment(&self, payment: &Payment) -> Result<String, GatewayError> {
        let id = assign_id(Some(&payment.id), PAYMENT_ID_PREFIX);
        let mut row = payment.clone();
        row.id = id.clone();
        self.gateway
            .invoke("save-payment", Some(to_row(&row)))
            .await?;
        Ok(id)
    }

    pub async fn set_payment_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> Result<(), GatewayError> {
        self.gateway
            .invoke(
                "update-payment-status",
                Some(json!({ "id": id, "estado": status.as_str() })),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_payment(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(PAYMENTS_SHEET, id).await
    }

    // --- Training events ---

    pub async fn list_events(&self) -> Vec<TrainingEvent> {
        self.list("obtain-events").await
    }

    pub async fn save_event(&self, event: &TrainingEvent) -> Result<String, GatewayError> {
        let id = assign_id(Some(&event.id), EVENT_ID_PREFIX);
        let mut row = event.clone();
        row.id = id.clone();
        self.gateway.invoke("save-event", Some(to_row(&row))).await?;
        Ok(id)
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(EVENTS_SHEET, id).await
    }

    // --- Attendance ---

    pub async fn list_attendance(&self) -> Vec<AttendanceRecord> {
        self.list("obtain-attendance").await
    }

    /// Submit the full roster for one (category, date) as a single
    /// overwrite unit. The backend upserts by (member id, date).
    pub async fn save_attendance_batch(
        &self,
        records: &[AttendanceRecord],
    ) -> Result<(), GatewayError> {
        let batch = serde_json::to_value(records).unwrap_or(Value::Null);
        self.gateway.invoke("save-attendance", Some(batch)).await?;
        Ok(())
    }

    // --- Helpers ---

    async fn delete_row(&self, sheet: &str, id: &str) -> Result<(), GatewayError> {
        self.gateway
            .invoke("delete-row", Some(json!({ "sheet": sheet, "id": id })))
            .await?;
        Ok(())
    }

    /// Degrading read: any failure logs and comes back empty.
    async fn list<T: DeserializeOwned>(&self, action: &str) -> Vec<T> {
        match self.try_list(action).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(action, error = %err, "read failed; returning empty list");
                Vec::new()
            }
        }
    }

    /// Fetch and decode one sheet. Rows that fail to decode are skipped
    /// individually so one drifted row cannot blank the whole view.
    async fn try_list<T: DeserializeOwned>(&self, action: &str) -> Result<Vec<T>, GatewayError> {
        let value = self.gateway.invoke(action, None).await?;

        let Value::Array(rows) = value else {
            if !value.is_null() {
                warn!(action, "expected an array, got something else");
            }
            return Ok(Vec::new());
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(action, error = %err, "skipping undecodable row");
                    None
                }
            })
            .collect())
    }
}

fn to_row<T: serde::Serialize>(entity: &T) -> Value {
    serde_json::to_value(entity).unwrap_or(Value::Null)
}
