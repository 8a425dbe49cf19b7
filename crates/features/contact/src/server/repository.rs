use crate::domain::{Inquiry, InquiryStatus, Paging, ValidInquiry};
use chrono::{DateTime, SecondsFormat, Utc};
use folio_database::{Database, DatabaseError, DatabaseErrorExt};
use folio_kernel::domain::constants::INQUIRY;
use folio_kernel::safe_nanoid;
use surrealdb::types::SurrealValue;
use tracing::instrument;

/// Table and unique key index; safe to apply on every start.
pub const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS inquiry SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS inquiry_uid ON inquiry FIELDS uid UNIQUE;
    DEFINE INDEX IF NOT EXISTS inquiry_submitted ON inquiry FIELDS submitted_at;
";

const PROJECTION: &str = "uid, name, email, phone, subject, message, status, submitted_at, \
                          updated_at, source_ip, source_agent";

/// Origin of a submission as recorded next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    pub ip: Option<String>,
    pub agent: Option<String>,
}

/// Stored shape of an inquiry. Optional values are kept as empty strings and
/// timestamps as RFC 3339 text with millisecond precision, which sorts chronologically.
#[derive(Debug, Clone, SurrealValue)]
struct InquiryRow {
    uid: String,
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    status: String,
    submitted_at: String,
    updated_at: String,
    source_ip: String,
    source_agent: String,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: i64,
}

impl TryFrom<InquiryRow> for Inquiry {
    type Error = DatabaseError;

    fn try_from(row: InquiryRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<InquiryStatus>()
            .map_err(|_| format!("Stored inquiry {} has unknown status '{}'", row.uid, row.status))?;

        Ok(Self {
            status,
            submitted_at: parse_timestamp(&row.uid, &row.submitted_at)?,
            updated_at: parse_timestamp(&row.uid, &row.updated_at)?,
            id: row.uid,
            name: row.name,
            email: row.email,
            phone: non_empty(row.phone),
            subject: row.subject,
            message: row.message,
            source_ip: non_empty(row.source_ip),
            source_agent: non_empty(row.source_agent),
        })
    }
}

fn parse_timestamp(uid: &str, value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("Stored inquiry {uid} has a malformed timestamp: {e}").into())
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// `SurrealDB` access for the `inquiry` table.
#[derive(Debug, Clone)]
pub struct InquiryRepository {
    db: Database,
}

impl InquiryRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a validated submission with status `new` and returns the stored record.
    #[instrument(skip_all)]
    pub async fn create(
        &self,
        inquiry: ValidInquiry,
        origin: Origin,
    ) -> Result<Inquiry, DatabaseError> {
        let uid = safe_nanoid!();
        let now = format_timestamp(Utc::now());

        let mut response = self
            .db
            .query(format!(
                "CREATE {INQUIRY} SET uid = $uid, name = $name, email = $email, phone = $phone, \
                 subject = $subject, message = $message, status = $status, \
                 submitted_at = $now, updated_at = $now, source_ip = $source_ip, \
                 source_agent = $source_agent RETURN NONE;
                 SELECT {PROJECTION} FROM {INQUIRY} WHERE uid = $uid LIMIT 1;"
            ))
            .bind(("uid", uid.clone()))
            .bind(("name", inquiry.name))
            .bind(("email", inquiry.email))
            .bind(("phone", inquiry.phone.unwrap_or_default()))
            .bind(("subject", inquiry.subject))
            .bind(("message", inquiry.message))
            .bind(("status", InquiryStatus::New.to_string()))
            .bind(("now", now))
            .bind(("source_ip", origin.ip.unwrap_or_default()))
            .bind(("source_agent", origin.agent.unwrap_or_default()))
            .await
            .context("Creating inquiry")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Creating inquiry")?;

        let row = response
            .take::<Vec<InquiryRow>>(1)
            .context("Reading created inquiry")?
            .into_iter()
            .next()
            .ok_or_else(|| DatabaseError::Internal {
                message: format!("Inquiry {uid} missing right after creation").into(),
                context: None,
            })?;

        row.try_into()
    }

    #[instrument(skip(self))]
    pub async fn find(&self, uid: &str) -> Result<Option<Inquiry>, DatabaseError> {
        let rows = self
            .db
            .query(format!("SELECT {PROJECTION} FROM {INQUIRY} WHERE uid = $uid LIMIT 1"))
            .bind(("uid", uid.to_owned()))
            .await
            .context("Fetching inquiry")?
            .take::<Vec<InquiryRow>>(0)
            .context("Reading inquiry")?;

        rows.into_iter().next().map(Inquiry::try_from).transpose()
    }

    /// Returns one page of inquiries, newest first, and the total matching count.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        status: Option<InquiryStatus>,
        paging: Paging,
    ) -> Result<(Vec<Inquiry>, u64), DatabaseError> {
        let filter = if status.is_some() { "WHERE status = $status" } else { "" };
        let limit = paging.limit;
        let start = paging.offset();

        let mut response = self
            .db
            .query(format!(
                "SELECT {PROJECTION} FROM {INQUIRY} {filter} \
                 ORDER BY submitted_at DESC LIMIT {limit} START {start};
                 SELECT count() AS total FROM {INQUIRY} {filter} GROUP ALL;"
            ))
            .bind(("status", status.map(|s| s.to_string()).unwrap_or_default()))
            .await
            .context("Listing inquiries")?;

        let rows = response.take::<Vec<InquiryRow>>(0).context("Reading inquiry page")?;
        let total = response
            .take::<Vec<CountRow>>(1)
            .context("Counting inquiries")?
            .first()
            .map_or(0, |row| row.total.unsigned_abs());

        let contacts = rows.into_iter().map(Inquiry::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok((contacts, total))
    }

    /// Sets the status and refreshes `updated_at`. Returns `None` when no record matches.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        uid: &str,
        status: InquiryStatus,
    ) -> Result<Option<Inquiry>, DatabaseError> {
        let rows = self
            .db
            .query(format!(
                "UPDATE {INQUIRY} SET status = $status, updated_at = $now WHERE uid = $uid \
                 RETURN NONE;
                 SELECT {PROJECTION} FROM {INQUIRY} WHERE uid = $uid LIMIT 1;"
            ))
            .bind(("uid", uid.to_owned()))
            .bind(("status", status.to_string()))
            .bind(("now", format_timestamp(Utc::now())))
            .await
            .context("Updating inquiry status")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Updating inquiry status")?
            .take::<Vec<InquiryRow>>(1)
            .context("Reading updated inquiry")?;

        rows.into_iter().next().map(Inquiry::try_from).transpose()
    }
}
