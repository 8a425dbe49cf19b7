use super::notifier::{Delivery, Notifier};
use super::repository::{InquiryRepository, Origin};
use crate::domain::{Inquiry, InquiryPage, NewInquiry, Paging, parse_status};
use crate::error::{ContactError, ContactErrorExt};
use folio_kernel::domain::constants::INQUIRY;
use folio_kernel::security::resource::ResourceGuard;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Inquiry intake and administration.
#[derive(Debug, Clone)]
pub struct ContactService {
    repository: InquiryRepository,
    notifier: Arc<dyn Notifier>,
    require_phone: bool,
}

impl ContactService {
    #[must_use]
    pub fn new(
        repository: InquiryRepository,
        notifier: Arc<dyn Notifier>,
        require_phone: bool,
    ) -> Self {
        Self { repository, notifier, require_phone }
    }

    /// Validates, normalises and stores a submission, then notifies the owner.
    ///
    /// A notification failure is logged and does not fail the submission.
    ///
    /// # Errors
    /// [`ContactError::Validation`] for a bad payload, [`ContactError::Storage`] when the
    /// record cannot be written.
    #[instrument(skip_all, fields(ip = ?origin.ip))]
    pub async fn submit(
        &self,
        submission: NewInquiry,
        origin: Origin,
    ) -> Result<Inquiry, ContactError> {
        let valid = submission.validate(self.require_phone)?;
        let inquiry = self.repository.create(valid, origin).await.context("Storing inquiry")?;
        info!(inquiry = %inquiry.id, "Inquiry received");

        match self.notifier.notify(&inquiry).await {
            Ok(Delivery::Sent { id }) => debug!(inquiry = %inquiry.id, message = %id, "Owner notified"),
            Ok(Delivery::Skipped) => {},
            Err(e) => warn!(inquiry = %inquiry.id, error = %e, "Notification failed"),
        }

        Ok(inquiry)
    }

    /// # Errors
    /// [`ContactError::InvalidStatus`] for an unknown status filter,
    /// [`ContactError::Storage`] on read failures.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        status: Option<&str>,
        paging: Paging,
    ) -> Result<InquiryPage, ContactError> {
        let status = status.map(|value| parse_status(Some(value))).transpose()?;
        let (contacts, total) =
            self.repository.list(status, paging).await.context("Listing inquiries")?;

        Ok(InquiryPage {
            contacts,
            current_page: paging.page,
            total_pages: paging.total_pages(total),
            total_contacts: total,
        })
    }

    /// # Errors
    /// [`ContactError::NotFound`] for unknown or malformed ids,
    /// [`ContactError::Storage`] on read failures.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Inquiry, ContactError> {
        let uid = checked_id(id)?;
        self.repository
            .find(&uid)
            .await
            .context("Fetching inquiry")?
            .ok_or_else(|| not_found(id))
    }

    /// Sets a new status. The value is checked before the record is looked up, so an
    /// invalid value never touches storage.
    ///
    /// # Errors
    /// [`ContactError::InvalidStatus`], [`ContactError::NotFound`] or
    /// [`ContactError::Storage`].
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
    ) -> Result<Inquiry, ContactError> {
        let status = parse_status(status)?;
        let uid = checked_id(id)?;

        let updated = self
            .repository
            .update_status(&uid, status)
            .await
            .context("Updating inquiry status")?
            .ok_or_else(|| not_found(id))?;
        info!(inquiry = %updated.id, status = %updated.status, "Inquiry status updated");

        Ok(updated)
    }
}

fn checked_id(id: &str) -> Result<String, ContactError> {
    ResourceGuard::verify(id, INQUIRY).map_err(|e| {
        debug!(error = %e, "Rejected inquiry id");
        not_found(id)
    })
}

fn not_found(id: &str) -> ContactError {
    ContactError::NotFound { message: id.to_owned().into(), context: None }
}
