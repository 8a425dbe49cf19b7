use super::repository::Origin;
use super::response::Failure;
use super::service::ContactService;
use crate::Contact;
use crate::domain::{
    ApiFailure, INVALID_STATUS_MESSAGE, InquiryEnvelope, InquiryPageEnvelope, ListParams,
    NewInquiry, Paging, RECEIVED_MESSAGE, StatusUpdate, SubmitReceipt, VALIDATION_MESSAGE,
};
use crate::error::ContactError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use folio_derive::api_handler;
use folio_domain::constants::CONTACT_TAG;
use folio_kernel::server::{ApiState, ClientMeta};
use tracing::error;

const SUBMIT_FAILED: &str = "Failed to send message. Please try again later.";
const LIST_FAILED: &str = "Failed to fetch contacts";
const FETCH_FAILED: &str = "Failed to fetch contact";
const UPDATE_FAILED: &str = "Failed to update contact";

fn service<'a>(
    state: &'a ApiState,
    internal_message: &'static str,
) -> Result<&'a ContactService, Failure> {
    state.try_get_slice::<Contact>().map(|contact| &contact.service).map_err(|e| {
        error!(error = %e, "Contact slice is not registered");
        Failure::new(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
    })
}

#[api_handler(
    post,
    path = "/contact",
    request_body = NewInquiry,
    responses(
        (status = CREATED, description = "Inquiry stored", body = SubmitReceipt),
        (status = BAD_REQUEST, description = "Missing or invalid fields", body = ApiFailure),
        (status = TOO_MANY_REQUESTS, description = "Submission limit reached", body = ApiFailure),
        (status = INTERNAL_SERVER_ERROR, description = "Storage failure", body = ApiFailure),
    ),
    tag = CONTACT_TAG,
)]
pub(super) async fn submit_handler(
    State(state): State<ApiState>,
    meta: ClientMeta,
    payload: Result<Json<NewInquiry>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitReceipt>), Failure> {
    let Json(submission) = payload.map_err(|rejection| {
        let err = ContactError::Validation {
            message: VALIDATION_MESSAGE.into(),
            errors: vec![rejection.body_text()],
            context: None,
        };
        Failure::from_error(err, SUBMIT_FAILED)
    })?;

    let origin = Origin {
        ip: (!meta.ip.is_unspecified()).then(|| meta.ip.to_string()),
        agent: meta.user_agent,
    };

    let inquiry = service(&state, SUBMIT_FAILED)?
        .submit(submission, origin)
        .await
        .map_err(|e| Failure::from_error(e, SUBMIT_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitReceipt {
            success: true,
            message: RECEIVED_MESSAGE.to_owned(),
            contact_id: inquiry.id,
        }),
    ))
}

#[api_handler(
    get,
    path = "/contact/all",
    params(ListParams),
    responses(
        (status = OK, description = "One page of inquiries, newest first", body = InquiryPageEnvelope),
        (status = BAD_REQUEST, description = "Invalid status filter", body = ApiFailure),
        (status = INTERNAL_SERVER_ERROR, description = "Storage failure", body = ApiFailure),
    ),
    tag = CONTACT_TAG,
)]
pub(super) async fn list_handler(
    State(state): State<ApiState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<InquiryPageEnvelope>, Failure> {
    let Query(params) = params.map_err(|rejection| {
        Failure::new(StatusCode::BAD_REQUEST, format!("Invalid query: {}", rejection.body_text()))
    })?;

    let page = service(&state, LIST_FAILED)?
        .list(params.status.as_deref(), Paging::new(params.page, params.limit))
        .await
        .map_err(|e| Failure::from_error(e, LIST_FAILED))?;

    Ok(Json(InquiryPageEnvelope { success: true, data: page }))
}

#[api_handler(
    get,
    path = "/contact/{id}",
    params(("id" = String, Path, description = "Inquiry key")),
    responses(
        (status = OK, description = "The inquiry", body = InquiryEnvelope),
        (status = NOT_FOUND, description = "No such inquiry", body = ApiFailure),
        (status = INTERNAL_SERVER_ERROR, description = "Storage failure", body = ApiFailure),
    ),
    tag = CONTACT_TAG,
)]
pub(super) async fn get_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<InquiryEnvelope>, Failure> {
    let inquiry = service(&state, FETCH_FAILED)?
        .get(&id)
        .await
        .map_err(|e| Failure::from_error(e, FETCH_FAILED))?;

    Ok(Json(InquiryEnvelope { success: true, data: inquiry }))
}

#[api_handler(
    patch,
    path = "/contact/{id}/status",
    params(("id" = String, Path, description = "Inquiry key")),
    request_body = StatusUpdate,
    responses(
        (status = OK, description = "Updated inquiry", body = InquiryEnvelope),
        (status = BAD_REQUEST, description = "Status outside new|read|replied", body = ApiFailure),
        (status = NOT_FOUND, description = "No such inquiry", body = ApiFailure),
        (status = INTERNAL_SERVER_ERROR, description = "Storage failure", body = ApiFailure),
    ),
    tag = CONTACT_TAG,
)]
pub(super) async fn update_status_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<InquiryEnvelope>, Failure> {
    let Json(update) =
        payload.map_err(|_| Failure::new(StatusCode::BAD_REQUEST, INVALID_STATUS_MESSAGE))?;

    let inquiry = service(&state, UPDATE_FAILED)?
        .update_status(&id, update.status.as_deref())
        .await
        .map_err(|e| Failure::from_error(e, UPDATE_FAILED))?;

    Ok(Json(InquiryEnvelope { success: true, data: inquiry }))
}
