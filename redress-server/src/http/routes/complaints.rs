//! Complaint routes
//!
//! One resource, three methods:
//! - GET /complaints: every complaint, most recent first
//! - POST /complaints: file a new complaint (starts pending)
//! - PUT /complaints: patch status and/or staff response by id
//!
//! Anything else on the path is a 405. Preflight OPTIONS never reaches
//! these handlers; the CORS layer answers it.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::repos::ComplaintRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Complaint, ComplaintPatch, NewComplaint, ValidationError};

/// POST /complaints request body.
///
/// Fields default to empty so a missing required field reports as a
/// validation error (400) rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateComplaintRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub photo: String,
}

/// PUT /complaints request body.
///
/// `response` is a double Option: absent leaves the column alone,
/// explicit null clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateComplaintRequest {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub response: Option<Option<String>>,
}

/// Keep the outer Some for fields present in the JSON.
///
/// Plain `Option<Option<T>>` collapses null and absent to `None`; this
/// only runs when the key exists, so absent stays `None` via the field
/// default while null becomes `Some(None)`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Complaint as returned by list and create.
///
/// `date` is the filing day (YYYY-MM-DD) derived from created_at. The
/// staff response is not exposed here.
#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub photo: String,
    pub date: String,
}

impl From<Complaint> for ComplaintResponse {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            kind: c.kind,
            status: c.status,
            photo: c.photo,
            date: c.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Complaint as returned by update, staff response included (null until
/// one is attached).
#[derive(Debug, Serialize)]
pub struct UpdatedComplaintResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub photo: String,
    pub response: Option<String>,
    pub date: String,
}

impl From<Complaint> for UpdatedComplaintResponse {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            kind: c.kind,
            status: c.status,
            photo: c.photo,
            response: c.response,
            date: c.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// GET /complaints
async fn list_complaints(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ComplaintResponse>>, ApiError> {
    let complaints = ComplaintRepo::new(&state.pool).list().await?;
    Ok(Json(
        complaints
            .into_iter()
            .map(ComplaintResponse::from)
            .collect(),
    ))
}

/// POST /complaints
async fn create_complaint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<(StatusCode, Json<ComplaintResponse>), ApiError> {
    let draft = NewComplaint::new(&req.title, &req.description, &req.kind, req.photo)?;
    let complaint = ComplaintRepo::new(&state.pool).create(draft).await?;

    Ok((StatusCode::CREATED, Json(ComplaintResponse::from(complaint))))
}

/// PUT /complaints
async fn update_complaint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateComplaintRequest>,
) -> Result<Json<UpdatedComplaintResponse>, ApiError> {
    let id = require_id(req.id)?;
    let patch = patch_from(req);

    let complaint = ComplaintRepo::new(&state.pool).update(id, patch).await?;
    Ok(Json(UpdatedComplaintResponse::from(complaint)))
}

/// Validate the id of an update request.
/// 0 is never a persisted row id; treat it like a missing one.
fn require_id(id: Option<i32>) -> Result<i32, ValidationError> {
    id.filter(|&id| id != 0)
        .ok_or(ValidationError::Missing { field: "id" })
}

/// Shape the wire request into a patch.
/// An empty status string counts as not supplied.
fn patch_from(req: UpdateComplaintRequest) -> ComplaintPatch {
    ComplaintPatch {
        status: req.status.filter(|s| !s.is_empty()),
        response: req.response,
    }
}

/// Any other method on the resource.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Complaint routes
pub fn router() -> Router<Arc<AppState>> {
    // get() would otherwise answer HEAD with the list handler; the
    // method table stops at GET, POST, PUT and preflight OPTIONS.
    Router::new().route(
        "/complaints",
        get(list_complaints)
            .post(create_complaint)
            .put(update_complaint)
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use sqlx::PgPool;
    use tower::ServiceExt;

    fn sample() -> Complaint {
        let filed = Utc.with_ymd_and_hms(2025, 10, 8, 14, 30, 0).unwrap();
        Complaint {
            id: 7,
            title: "Pothole".into(),
            description: "Large hole on Main St".into(),
            kind: "road".into(),
            status: "pending".into(),
            photo: String::new(),
            response: None,
            created_at: filed,
            updated_at: filed,
        }
    }

    #[test]
    fn create_request_fills_absent_fields_with_empty() {
        let req: CreateComplaintRequest = serde_json::from_str(r#"{"title": "Pothole"}"#).unwrap();
        assert_eq!(req.title, "Pothole");
        assert_eq!(req.description, "");
        assert_eq!(req.kind, "");
        assert_eq!(req.photo, "");
    }

    #[test]
    fn create_request_reads_type_key() {
        let req: CreateComplaintRequest = serde_json::from_str(
            r#"{"title": "Pothole", "description": "hole", "type": "road", "photo": "img"}"#,
        )
        .unwrap();
        assert_eq!(req.kind, "road");
        assert_eq!(req.photo, "img");
    }

    #[test]
    fn create_request_has_no_status_to_smuggle() {
        // New complaints always start pending; a status key in the body
        // is ignored.
        let req: CreateComplaintRequest = serde_json::from_str(
            r#"{"title": "t", "description": "d", "type": "road", "status": "resolved"}"#,
        )
        .unwrap();
        assert_eq!(req.title, "t");
    }

    #[test]
    fn update_request_distinguishes_null_from_absent() {
        let absent: UpdateComplaintRequest = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(absent.response, None);

        let null: UpdateComplaintRequest =
            serde_json::from_str(r#"{"id": 1, "response": null}"#).unwrap();
        assert_eq!(null.response, Some(None));

        let set: UpdateComplaintRequest =
            serde_json::from_str(r#"{"id": 1, "response": "Crew dispatched"}"#).unwrap();
        assert_eq!(set.response, Some(Some("Crew dispatched".to_string())));
    }

    #[test]
    fn update_request_decodes_without_id() {
        let req: UpdateComplaintRequest =
            serde_json::from_str(r#"{"status": "resolved"}"#).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.status.as_deref(), Some("resolved"));
    }

    #[test]
    fn update_requires_id() {
        assert!(require_id(None).is_err());
        assert!(require_id(Some(0)).is_err());
        assert_eq!(require_id(Some(7)), Ok(7));
    }

    #[test]
    fn empty_status_counts_as_absent() {
        let req: UpdateComplaintRequest =
            serde_json::from_str(r#"{"id": 1, "status": ""}"#).unwrap();
        let patch = patch_from(req);
        assert_eq!(patch.status, None);

        let req: UpdateComplaintRequest =
            serde_json::from_str(r#"{"id": 1, "status": "resolved", "response": null}"#).unwrap();
        let patch = patch_from(req);
        assert_eq!(patch.status.as_deref(), Some("resolved"));
        assert_eq!(patch.response, Some(None));
    }

    #[test]
    fn list_shape_omits_response() {
        let value = serde_json::to_value(ComplaintResponse::from(sample())).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["date", "description", "id", "photo", "status", "title", "type"]
        );
    }

    #[test]
    fn empty_list_is_an_empty_json_array() {
        let rows: Vec<ComplaintResponse> = Vec::new();
        assert_eq!(serde_json::to_value(rows).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn update_shape_includes_response_even_when_null() {
        let value = serde_json::to_value(UpdatedComplaintResponse::from(sample())).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("response"));
        assert!(obj["response"].is_null());
    }

    #[test]
    fn date_is_filing_day() {
        let value = serde_json::to_value(ComplaintResponse::from(sample())).unwrap();
        assert_eq!(value["date"], "2025-10-08");
        assert_eq!(value["type"], "road");
    }

    #[tokio::test]
    async fn head_and_delete_are_method_not_allowed() {
        // A lazy pool never connects; the 405 path must not need it.
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let app = router().with_state(Arc::new(AppState { pool }));

        for method in ["HEAD", "DELETE"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/complaints")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{method} /complaints"
            );
        }
    }
}
