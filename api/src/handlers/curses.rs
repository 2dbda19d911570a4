//! Curse handlers
//!
//! CRUD endpoints for curses. Every response uses the same envelope:
//! `{status, message, data?, meta?}`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::Meta;
use crate::domain::entities::{Curse, CurseFilter, CurseId, DATE_FORMAT};
use crate::domain::ports::CurseRepository;
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a curse
#[derive(Debug, Deserialize)]
pub struct CreateCurseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Request body for a partial update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCurseRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query parameters for listing curses.
///
/// `limit` and `page` are kept as raw strings; anything that isn't an
/// integer is treated as not supplied.
#[derive(Debug, Default, Deserialize)]
pub struct ListCursesQuery {
    pub name: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ListCursesQuery {
    fn limit(&self) -> i64 {
        parse_lenient(self.limit.as_deref())
    }

    fn page(&self) -> i64 {
        parse_lenient(self.page.as_deref())
    }
}

fn parse_lenient(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// A curse as returned by the API
#[derive(Debug, Serialize)]
pub struct CurseResponse {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Curse> for CurseResponse {
    fn from(curse: Curse) -> Self {
        Self {
            id: curse.id.to_string(),
            name: curse.name,
            start_date: curse.start_date.format(DATE_FORMAT).to_string(),
            end_date: curse.end_date.format(DATE_FORMAT).to_string(),
            created_at: curse.created_at.to_rfc3339(),
            updated_at: curse.updated_at.to_rfc3339(),
        }
    }
}

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    fn success(status: StatusCode, data: Option<T>, meta: Option<Meta>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                status: status.as_u16(),
                message: "success".to_string(),
                data,
                meta,
            }),
        )
    }
}

type HandlerResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

/// Path ids that aren't UUIDs can't name a stored curse.
fn parse_curse_id(raw: &str) -> Result<CurseId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("curse '{}' not found", raw)))
}

/// POST /curses
///
/// Create a curse. Responds 201 with the stored curse.
pub async fn create_curse<CR: CurseRepository + 'static>(
    State(state): State<AppState<CR>>,
    payload: Result<Json<CreateCurseRequest>, JsonRejection>,
) -> HandlerResult<CurseResponse> {
    let Json(request) = payload?;

    let curse = state
        .curse_service
        .create(&request.name, &request.start_date, &request.end_date)
        .await?;

    Ok(ApiResponse::success(
        StatusCode::CREATED,
        Some(curse.into()),
        None,
    ))
}

/// GET /curses?name=&limit=&page=
///
/// List curses, newest first, with pagination metadata.
pub async fn list_curses<CR: CurseRepository + 'static>(
    State(state): State<AppState<CR>>,
    query: Result<Query<ListCursesQuery>, QueryRejection>,
) -> HandlerResult<Vec<CurseResponse>> {
    let Query(query) = query?;
    let filter = CurseFilter {
        name: query.name.clone(),
    };

    let total = state.curse_service.count(&filter).await?;
    let meta = Meta::new(query.page(), query.limit(), total, &state.paginator);

    let curses = state
        .curse_service
        .get_all(&filter, meta.offset(), meta.limit())
        .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        Some(curses.into_iter().map(CurseResponse::from).collect()),
        Some(meta),
    ))
}

/// GET /curses/:id
pub async fn get_curse<CR: CurseRepository + 'static>(
    State(state): State<AppState<CR>>,
    path: Result<Path<String>, PathRejection>,
) -> HandlerResult<CurseResponse> {
    let Path(id) = path?;
    let id = parse_curse_id(&id)?;
    let curse = state.curse_service.get_by_id(&id).await?;

    Ok(ApiResponse::success(StatusCode::OK, Some(curse.into()), None))
}

/// PATCH /curses/:id
///
/// Partially update a curse. Only the fields present in the body change.
pub async fn update_curse<CR: CurseRepository + 'static>(
    State(state): State<AppState<CR>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateCurseRequest>, JsonRejection>,
) -> HandlerResult<()> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let id = parse_curse_id(&id)?;

    state
        .curse_service
        .update(
            &id,
            request.name.as_deref(),
            request.start_date.as_deref(),
            request.end_date.as_deref(),
        )
        .await?;

    Ok(ApiResponse::success(StatusCode::OK, None, None))
}

/// DELETE /curses/:id
pub async fn delete_curse<CR: CurseRepository + 'static>(
    State(state): State<AppState<CR>>,
    path: Result<Path<String>, PathRejection>,
) -> HandlerResult<()> {
    let Path(id) = path?;
    let id = parse_curse_id(&id)?;
    state.curse_service.delete(&id).await?;

    Ok(ApiResponse::success(StatusCode::OK, None, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn parse_create_request_missing_fields_default_to_empty() {
        let request: CreateCurseRequest = serde_json::from_str(r#"{"name": "Algebra"}"#).unwrap();
        assert_eq!(request.name, "Algebra");
        assert_eq!(request.start_date, "");
        assert_eq!(request.end_date, "");
    }

    #[test]
    fn parse_update_request_distinguishes_absent_from_empty() {
        let request: UpdateCurseRequest =
            serde_json::from_str(r#"{"name": "", "end_date": "2024-01-01"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some(""));
        assert_eq!(request.start_date, None);
        assert_eq!(request.end_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn list_query_ignores_non_numeric_paging() {
        let query = ListCursesQuery {
            name: None,
            limit: Some("abc".to_string()),
            page: Some(" 3 ".to_string()),
        };
        assert_eq!(query.limit(), 0);
        assert_eq!(query.page(), 3);
        assert_eq!(ListCursesQuery::default().page(), 0);
    }

    #[test]
    fn duplicate_query_parameter_is_bad_request() {
        let uri = "/curses?name=alg&name=bio".parse().unwrap();
        let rejection = Query::<ListCursesQuery>::try_from_uri(&uri).unwrap_err();

        let err = AppError::from(rejection);
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.starts_with("invalid query")));
        assert_eq!(
            axum::response::IntoResponse::into_response(err).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn parse_curse_id_rejects_non_uuid_as_not_found() {
        assert!(matches!(
            parse_curse_id("42"),
            Err(AppError::NotFound(_))
        ));
        assert!(parse_curse_id(&Uuid::nil().to_string()).is_ok());
    }

    #[test]
    fn serialize_curse_response_uses_plain_dates() {
        let curse = Curse {
            id: CurseId(Uuid::nil()),
            name: "Algebra".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(CurseResponse::from(curse)).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["end_date"], "2024-06-01");
        assert_eq!(json["created_at"], "2024-01-01T12:00:00+00:00");
    }

    #[test]
    fn envelope_omits_absent_data_and_meta() {
        let (status, Json(body)) = ApiResponse::<()>::success(StatusCode::OK, None, None);
        assert_eq!(status, StatusCode::OK);

        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"status":200,"message":"success"}"#);
    }
}
