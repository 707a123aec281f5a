use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use rosterly_application::{DirectoryPage, EmployeeProfile};
use rosterly_core::Principal;
use rosterly_domain::EmployeeId;
use uuid::Uuid;

use crate::dto::ListEmployeesQuery;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_employees_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListEmployeesQuery>,
) -> ApiResult<Json<DirectoryPage>> {
    let page = state
        .directory_service
        .list_visible(&principal, query.page, query.page_size)
        .await?;

    Ok(Json(page))
}

pub async fn get_employee_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(employee_id): Path<Uuid>,
) -> ApiResult<Json<EmployeeProfile>> {
    let profile = state
        .directory_service
        .get_one(&principal, EmployeeId::from_uuid(employee_id))
        .await?;

    Ok(Json(profile))
}
