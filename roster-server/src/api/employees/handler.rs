//! Employee API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::employee::DEFAULT_RANKING_LIMIT;
use shared::error::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AverageSalaryResponse {
    pub department: String,
    /// `null` when the department has no members
    pub average_salary: Option<f64>,
}

// Extractor rejections become 400s with the uniform error body

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

fn path_param<T>(param: Result<Path<T>, PathRejection>) -> AppResult<T> {
    param
        .map(|Path(value)| value)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(value)| value)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.employees().find_all().await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Employee>> {
    let id = path_param(id)?;
    let employee = state
        .employees()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::employee_not_found(id))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let payload = json_body(payload)?;
    let employee = state.employees().create(payload).await?;
    tracing::info!(id = employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee; omitted fields are left unchanged
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> AppResult<Json<Employee>> {
    let id = path_param(id)?;
    let payload = json_body(payload)?;
    if payload.is_empty() {
        return Err(AppError::invalid_request("No fields to update"));
    }
    let employee = state.employees().update(id, payload).await?;
    Ok(Json(employee))
}

/// Delete an employee. Responds `false` when it did not exist.
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<bool>> {
    let id = path_param(id)?;
    let deleted = state.employees().delete(id).await?;
    if deleted {
        tracing::info!(id, "Employee deleted");
    }
    Ok(Json(deleted))
}

/// All employees with exactly this name
pub async fn search_by_name(
    State(state): State<ServerState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let NameQuery { name } = query_params(query)?;
    let employees = state.employees().find_by_name(&name).await?;
    Ok(Json(employees))
}

pub async fn list_departments(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let departments = state.employees().list_departments().await?;
    Ok(Json(departments))
}

pub async fn list_by_department(
    State(state): State<ServerState>,
    department: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let department = path_param(department)?;
    let employees = state.employees().find_by_department(&department).await?;
    Ok(Json(employees))
}

pub async fn average_salary(
    State(state): State<ServerState>,
    department: Result<Path<String>, PathRejection>,
) -> AppResult<Json<AverageSalaryResponse>> {
    let department = path_param(department)?;
    let average_salary = state.employees().average_salary(&department).await?;
    Ok(Json(AverageSalaryResponse {
        department,
        average_salary,
    }))
}

/// Highest paid first, `limit` defaults to 10
pub async fn top_earners(
    State(state): State<ServerState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let limit = query_params(query)?.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    let employees = state.employees().top_earners(limit).await?;
    Ok(Json(employees))
}

/// Most recent hires first, `limit` defaults to 10
pub async fn recent_hires(
    State(state): State<ServerState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Employee>>> {
    let limit = query_params(query)?.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    let employees = state.employees().last_hired(limit).await?;
    Ok(Json(employees))
}
