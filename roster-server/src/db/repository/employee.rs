//! Employee Repository
//!
//! Every write validates against `shared::models::employee` before any SQL
//! runs. Lookups by name or department return all matches.

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::now_millis;
use sqlx::{Sqlite, SqlitePool, Transaction};

const EMPLOYEE_SELECT: &str = "SELECT id, name, department, salary, hire_date FROM employee";

/// Default N for the top-earners / last-hired rankings
pub const DEFAULT_RANKING_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ── Writes ──

    /// Insert a new employee; the store assigns the id
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        data.validate(now_millis())?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO employee (name, department, salary, hire_date) VALUES (?1, ?2, ?3, ?4) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.department)
        .bind(data.salary)
        .bind(data.hire_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, department = %data.department, "Employee created");
        Ok(data.into_employee(id))
    }

    /// Persist the current field values of an existing employee
    pub async fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        employee.validate(now_millis())?;

        let rows = sqlx::query(
            "UPDATE employee SET name = ?1, department = ?2, salary = ?3, hire_date = ?4 WHERE id = ?5",
        )
        .bind(&employee.name)
        .bind(&employee.department)
        .bind(employee.salary)
        .bind(employee.hire_date)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;

        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(employee.id));
        }
        Ok(employee.clone())
    }

    /// Partial update: unspecified fields keep their stored values
    pub async fn update(&self, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
        let mut employee = self.find_by_id(id).await?.ok_or(RepoError::NotFound(id))?;
        employee.apply(data);
        self.save(&employee).await
    }

    /// Delete by id. Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let deleted = rows.rows_affected() > 0;
        if deleted {
            tracing::debug!(id, "Employee deleted");
        }
        Ok(deleted)
    }

    /// Insert a batch in one transaction. Nothing is written if any record
    /// fails validation.
    pub async fn create_many(&self, data: &[EmployeeCreate]) -> RepoResult<usize> {
        let now = now_millis();
        for record in data {
            record.validate(now)?;
        }

        let mut tx = self.pool.begin().await?;
        insert_all(&mut tx, data).await?;
        tx.commit().await?;
        Ok(data.len())
    }

    /// Same as [`create_many`](Self::create_many), but only when the table
    /// is empty. The emptiness check and the inserts share one transaction.
    ///
    /// Returns `None` (and writes nothing) when records already exist.
    pub async fn create_many_if_empty(&self, data: &[EmployeeCreate]) -> RepoResult<Option<usize>> {
        let now = now_millis();
        for record in data {
            record.validate(now)?;
        }

        // Write lock before the count: a concurrent caller waits on
        // busy_timeout, then sees the rows instead of failing to upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        insert_all(&mut tx, data).await?;
        tx.commit().await?;
        Ok(Some(data.len()))
    }

    // ── Reads ──

    /// All employees, ordered by id
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!("{EMPLOYEE_SELECT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!("{EMPLOYEE_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    /// Every employee with exactly this name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Vec<Employee>> {
        let employees =
            sqlx::query_as::<_, Employee>(&format!("{EMPLOYEE_SELECT} WHERE name = ? ORDER BY id"))
                .bind(name)
                .fetch_all(&self.pool)
                .await?;
        Ok(employees)
    }

    /// Every member of a department
    pub async fn find_by_department(&self, department: &str) -> RepoResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "{EMPLOYEE_SELECT} WHERE department = ? ORDER BY id"
        ))
        .bind(department)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    /// Distinct department labels, sorted
    pub async fn list_departments(&self) -> RepoResult<Vec<String>> {
        let departments: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT department FROM employee ORDER BY department")
                .fetch_all(&self.pool)
                .await?;
        Ok(departments)
    }

    /// Mean salary of a department, rounded to 2 decimals.
    ///
    /// `None` when the department has no members.
    pub async fn average_salary(&self, department: &str) -> RepoResult<Option<f64>> {
        // AVG over zero rows is NULL in SQL, never a division fault
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(salary) FROM employee WHERE department = ?")
                .bind(department)
                .fetch_one(&self.pool)
                .await?;
        Ok(avg.map(|v| (v * 100.0).round() / 100.0))
    }

    /// Top `n` by salary, highest first; ties keep insertion order
    pub async fn top_earners(&self, n: u32) -> RepoResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "{EMPLOYEE_SELECT} ORDER BY salary DESC, id ASC LIMIT ?"
        ))
        .bind(i64::from(n))
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    /// Latest `n` hires, most recent first; ties keep insertion order
    pub async fn last_hired(&self, n: u32) -> RepoResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "{EMPLOYEE_SELECT} ORDER BY hire_date DESC, id ASC LIMIT ?"
        ))
        .bind(i64::from(n))
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

async fn insert_all(tx: &mut Transaction<'_, Sqlite>, data: &[EmployeeCreate]) -> RepoResult<()> {
    for record in data {
        sqlx::query(
            "INSERT INTO employee (name, department, salary, hire_date) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&record.name)
        .bind(&record.department)
        .bind(record.salary)
        .bind(record.hire_date)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
