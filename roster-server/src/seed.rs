//! Seed data generator
//!
//! Populates an empty store with synthetic employees for development.
//! Running it against a populated store is a no-op.

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::db::repository::{EmployeeRepository, RepoResult};
use shared::models::EmployeeCreate;
use shared::util::date_to_millis;

/// Default number of records for [`generate_seed_data`]
pub const DEFAULT_SEED_COUNT: usize = 1000;

/// Upper bound (inclusive) for generated salaries
pub const MAX_SEED_SALARY: i64 = 1_000_000;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Bruno", "Chen", "Clara", "Diego", "Elena", "Farah", "Grace",
    "Hiro", "Ingrid", "Jamal", "Kofi", "Lena", "Mateo", "Nadia", "Omar", "Priya", "Quinn",
    "Rosa", "Sven", "Tariq", "Uma", "Victor", "Wen", "Ximena", "Yusuf", "Zara", "Linus",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Baptiste", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hopper",
    "Ibrahim", "Jensen", "Kowalski", "Lovelace", "Moreau", "Nakamura", "Okafor", "Petrov",
    "Quintero", "Rossi", "Sato", "Turing", "Underwood", "Varga", "Weber", "Xu", "Yamada",
    "Zimmermann",
];

/// Job titles double as department labels
const JOB_TITLES: &[&str] = &[
    "Accountant",
    "Data Analyst",
    "Designer",
    "Engineer",
    "HR Specialist",
    "Legal Counsel",
    "Marketing Manager",
    "Operations Manager",
    "Product Manager",
    "Recruiter",
    "Sales Representative",
    "Support Agent",
];

/// Result of a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held records; nothing was written
    Skipped { existing: i64 },
    /// This many records were inserted
    Inserted(usize),
}

/// Seed `count` random employees if the store is empty
pub async fn generate_seed_data(repo: &EmployeeRepository, count: usize) -> RepoResult<SeedOutcome> {
    let existing = repo.count().await?;
    if existing > 0 {
        return Ok(skipped(existing));
    }

    let records = {
        let mut rng = rand::thread_rng();
        generate_records(count, today(), &mut rng)
    };
    insert_if_empty(repo, &records).await
}

/// Same as [`generate_seed_data`], drawing from the given RNG
pub async fn generate_seed_data_with_rng<R: Rng + ?Sized>(
    repo: &EmployeeRepository,
    count: usize,
    rng: &mut R,
) -> RepoResult<SeedOutcome> {
    let existing = repo.count().await?;
    if existing > 0 {
        return Ok(skipped(existing));
    }

    let records = generate_records(count, today(), rng);
    insert_if_empty(repo, &records).await
}

async fn insert_if_empty(
    repo: &EmployeeRepository,
    records: &[EmployeeCreate],
) -> RepoResult<SeedOutcome> {
    // a concurrent writer may have populated the store since the count
    match repo.create_many_if_empty(records).await? {
        Some(inserted) => {
            tracing::info!(inserted, "Seed data generated");
            Ok(SeedOutcome::Inserted(inserted))
        }
        None => {
            let existing = repo.count().await?;
            Ok(skipped(existing))
        }
    }
}

fn skipped(existing: i64) -> SeedOutcome {
    tracing::info!(existing, "Store already populated, skipping seed data");
    SeedOutcome::Skipped { existing }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn hire_date_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Build `count` random records with hire dates between 2020-01-01 and `today`
pub fn generate_records<R: Rng + ?Sized>(
    count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<EmployeeCreate> {
    let epoch = hire_date_epoch();
    let span_days = u64::try_from((today - epoch).num_days()).unwrap_or(0);

    (0..count)
        .map(|_| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
            let department = JOB_TITLES.choose(rng).copied().unwrap_or("Engineer");
            let salary = rng.gen_range(0..=MAX_SEED_SALARY);
            let hired = epoch
                .checked_add_days(Days::new(rng.gen_range(0..=span_days)))
                .unwrap_or(epoch);

            EmployeeCreate::new(
                format!("{first} {last}"),
                department,
                salary,
                date_to_millis(hired),
            )
        })
        .collect()
}
