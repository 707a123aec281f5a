//! Development-only seed data: a handful of accounts and employee records
//! spanning two departments and the full rank ladder.

use rosterly_application::{AccountRecord, PasswordHasher};
use rosterly_core::{AccountRole, AppError, AppResult, SubjectId};
use rosterly_domain::{EmployeeId, EmployeeInput, EmployeeRecord, Hierarchy};
use rosterly_infrastructure::{InMemoryEmployeeRepository, InMemoryUserRepository};
use tracing::info;
use uuid::Uuid;

const DEV_SEED_PASSWORD: &str = "rosterly-dev";

const DEV_SEED_ADMIN_SUBJECT: &str = "a2c8ea5f-4f39-4724-97f5-932f97f54f76";
const DEV_SEED_ADMIN_USERNAME: &str = "admin";

struct SeedEmployee {
    subject: &'static str,
    username: &'static str,
    full_name: &'static str,
    email: &'static str,
    phone: &'static str,
    position: &'static str,
    department: &'static str,
    /// Index into the configured rank ladder; `None` means the most junior
    /// rank.
    rank_index: Option<usize>,
    salary: i64,
}

const DEV_SEED_EMPLOYEES: &[SeedEmployee] = &[
    SeedEmployee {
        subject: "96d11e90-7403-4654-9727-cb1043f8bd31",
        username: "ingrid",
        full_name: "Ingrid Halvorsen",
        email: "ingrid.halvorsen@rosterly.local",
        phone: "+47 915 00 101",
        position: "Head of Engineering",
        department: "Engineering",
        rank_index: Some(0),
        salary: 98_000,
    },
    SeedEmployee {
        subject: "4f1c6a4e-9d7b-4a58-8a3e-2f0f8f0f1f02",
        username: "tomas",
        full_name: "Tomas Berg",
        email: "tomas.berg@rosterly.local",
        phone: "+47 915 00 102",
        position: "Platform Lead",
        department: "Engineering",
        rank_index: Some(1),
        salary: 82_000,
    },
    SeedEmployee {
        subject: "c1d2e3f4-0516-4728-93a4-b5c6d7e8f903",
        username: "marta",
        full_name: "Marta Lindqvist",
        email: "marta.lindqvist@rosterly.local",
        phone: "+47 915 00 103",
        position: "Backend Engineer",
        department: "Engineering",
        rank_index: None,
        salary: 61_000,
    },
    SeedEmployee {
        subject: "7a8b9c0d-1e2f-4a3b-8c4d-5e6f70819204",
        username: "oskar",
        full_name: "Oskar Nyman",
        email: "oskar.nyman@rosterly.local",
        phone: "+47 915 00 104",
        position: "Head of Sales",
        department: "Sales",
        rank_index: Some(0),
        salary: 94_000,
    },
    SeedEmployee {
        subject: "0f9e8d7c-6b5a-4493-8271-605f4e3d2c05",
        username: "freja",
        full_name: "Freja Dahl",
        email: "freja.dahl@rosterly.local",
        phone: "+47 915 00 105",
        position: "Account Executive",
        department: "Sales",
        rank_index: None,
        salary: 57_000,
    },
];

/// Seeds the in-memory stores with a small demo organisation.
///
/// Every account shares [`DEV_SEED_PASSWORD`]. The `admin` account has no
/// employee record of its own; the rest map onto the configured hierarchy,
/// with out-of-range rank indices clamped to the most junior rank.
pub async fn run(
    users: &InMemoryUserRepository,
    employees: &InMemoryEmployeeRepository,
    password_hasher: &dyn PasswordHasher,
    hierarchy: &Hierarchy,
) -> AppResult<()> {
    let password_hash = password_hasher.hash_password(DEV_SEED_PASSWORD)?;

    users
        .insert(AccountRecord {
            subject: parse_subject(DEV_SEED_ADMIN_SUBJECT)?,
            username: DEV_SEED_ADMIN_USERNAME.to_owned(),
            password_hash: password_hash.clone(),
            role: AccountRole::Admin,
        })
        .await?;

    let ranks = hierarchy.ranks();
    for seed in DEV_SEED_EMPLOYEES {
        let subject = parse_subject(seed.subject)?;

        users
            .insert(AccountRecord {
                subject,
                username: seed.username.to_owned(),
                password_hash: password_hash.clone(),
                role: AccountRole::User,
            })
            .await?;

        let rank = seed
            .rank_index
            .and_then(|index| ranks.get(index))
            .or_else(|| ranks.last())
            .map(String::as_str)
            .ok_or_else(|| AppError::Internal("hierarchy has no ranks".to_owned()))?;

        let record = EmployeeRecord::new(
            EmployeeInput {
                id: EmployeeId::from_uuid(Uuid::new_v4()),
                owner_subject: subject,
                full_name: seed.full_name.to_owned(),
                email: seed.email.to_owned(),
                phone: seed.phone.to_owned(),
                position: seed.position.to_owned(),
                department: seed.department.to_owned(),
                rank: rank.to_owned(),
                salary: seed.salary,
            },
            hierarchy,
        )?;

        employees.insert(record).await?;
    }

    info!(
        accounts = DEV_SEED_EMPLOYEES.len() + 1,
        "dev seed data loaded"
    );

    Ok(())
}

fn parse_subject(raw: &str) -> AppResult<SubjectId> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|error| AppError::Internal(format!("invalid dev seed subject id: {error}")))?;
    Ok(SubjectId::from_uuid(uuid))
}
