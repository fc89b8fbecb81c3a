//! Server-side bodies of the provider server functions.
//!
//! Each function takes the request's session and answers from PostgreSQL.
//! Callers may only read and write their own rows; admins may read anyone's.

use sqlx::PgPool;
use store::{AppConfig, Principal, Profile, Role, RoleAssignment, SignUpFields};
use tower_sessions::Session;
use uuid::Uuid;

use crate::auth::{self, session_user_id, SESSION_USER_ID_KEY};
use crate::db::get_pool;
use crate::error::ProviderError;
use crate::models::{Account, AuthReply, ProfileRow};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";
const ALREADY_REGISTERED: &str = "User already registered";

async fn pool() -> Result<&'static PgPool, ProviderError> {
    Ok(get_pool().await?)
}

fn parse_id(id: &str) -> Result<Uuid, ProviderError> {
    Uuid::parse_str(id).map_err(|_| ProviderError::InvalidId(id.to_string()))
}

async fn load_role(pool: &PgPool, user_id: Uuid) -> Result<Option<Role>, ProviderError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT role FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(role,)| role.parse()).transpose()?)
}

/// The session's principal id, or `NotAuthenticated`.
async fn require_user(session: &Session) -> Result<Uuid, ProviderError> {
    session_user_id(session)
        .await?
        .ok_or(ProviderError::NotAuthenticated)
}

/// Allow access to `target`'s rows for the owner and for admins.
async fn require_self_or_admin(
    session: &Session,
    pool: &PgPool,
    target: Uuid,
) -> Result<(), ProviderError> {
    let caller = require_user(session).await?;
    if caller == target || load_role(pool, caller).await? == Some(Role::Admin) {
        Ok(())
    } else {
        Err(ProviderError::Forbidden)
    }
}

async fn start_session(session: &Session, account: &Account) -> Result<(), ProviderError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, account.id.to_string())
        .await?;
    Ok(())
}

pub async fn current_principal(session: &Session) -> Result<Option<Principal>, ProviderError> {
    let Some(user_id) = session_user_id(session).await? else {
        return Ok(None);
    };
    let account: Option<Account> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool().await?)
        .await?;
    Ok(account.map(|a| a.to_principal()))
}

pub async fn sign_in(
    session: &Session,
    email: &str,
    password: &str,
) -> Result<AuthReply, ProviderError> {
    let email = email.trim().to_lowercase();
    let account: Option<Account> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool().await?)
        .await?;

    let Some(account) = account else {
        return Ok(AuthReply::Rejected(INVALID_CREDENTIALS.to_string()));
    };
    if !auth::verify_password(password, &account.password_hash)? {
        return Ok(AuthReply::Rejected(INVALID_CREDENTIALS.to_string()));
    }

    start_session(session, &account).await?;
    tracing::info!("Signed in {}", account.id);
    Ok(AuthReply::Accepted(account.to_principal()))
}

pub async fn sign_up(
    session: &Session,
    config: &AppConfig,
    email: &str,
    password: &str,
    fields: &SignUpFields,
) -> Result<AuthReply, ProviderError> {
    let email = email.trim().to_lowercase();
    let name = fields.name.trim();

    if email.is_empty() || !email.contains('@') {
        return Ok(AuthReply::Rejected("Unable to validate email address: invalid format".to_string()));
    }
    if password.chars().count() < config.auth.min_password_length {
        return Ok(AuthReply::Rejected(format!(
            "Password should be at least {} characters.",
            config.auth.min_password_length
        )));
    }

    let pool = pool().await?;
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(AuthReply::Rejected(ALREADY_REGISTERED.to_string()));
    }

    let password_hash = auth::hash_password(password)?;

    let mut tx = pool.begin().await?;
    let account: Account =
        sqlx::query_as("INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *")
            .bind(&email)
            .bind(&password_hash)
            .fetch_one(&mut *tx)
            .await?;
    sqlx::query("INSERT INTO profiles (id, name) VALUES ($1, $2)")
        .bind(account.id)
        .bind(if name.is_empty() { None } else { Some(name) })
        .execute(&mut *tx)
        .await?;
    // The role row commits with the account, so a failed follow-up call from
    // the client cannot leave an admin sign-up without its role.
    if fields.role == Role::Admin || config.auth.persist_citizen_role {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(account.id)
            .bind(fields.role.as_str())
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    start_session(session, &account).await?;
    tracing::info!("Registered {}", account.id);
    Ok(AuthReply::Accepted(account.to_principal()))
}

pub async fn sign_out(session: &Session) -> Result<(), ProviderError> {
    session.flush().await?;
    Ok(())
}

pub async fn query_role(
    session: &Session,
    principal_id: &str,
) -> Result<Option<RoleAssignment>, ProviderError> {
    let target = parse_id(principal_id)?;
    let pool = pool().await?;
    require_self_or_admin(session, pool, target).await?;
    Ok(load_role(pool, target).await?.map(|role| RoleAssignment {
        user_id: principal_id.to_string(),
        role,
    }))
}

pub async fn query_profile(
    session: &Session,
    principal_id: &str,
) -> Result<Option<Profile>, ProviderError> {
    let target = parse_id(principal_id)?;
    let pool = pool().await?;
    require_self_or_admin(session, pool, target).await?;
    let row: Option<ProfileRow> = sqlx::query_as(
        "SELECT id, name, points, total_reports FROM profiles WHERE id = $1",
    )
    .bind(target)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| r.to_profile()))
}

/// Record the caller's own role.
///
/// A principal holds at most one role row. Repeating the insert with the role
/// already stored succeeds; asking for a different role is refused.
pub async fn insert_role_assignment(
    session: &Session,
    principal_id: &str,
    role: Role,
) -> Result<(), ProviderError> {
    let target = parse_id(principal_id)?;
    if require_user(session).await? != target {
        return Err(ProviderError::Forbidden);
    }
    let pool = pool().await?;
    sqlx::query(
        "INSERT INTO user_roles (user_id, role) VALUES ($1, $2)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(target)
    .bind(role.as_str())
    .execute(pool)
    .await?;
    if load_role(pool, target).await? != Some(role) {
        return Err(ProviderError::Forbidden);
    }
    tracing::info!("Assigned role {} to {}", role, target);
    Ok(())
}

/// Number of principals without an admin role row.
pub async fn citizen_count(session: &Session) -> Result<u64, ProviderError> {
    let caller = require_user(session).await?;
    let pool = pool().await?;
    if load_role(pool, caller).await? != Some(Role::Admin) {
        return Err(ProviderError::Forbidden);
    }
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users u
         LEFT JOIN user_roles r ON r.user_id = u.id
         WHERE r.role IS NULL OR r.role = 'citizen'",
    )
    .fetch_one(pool)
    .await?;
    Ok(u64::try_from(count).unwrap_or(0))
}
