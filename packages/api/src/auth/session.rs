//! Session access helpers.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::ProviderError;

/// Key for storing the principal id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Principal id stored in the session, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<Uuid>, ProviderError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    user_id
        .map(|id| Uuid::parse_str(&id).map_err(|_| ProviderError::InvalidId(id)))
        .transpose()
}
