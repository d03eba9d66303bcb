//! Flash messages carried in the session until the next rendered page.

use tower_sessions::Session;

use crate::models::{FlashLevel, FlashMessage, session_keys};

/// Queue a message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn push_flash(
    session: &Session,
    level: FlashLevel,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    let mut queued: Vec<FlashMessage> = session
        .get(session_keys::FLASH)
        .await?
        .unwrap_or_default();
    queued.push(FlashMessage::new(level, message));
    session.insert(session_keys::FLASH, queued).await
}

/// Remove and return every queued message, oldest first.
///
/// A session that cannot be read yields no messages; losing a flash is not
/// worth failing the page over.
pub async fn take_flashes(session: &Session) -> Vec<FlashMessage> {
    match session
        .remove::<Vec<FlashMessage>>(session_keys::FLASH)
        .await
    {
        Ok(queued) => queued.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read flash messages: {}", e);
            Vec::new()
        }
    }
}
