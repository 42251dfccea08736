use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::Message, types::PostMessageRequest};
use crate::shared::AppError;
use crate::store::TrackerStore;

/// Service for the guestbook
pub struct MessageService {
    store: Arc<dyn TrackerStore>,
}

impl MessageService {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Message>, AppError> {
        let mut tx = self.store.begin().await?;
        let messages = tx.list_messages().await?;
        tx.commit().await?;
        Ok(messages)
    }

    /// Validates and stores a message, stamped with the current time
    #[instrument(skip(self, request))]
    pub async fn post(&self, request: PostMessageRequest) -> Result<Message, AppError> {
        let (author, content) = request.validate()?;

        let mut tx = self.store.begin().await?;
        let message = tx
            .append_message(&Message {
                id: 0,
                author,
                content,
                created_at: Utc::now(),
            })
            .await?;
        tx.commit().await?;

        info!(message_id = message.id, author = %message.author, "Message posted");
        Ok(message)
    }
}
