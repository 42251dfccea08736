use async_trait::async_trait;
use tracing::{debug, instrument};

use super::models::Message;
use crate::shared::AppError;
use crate::store::{db_error, MemoryTx, PgTx};

/// Trait for message board repository operations
#[async_trait]
pub trait MessageRepository: Send {
    /// All messages, newest first
    async fn list_messages(&mut self) -> Result<Vec<Message>, AppError>;
    async fn append_message(&mut self, message: &Message) -> Result<Message, AppError>;
}

#[async_trait]
impl MessageRepository for MemoryTx {
    async fn list_messages(&mut self) -> Result<Vec<Message>, AppError> {
        let mut messages = self.working.messages.clone();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(messages)
    }

    #[instrument(skip(self, message), fields(author = %message.author))]
    async fn append_message(&mut self, message: &Message) -> Result<Message, AppError> {
        let mut stored = message.clone();
        stored.id = self.working.next_id();
        self.working.messages.push(stored.clone());
        debug!(message_id = stored.id, "Message stored in memory");
        Ok(stored)
    }
}

#[async_trait]
impl MessageRepository for PgTx {
    async fn list_messages(&mut self) -> Result<Vec<Message>, AppError> {
        sqlx::query_as::<_, Message>(
            "SELECT id, author, content, created_at FROM messages ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("list messages"))
    }

    #[instrument(skip(self, message), fields(author = %message.author))]
    async fn append_message(&mut self, message: &Message) -> Result<Message, AppError> {
        let stored = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (author, content, created_at) VALUES ($1, $2, $3) \
             RETURNING id, author, content, created_at",
        )
        .bind(&message.author)
        .bind(&message.content)
        .bind(message.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("insert message"))?;

        debug!(message_id = stored.id, "Message stored in database");
        Ok(stored)
    }
}
