use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::discussion::{Comment, NewComment, NewPost, Post, Thread};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait PostRepo: Send + Sync {
    /// Posts of one game, newest first.
    async fn list_posts(&self, game_id: Uuid) -> Result<Vec<Post>, DomainError>;
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn insert_post(&self, post: &NewPost) -> Result<Post, DomainError>;
    async fn delete_post(&self, post_id: Uuid) -> Result<bool, DomainError>;
}

/// Comments on posts and on saved teams live in one store keyed by thread.
#[async_trait]
pub trait CommentRepo: Send + Sync {
    /// Comments of one thread, oldest first.
    async fn list_comments(&self, thread: Thread) -> Result<Vec<Comment>, DomainError>;
    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, DomainError>;
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, DomainError>;
    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool, DomainError>;
    /// Removes every comment of a thread; returns how many went.
    async fn delete_thread(&self, thread: Thread) -> Result<u64, DomainError>;
}
