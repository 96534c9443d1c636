//! SeaORM adapter for discussion posts and comments.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::discussion::{Comment, NewComment, NewPost, Post, Thread, ThreadKind};
use crate::entities::{comments, posts};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::discussion::{CommentRepo, PostRepo};

impl From<posts::Model> for Post {
    fn from(row: posts::Model) -> Self {
        Post {
            id: row.id,
            game_id: row.game_id,
            author_id: row.user_id,
            author_name: row.username,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<comments::Model> for Comment {
    type Error = DomainError;

    fn try_from(row: comments::Model) -> Result<Self, Self::Error> {
        let thread_kind = ThreadKind::parse(&row.thread).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("comment {} has unknown thread {:?}", row.id, row.thread),
            )
        })?;

        Ok(Comment {
            id: row.id,
            game_id: row.game_id,
            thread_kind,
            thread_id: row.thread_id,
            author_id: row.user_id,
            author_name: row.username,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PostRepoSea {
    db: DatabaseConnection,
}

impl PostRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepo for PostRepoSea {
    async fn list_posts(&self, game_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let rows = posts::Entity::find()
            .filter(posts::Column::GameId.eq(game_id))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>, DomainError> {
        let row = posts::Entity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(row.map(Post::from))
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, DomainError> {
        let row = posts::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(post.game_id),
            user_id: Set(post.author_id),
            username: Set(post.author_name.clone()),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            image_url: Set(post.image_url.clone()),
            created_at: Set(OffsetDateTime::now_utc()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;
        Ok(Post::from(row))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool, DomainError> {
        let res = posts::Entity::delete_by_id(post_id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}

#[derive(Debug, Clone)]
pub struct CommentRepoSea {
    db: DatabaseConnection,
}

impl CommentRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepo for CommentRepoSea {
    async fn list_comments(&self, thread: Thread) -> Result<Vec<Comment>, DomainError> {
        let rows = comments::Entity::find()
            .filter(comments::Column::Thread.eq(thread.kind.as_str()))
            .filter(comments::Column::ThreadId.eq(thread.id))
            .order_by_asc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, DomainError> {
        comments::Entity::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Comment::try_from)
            .transpose()
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let row = comments::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(comment.game_id),
            thread: Set(comment.thread.kind.as_str().to_string()),
            thread_id: Set(comment.thread.id),
            user_id: Set(comment.author_id),
            username: Set(comment.author_name.clone()),
            content: Set(comment.content.clone()),
            created_at: Set(OffsetDateTime::now_utc()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;
        Comment::try_from(row)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool, DomainError> {
        let res = comments::Entity::delete_by_id(comment_id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_thread(&self, thread: Thread) -> Result<u64, DomainError> {
        let res = comments::Entity::delete_many()
            .filter(comments::Column::Thread.eq(thread.kind.as_str()))
            .filter(comments::Column::ThreadId.eq(thread.id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected)
    }
}
