//! Discussion posts on a game page, and comments on posts and saved teams.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::access::require_author_or_admin;
use super::games::GameContext;
use crate::domain::discussion::{Comment, CommentDraft, Post, PostDraft, Thread, ThreadKind};
use crate::domain::schema_router::EntityKind;
use crate::domain::team::Owner;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{AdminRepo, CommentRepo, PostRepo, TeamRepo};

fn post_not_found(post_id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Post, format!("Post {post_id} not found"))
}

fn comment_not_found(comment_id: Uuid) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Comment,
        format!("Comment {comment_id} not found"),
    )
}

pub struct DiscussionService {
    posts: Arc<dyn PostRepo>,
    comments: Arc<dyn CommentRepo>,
    teams: Arc<dyn TeamRepo>,
    admins: Arc<dyn AdminRepo>,
}

impl DiscussionService {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        comments: Arc<dyn CommentRepo>,
        teams: Arc<dyn TeamRepo>,
        admins: Arc<dyn AdminRepo>,
    ) -> Self {
        Self {
            posts,
            comments,
            teams,
            admins,
        }
    }

    /// Posts of this game, newest first.
    pub async fn list_posts(&self, ctx: &GameContext) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts(ctx.game_id()).await
    }

    pub async fn get_post(&self, ctx: &GameContext, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_post(post_id)
            .await?
            .filter(|p| p.game_id == ctx.game_id())
            .ok_or_else(|| post_not_found(post_id))
    }

    pub async fn create_post(
        &self,
        ctx: &GameContext,
        author: &Owner,
        draft: &PostDraft,
    ) -> Result<Post, DomainError> {
        let new_post = draft.validate(ctx.game_id(), author)?;
        let post = self.posts.insert_post(&new_post).await?;
        info!(game_id = %ctx.game_id(), post_id = %post.id, by = %author.user_id, "post created");
        Ok(post)
    }

    /// The author or an admin may delete; the post's comments go with it.
    pub async fn delete_post(
        &self,
        ctx: &GameContext,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        let post = self.get_post(ctx, post_id).await?;
        require_author_or_admin(self.admins.as_ref(), post.author_id, user_id).await?;

        if !self.posts.delete_post(post_id).await? {
            return Err(post_not_found(post_id));
        }
        let comments = self.comments.delete_thread(Thread::post(post_id)).await?;
        info!(
            game_id = %ctx.game_id(),
            post_id = %post_id,
            by = %user_id,
            comments,
            "post deleted"
        );
        Ok(())
    }

    /// The thread must exist in this game. Team threads also need the game
    /// to have a teams table.
    async fn ensure_thread(&self, ctx: &GameContext, thread: Thread) -> Result<(), DomainError> {
        match thread.kind {
            ThreadKind::Post => self.get_post(ctx, thread.id).await.map(|_| ()),
            ThreadKind::Team => {
                let table = ctx.routes.require_table(EntityKind::Teams)?;
                self.teams
                    .find_team(table, thread.id)
                    .await?
                    .filter(|t| t.game_id == ctx.game_id())
                    .map(|_| ())
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Team,
                            format!("Team {} not found", thread.id),
                        )
                    })
            }
        }
    }

    /// Comments of a thread, oldest first.
    pub async fn list_comments(
        &self,
        ctx: &GameContext,
        thread: Thread,
    ) -> Result<Vec<Comment>, DomainError> {
        self.ensure_thread(ctx, thread).await?;
        self.comments.list_comments(thread).await
    }

    pub async fn add_comment(
        &self,
        ctx: &GameContext,
        thread: Thread,
        author: &Owner,
        draft: &CommentDraft,
    ) -> Result<Comment, DomainError> {
        let new_comment = draft.validate(ctx.game_id(), thread, author)?;
        self.ensure_thread(ctx, thread).await?;

        let comment = self.comments.insert_comment(&new_comment).await?;
        info!(
            game_id = %ctx.game_id(),
            thread = thread.kind.as_str(),
            thread_id = %thread.id,
            comment_id = %comment.id,
            "comment added"
        );
        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        ctx: &GameContext,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        let comment = self
            .comments
            .find_comment(comment_id)
            .await?
            .filter(|c| c.game_id == ctx.game_id())
            .ok_or_else(|| comment_not_found(comment_id))?;
        require_author_or_admin(self.admins.as_ref(), comment.author_id, user_id).await?;

        if !self.comments.delete_comment(comment_id).await? {
            return Err(comment_not_found(comment_id));
        }
        info!(game_id = %ctx.game_id(), comment_id = %comment_id, by = %user_id, "comment deleted");
        Ok(())
    }
}
