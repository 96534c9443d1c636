use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::team::Owner;
use crate::errors::domain::{DomainError, ValidationKind};

const MAX_TITLE_CHARS: usize = 200;
const MAX_BODY_CHARS: usize = 10_000;

fn text(raw: &str, field: &str, max_chars: usize) -> Result<String, DomainError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other(format!("Empty{field}")),
            format!("{} must not be empty", field.to_lowercase()),
        ));
    }
    if value.chars().count() > max_chars {
        let name = field.to_lowercase();
        return Err(DomainError::validation(
            ValidationKind::Other(format!("{field}TooLong")),
            format!("{name} is limited to {max_chars} characters"),
        ));
    }
    Ok(value.to_string())
}

/// A discussion post on a game page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub game_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Link to an already hosted image. Uploads are not handled here.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub game_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl PostDraft {
    pub fn validate(&self, game_id: Uuid, author: &Owner) -> Result<NewPost, DomainError> {
        Ok(NewPost {
            game_id,
            author_id: author.user_id,
            author_name: author.display_name.clone(),
            title: text(&self.title, "Title", MAX_TITLE_CHARS)?,
            content: text(&self.content, "Content", MAX_BODY_CHARS)?,
            image_url: self
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        })
    }
}

/// What a comment hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadKind {
    Post,
    Team,
}

impl ThreadKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ThreadKind::Post => "post",
            ThreadKind::Team => "team",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "post" => Some(ThreadKind::Post),
            "team" => Some(ThreadKind::Team),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thread {
    pub kind: ThreadKind,
    pub id: Uuid,
}

impl Thread {
    pub const fn post(id: Uuid) -> Self {
        Self {
            kind: ThreadKind::Post,
            id,
        }
    }

    pub const fn team(id: Uuid) -> Self {
        Self {
            kind: ThreadKind::Team,
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub game_id: Uuid,
    pub thread_kind: ThreadKind,
    pub thread_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Comment {
    pub fn thread(&self) -> Thread {
        Thread {
            kind: self.thread_kind,
            id: self.thread_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub game_id: Uuid,
    pub thread: Thread,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
}

impl CommentDraft {
    pub fn validate(
        &self,
        game_id: Uuid,
        thread: Thread,
        author: &Owner,
    ) -> Result<NewComment, DomainError> {
        Ok(NewComment {
            game_id,
            thread,
            author_id: author.user_id,
            author_name: author.display_name.clone(),
            content: text(&self.content, "Content", MAX_BODY_CHARS)?,
        })
    }
}

/// Posts newest first.
pub fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

/// Comments in reading order.
pub fn oldest_first(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    comments
}
