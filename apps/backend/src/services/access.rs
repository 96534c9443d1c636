use uuid::Uuid;

use crate::errors::domain::{DomainError, ForbiddenKind};
use crate::repos::AdminRepo;

/// Fail unless `user_id` is listed in the admins table.
pub async fn require_admin(admins: &dyn AdminRepo, user_id: Uuid) -> Result<(), DomainError> {
    if admins.is_admin(user_id).await? {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::AdminRequired,
            "Only admins may do this",
        ))
    }
}

/// Fail unless `user_id` wrote the item or is an admin.
pub async fn require_author_or_admin(
    admins: &dyn AdminRepo,
    author_id: Uuid,
    user_id: Uuid,
) -> Result<(), DomainError> {
    if author_id == user_id || admins.is_admin(user_id).await? {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::NotAuthor,
            "Only the author or an admin can delete this",
        ))
    }
}
