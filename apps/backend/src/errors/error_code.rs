//! Error codes for the Talker backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Talker backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// Only the team owner may do this
    NotOwner,
    /// Only the author of a post or comment may do this
    NotAuthor,
    /// Only admins may do this
    AdminRequired,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Malformed UUID in the path
    InvalidId,
    /// Team name missing or blank
    EmptyTeamName,
    /// Formation has no units
    NoUnitsSelected,
    /// Unit id not part of this game's roster
    UnknownUnit,
    /// Table name in game metadata is not a plain identifier
    InvalidTableName,

    // Formation rules
    /// Mode or row capacity exceeded
    CapacityExceeded,
    /// Unit already placed in the formation
    DuplicateUnit,
    /// Mode switch would exceed the new mode's cap
    ModeOverCapacity,
    /// A save is already in flight
    CommitInProgress,
    /// Builder session already committed or abandoned
    SessionClosed,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Character not found
    CharacterNotFound,
    /// Pet not found
    PetNotFound,
    /// Equipment not found
    EquipmentNotFound,
    /// Team not found
    TeamNotFound,
    /// Discussion post not found
    PostNotFound,
    /// Comment not found
    CommentNotFound,
    /// Game does not enable this feature
    FeatureDisabled,
    /// General not found error
    NotFound,

    // Conflicts
    /// Game slug already in use
    SlugTaken,
    /// General conflict
    Conflict,

    // System Errors
    /// Saving the team failed
    PersistenceFailed,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Stored data violates an invariant
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::NotOwner => "NOT_OWNER",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::AdminRequired => "ADMIN_REQUIRED",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::EmptyTeamName => "EMPTY_TEAM_NAME",
            Self::NoUnitsSelected => "NO_UNITS_SELECTED",
            Self::UnknownUnit => "UNKNOWN_UNIT",
            Self::InvalidTableName => "INVALID_TABLE_NAME",

            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::DuplicateUnit => "DUPLICATE_UNIT",
            Self::ModeOverCapacity => "MODE_OVER_CAPACITY",
            Self::CommitInProgress => "COMMIT_IN_PROGRESS",
            Self::SessionClosed => "SESSION_CLOSED",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::CharacterNotFound => "CHARACTER_NOT_FOUND",
            Self::PetNotFound => "PET_NOT_FOUND",
            Self::EquipmentNotFound => "EQUIPMENT_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::FeatureDisabled => "FEATURE_DISABLED",
            Self::NotFound => "NOT_FOUND",

            Self::SlugTaken => "SLUG_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::PersistenceFailed => "PERSISTENCE_FAILED",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::Forbidden,
        Self::NotOwner,
        Self::NotAuthor,
        Self::AdminRequired,
        Self::ValidationError,
        Self::BadRequest,
        Self::InvalidId,
        Self::EmptyTeamName,
        Self::NoUnitsSelected,
        Self::UnknownUnit,
        Self::InvalidTableName,
        Self::CapacityExceeded,
        Self::DuplicateUnit,
        Self::ModeOverCapacity,
        Self::CommitInProgress,
        Self::SessionClosed,
        Self::GameNotFound,
        Self::CharacterNotFound,
        Self::PetNotFound,
        Self::EquipmentNotFound,
        Self::TeamNotFound,
        Self::PostNotFound,
        Self::CommentNotFound,
        Self::FeatureDisabled,
        Self::NotFound,
        Self::SlugTaken,
        Self::Conflict,
        Self::PersistenceFailed,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
