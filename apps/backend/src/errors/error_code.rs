//! Error codes surfaced by the engine API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings callers see.

use core::fmt;

/// Centralized error codes for the darts engine API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lobby lifecycle
    /// Lobby configuration rejected (legs_to_win < 1, ...)
    InvalidConfig,
    /// A player may not join their own lobby
    InvalidJoin,
    /// Another guest claimed the lobby first; re-list and pick another
    LobbyTaken,
    /// Only the host may cancel a lobby
    NotHost,
    /// The lobby already produced a match
    AlreadyMatched,

    // Scoring state machine
    /// Not this player's turn per the persisted visit order
    NotYourTurn,
    /// Malformed dart value
    InvalidDart,
    /// Bot skill outside 1..=100
    InvalidSkill,
    /// The match already reached a terminal state
    MatchOver,
    /// The leg already has a recorded winner
    LegOver,
    /// General validation error
    ValidationError,

    // Resources
    LobbyNotFound,
    MatchNotFound,
    LegNotFound,
    VisitNotFound,
    NotFound,

    // Concurrency & storage
    /// Match row was modified concurrently; refresh and retry
    OptimisticLock,
    Conflict,
    /// Persistence port unreachable; retry the whole operation
    StorageUnavailable,
    DbError,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical string form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::InvalidJoin => "INVALID_JOIN",
            ErrorCode::LobbyTaken => "LOBBY_TAKEN",
            ErrorCode::NotHost => "NOT_HOST",
            ErrorCode::AlreadyMatched => "ALREADY_MATCHED",
            ErrorCode::NotYourTurn => "NOT_YOUR_TURN",
            ErrorCode::InvalidDart => "INVALID_DART",
            ErrorCode::InvalidSkill => "INVALID_SKILL",
            ErrorCode::MatchOver => "MATCH_OVER",
            ErrorCode::LegOver => "LEG_OVER",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::LobbyNotFound => "LOBBY_NOT_FOUND",
            ErrorCode::MatchNotFound => "MATCH_NOT_FOUND",
            ErrorCode::LegNotFound => "LEG_NOT_FOUND",
            ErrorCode::VisitNotFound => "VISIT_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::OptimisticLock => "OPTIMISTIC_LOCK",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
