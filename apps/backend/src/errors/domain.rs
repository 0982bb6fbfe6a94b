//! Domain-level error type used across services and adapters.
//!
//! This error type is DB-agnostic. Callers of the engine receive
//! `Result<T, crate::error::AppError>`, converted from `DomainError` via the
//! provided `From` implementation. Bust and checkout are NOT errors: they are
//! ordinary visit outcomes carried in the result value.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Lobby,
    Match,
    Leg,
    Visit,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Another guest won the race for an open lobby.
    LobbyTaken,
    /// The lobby already produced a match and cannot be cancelled.
    AlreadyMatched,
    /// Optimistic lock version mismatch on a match row.
    OptimisticLock,
    Other(String),
}

/// Validation / rejected-action kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Lobby configuration out of bounds (e.g. legs_to_win < 1).
    InvalidConfig,
    /// Guest tried to join their own lobby.
    InvalidJoin,
    /// Malformed dart (segment/multiplier combination does not exist).
    InvalidDart,
    /// Bot skill outside 1..=100.
    InvalidSkill,
    /// The submitting player is not the one the turn-order rule expects.
    OutOfTurn,
    /// Caller is not the lobby host.
    NotHost,
    /// The match already reached a terminal state.
    MatchOver,
    /// The leg already has a winner recorded.
    LegOver,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other("VALIDATION".into()), detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
