//! Outward error type of the engine.
//!
//! Services and the transaction helper return `Result<T, AppError>`. The
//! embedding layer (HTTP, CLI, bots) decides how to render it; the engine
//! only guarantees stable codes and human-readable detail.

use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::error_code::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Storage unavailable: {detail}")]
    StorageUnavailable { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidConfig => ErrorCode::InvalidConfig,
                    ValidationKind::InvalidJoin => ErrorCode::InvalidJoin,
                    ValidationKind::InvalidDart => ErrorCode::InvalidDart,
                    ValidationKind::InvalidSkill => ErrorCode::InvalidSkill,
                    ValidationKind::OutOfTurn => ErrorCode::NotYourTurn,
                    ValidationKind::NotHost => ErrorCode::NotHost,
                    ValidationKind::MatchOver => ErrorCode::MatchOver,
                    ValidationKind::LegOver => ErrorCode::LegOver,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::LobbyTaken => ErrorCode::LobbyTaken,
                    ConflictKind::AlreadyMatched => ErrorCode::AlreadyMatched,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Lobby => ErrorCode::LobbyNotFound,
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    NotFoundKind::Leg => ErrorCode::LegNotFound,
                    NotFoundKind::Visit => ErrorCode::VisitNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable | InfraErrorKind::Timeout => {
                    AppError::StorageUnavailable { detail }
                }
                _ => AppError::Db { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(err).into()
    }
}
