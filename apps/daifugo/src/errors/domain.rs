//! Domain-level error type used across the engine, the room store and services.
//!
//! This error type is transport- and storage-agnostic. Every variant is
//! recoverable by the caller; none of them leaves shared state modified.

use thiserror::Error;

use crate::domain::hands::HandKind;
use crate::domain::{CardId, UserId};
use crate::errors::ErrorCode;

/// Why a classified (or unclassifiable) play cannot go on the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// No cards were named.
    #[error("no cards played")]
    EmptyPlay,
    /// The cards form neither a single, a group nor a run.
    #[error("cards {card_ids:?} do not form a valid hand")]
    InvalidCombination { card_ids: Vec<CardId> },
    #[error("table holds {expected:?}, got {actual:?}")]
    KindMismatch { expected: HandKind, actual: HandKind },
    #[error("table holds {expected} cards, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
    /// Equal strength is not enough to beat the table.
    #[error("strength {candidate} does not beat {table}")]
    NotStronger { table: i32, candidate: i32 },
}

/// Preconditions that must hold before an operation may touch a room or round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreconditionKind {
    NoActiveRound,
    RoundInProgress,
    RoundFinished,
    TooFewMembers,
    EmptyTable,
    RoomFull,
    NotAMember,
}

/// Domain-level not found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("out of turn: waiting for user {expected}, got {actual}")]
    OutOfTurn { expected: UserId, actual: UserId },
    #[error("cards not in hand: {card_ids:?}")]
    CardsNotInHand { card_ids: Vec<CardId> },
    #[error("rule violation: {0}")]
    Rule(#[from] RuleViolation),
    #[error("precondition {0:?}: {1}")]
    Precondition(PreconditionKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
}

impl DomainError {
    pub fn rule(violation: RuleViolation) -> Self {
        Self::Rule(violation)
    }
    pub fn precondition(kind: PreconditionKind, detail: impl Into<String>) -> Self {
        Self::Precondition(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// True when the request named a target that does not exist, as opposed
    /// to a valid target receiving bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(..))
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::OutOfTurn { .. } => ErrorCode::OutOfTurn,
            DomainError::CardsNotInHand { .. } => ErrorCode::CardNotInHand,
            DomainError::Rule(v) => match v {
                RuleViolation::EmptyPlay | RuleViolation::InvalidCombination { .. } => {
                    ErrorCode::InvalidHand
                }
                RuleViolation::KindMismatch { .. } => ErrorCode::HandKindMismatch,
                RuleViolation::CountMismatch { .. } => ErrorCode::CardCountMismatch,
                RuleViolation::NotStronger { .. } => ErrorCode::NotStronger,
            },
            DomainError::Precondition(kind, _) => match kind {
                PreconditionKind::NoActiveRound => ErrorCode::NoActiveRound,
                PreconditionKind::RoundInProgress => ErrorCode::RoundInProgress,
                PreconditionKind::RoundFinished => ErrorCode::RoundFinished,
                PreconditionKind::TooFewMembers => ErrorCode::TooFewMembers,
                PreconditionKind::EmptyTable => ErrorCode::CannotPassOnEmptyTable,
                PreconditionKind::RoomFull => ErrorCode::RoomFull,
                PreconditionKind::NotAMember => ErrorCode::NotAMember,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Room => ErrorCode::RoomNotFound,
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
            },
        }
    }
}
