//! Error codes for the daifugo engine.
//!
//! Callers map these to their own transport; never match on error messages.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn and ownership
    /// Acting when it is another player's turn
    OutOfTurn,
    /// Naming cards the player does not hold
    CardNotInHand,

    // Rules
    /// Cards form no single, group or run
    InvalidHand,
    /// Hand kind differs from the table
    HandKindMismatch,
    /// Card count differs from the table
    CardCountMismatch,
    /// Hand does not strictly beat the table
    NotStronger,

    // Preconditions
    NoActiveRound,
    RoundInProgress,
    RoundFinished,
    TooFewMembers,
    CannotPassOnEmptyTable,
    RoomFull,
    NotAMember,

    // Not found
    RoomNotFound,
    PlayerNotFound,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::InvalidHand => "INVALID_HAND",
            Self::HandKindMismatch => "HAND_KIND_MISMATCH",
            Self::CardCountMismatch => "CARD_COUNT_MISMATCH",
            Self::NotStronger => "NOT_STRONGER",
            Self::NoActiveRound => "NO_ACTIVE_ROUND",
            Self::RoundInProgress => "ROUND_IN_PROGRESS",
            Self::RoundFinished => "ROUND_FINISHED",
            Self::TooFewMembers => "TOO_FEW_MEMBERS",
            Self::CannotPassOnEmptyTable => "CANNOT_PASS_ON_EMPTY_TABLE",
            Self::RoomFull => "ROOM_FULL",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
