//! Domain layer: pure game logic types and helpers.

pub mod cards_parsing;
pub mod cards_types;
pub mod dealing;
pub mod hands;
pub mod legal_plays;
pub mod player_view;
pub mod plays;
pub mod rounds;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod strength;

#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_plays;
#[cfg(test)]
mod tests_rounds;

// Re-exports for ergonomics
pub use cards_parsing::{CardFace, ParseCardError};
pub use cards_types::{Card, CardId, Rank, Suit, UserId};
pub use dealing::Deck;
pub use hands::{analyze_hand, classify, HandClass, HandKind, LastHand};
pub use legal_plays::LegalPlay;
pub use player_view::PlayerView;
pub use plays::{PassOutcome, PlayOutcome};
pub use rounds::CardExchange;
pub use rules::validate_play;
pub use snapshot::GameSnapshot;
pub use state::{Field, Game, Phase, Player};
pub use strength::get_strength;
