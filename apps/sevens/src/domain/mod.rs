//! Domain layer: pure game logic types and helpers.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod hand;
pub mod player;
pub mod resolver;
pub mod rules;
pub mod state;
pub mod trick;
pub mod validator;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_props_trick_winner;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_cards;
pub use cards_types::{format_cards, Card, Rank, Suit};
pub use deck::Deck;
pub use hand::Hand;
pub use player::{Player, PlayerId, PlayerType};
pub use resolver::{StandardTrickResolver, TrickResolver};
pub use rules::{DECK_SIZE, MAX_HAND_SIZE, WINNING_SCORE};
pub use state::{GameState, GameStatus};
pub use trick::{Trick, TrickPlay};
pub use validator::{
    enumerate_candidate_plays, partial_match_shortfall, pass_rejection, MoveValidation,
    MoveValidator, StandardMoveValidator,
};
