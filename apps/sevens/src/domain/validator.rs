//! Move legality: who may put down which cards, and when.

use tracing::debug;

use super::rules::MAX_HAND_SIZE;
use super::{Card, GameState, Hand, PlayerId, Rank, Trick};
use crate::errors::domain::DomainError;

/// Verdict on a candidate move. `Invalid` always carries a readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValidation {
    Valid,
    Invalid(String),
}

impl MoveValidation {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, MoveValidation::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            MoveValidation::Valid => None,
            MoveValidation::Invalid(reason) => Some(reason),
        }
    }
}

/// Stateless legality checker consulted by the engine before any mutation.
pub trait MoveValidator: Send + Sync {
    /// `Err` only for corrupted state (e.g. the turn holder is not seated).
    fn validate(
        &self,
        state: &GameState,
        player: &PlayerId,
        cards: &[Card],
    ) -> Result<MoveValidation, DomainError>;

    /// Advisory: the opening play was multi-card and `player` still holds
    /// that rank. Blocks nothing.
    fn must_respond_to_sequence(&self, state: &GameState, player: &PlayerId) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMoveValidator;

impl StandardMoveValidator {
    pub fn new() -> Self {
        Self
    }

    fn validate_leading_play(cards: &[Card]) -> MoveValidation {
        if cards.len() > MAX_HAND_SIZE {
            return MoveValidation::invalid(format!(
                "Cannot play more than {MAX_HAND_SIZE} cards"
            ));
        }
        if !all_same_rank(cards) {
            return MoveValidation::invalid(
                "All cards must be the same rank when playing multiple cards",
            );
        }
        MoveValidation::Valid
    }

    fn validate_response_play(
        trick: &Trick,
        player: &PlayerId,
        hand: &Hand,
        cards: &[Card],
        opening: Rank,
    ) -> MoveValidation {
        if !all_same_rank(cards) {
            return MoveValidation::invalid(
                "All cards must be the same rank when playing multiple cards",
            );
        }

        let response = cards[0].rank;
        let owed = trick.outstanding_count();
        let is_leader = trick.leader() == Some(player);

        if is_leader && owed == 0 {
            if response != opening && !response.is_trump() {
                return MoveValidation::invalid(format!(
                    "When continuing a trick, you must play {opening} or 7 (trump), or pass"
                ));
            }
            return MoveValidation::Valid;
        }

        if response == opening {
            if cards.len() == owed {
                return MoveValidation::Valid;
            }
            let held = hand.count_rank(opening);
            if cards.len() == held && held < owed {
                debug!(
                    played = cards.len(),
                    required = owed,
                    rank = %opening,
                    "Partial match: player is out of the opening rank"
                );
                return MoveValidation::Valid;
            }
            return MoveValidation::invalid(format!(
                "Must play {owed} cards of rank {opening} to match opponent"
            ));
        }

        if cards.len() > 1 {
            return MoveValidation::invalid(
                "Can only play multiple cards if matching opponent's rank",
            );
        }
        MoveValidation::Valid
    }
}

impl MoveValidator for StandardMoveValidator {
    fn validate(
        &self,
        state: &GameState,
        player: &PlayerId,
        cards: &[Card],
    ) -> Result<MoveValidation, DomainError> {
        if cards.is_empty() {
            return Ok(MoveValidation::invalid("No cards played"));
        }

        if state.current_turn.as_ref() != Some(player) {
            return Ok(MoveValidation::invalid("It's not your turn"));
        }

        let hand = &state.require_player(player, "validate")?.hand;
        for (i, card) in cards.iter().enumerate() {
            let repeated = cards[..i].contains(card);
            if repeated || !hand.contains(card) {
                return Ok(MoveValidation::invalid(format!(
                    "Player does not have the card: {card}"
                )));
            }
        }

        let trick = &state.trick;
        let Some(opening) = trick.opening_rank() else {
            return Ok(Self::validate_leading_play(cards));
        };
        Ok(Self::validate_response_play(
            trick, player, hand, cards, opening,
        ))
    }

    fn must_respond_to_sequence(&self, state: &GameState, player: &PlayerId) -> bool {
        let Some(opening) = state.trick.opening_rank() else {
            return false;
        };
        if state.trick.opening_play_len() <= 1 {
            return false;
        }
        state
            .player(player)
            .is_some_and(|p| p.hand.contains_rank(opening))
    }
}

fn all_same_rank(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].rank == w[1].rank)
}

/// Owed cards a responder is excused from by playing every card of the
/// opening rank they hold. Zero for any other play.
pub fn partial_match_shortfall(trick: &Trick, player: &PlayerId, cards: &[Card]) -> usize {
    let Some(opening) = trick.opening_rank() else {
        return 0;
    };
    if trick.leader() == Some(player) || cards.first().map(|c| c.rank) != Some(opening) {
        return 0;
    }
    trick.outstanding_count().saturating_sub(cards.len())
}

/// Why `player` may not pass right now, or `None` if they may.
///
/// Only the turn holder passes, never on an opening lead, and a responder
/// who still owes cards has to play them.
pub fn pass_rejection(state: &GameState, player: &PlayerId) -> Option<String> {
    if state.current_turn.as_ref() != Some(player) {
        return Some("It's not your turn".into());
    }
    let trick = &state.trick;
    if trick.is_empty() {
        return Some("Cannot pass on first play of trick".into());
    }
    let owed = trick.outstanding_count();
    if trick.leader() != Some(player) && owed > 0 {
        return Some(format!(
            "You must play {owed} more card(s) to match opponent's count"
        ));
    }
    None
}

/// Every non-empty same-rank subset of a hand, smallest first per rank.
/// Candidates still have to pass [`MoveValidator::validate`].
pub fn enumerate_candidate_plays(hand: &Hand) -> Vec<Vec<Card>> {
    let mut plays = Vec::new();
    for rank in Rank::ALL {
        let group = hand.cards_with_rank(rank);
        if group.is_empty() {
            continue;
        }
        let mut subsets: Vec<Vec<Card>> = (1u32..(1 << group.len()))
            .map(|mask| {
                group
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect()
            })
            .collect();
        subsets.sort_by_key(Vec::len);
        plays.extend(subsets);
    }
    plays
}
