//! Greedy AI: take points when it can, give none away when it can't.

use super::trait_def::{legal_actions, AiAction, AiError, AiPlayer};
use crate::domain::{Card, GameState, PlayerId};

/// Deterministic one-ply player.
///
/// Leading: cheapest single card, keeping sevens and point cards back.
/// Responding: take the trick (match or trump) when it holds points,
/// otherwise throw the cheapest card. Leader continuing: pass unless
/// another capture adds points.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPlayer;

impl GreedyPlayer {
    pub const NAME: &'static str = "greedy";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }
}

/// Lower is cheaper to give up.
fn cost(cards: &[Card]) -> (u32, usize, u8) {
    let points: u32 = cards.iter().map(|c| c.points()).sum();
    let trumps = cards.iter().filter(|c| c.is_trump()).count();
    let top = cards.iter().map(|c| c.rank.value()).max().unwrap_or(0);
    (points, trumps, top)
}

impl AiPlayer for GreedyPlayer {
    fn choose_action(&self, state: &GameState, me: &PlayerId) -> Result<AiAction, AiError> {
        let actions = legal_actions(state, me)?;
        let can_pass = actions.contains(&AiAction::Pass);
        let mut plays: Vec<Vec<Card>> = actions
            .into_iter()
            .filter_map(|a| match a {
                AiAction::Play(cards) => Some(cards),
                AiAction::Pass => None,
            })
            .collect();

        let trick = &state.trick;
        let Some(opening) = trick.opening_rank() else {
            plays.sort_by_key(|p| (cost(p), p.len()));
            return plays
                .into_iter()
                .next()
                .map(AiAction::Play)
                .ok_or_else(|| AiError::InvalidMove("No card to lead".into()));
        };

        let on_table = trick.calculate_points();
        let (mut captures, mut throws): (Vec<_>, Vec<_>) = plays
            .into_iter()
            .partition(|p| p.iter().all(|c| c.rank == opening || c.is_trump()));
        captures.sort_by_key(|p| cost(p));
        throws.sort_by_key(|p| cost(p));

        if can_pass {
            // Continuing only pays if it brings points of our own along.
            let worthwhile = captures
                .into_iter()
                .find(|p| cost(p).0 > 0 && on_table > 0);
            return Ok(worthwhile.map_or(AiAction::Pass, AiAction::Play));
        }

        let capture_first = on_table > 0 || throws.is_empty();
        let pick = if capture_first {
            captures.into_iter().next().or_else(|| throws.into_iter().next())
        } else {
            throws.into_iter().next().or_else(|| captures.into_iter().next())
        };
        pick.map(AiAction::Play)
            .ok_or_else(|| AiError::InvalidMove("No legal actions available".into()))
    }
}
