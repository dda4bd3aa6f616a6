use serde::{Deserialize, Serialize};

use super::{format_cards, Card, PlayerId, Rank};

/// One card placed into a trick and who placed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPlay {
    pub card: Card,
    pub player: PlayerId,
}

/// The trick currently on the table.
///
/// Card attribution is taken from the recorded plays. The leader is whoever
/// put the first card down; every other card belongs to the responder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    plays: Vec<TrickPlay>,
    leader: Option<PlayerId>,
    last_player: Option<PlayerId>,
    last_matching_or_trump_player: Option<PlayerId>,
    /// Owed cards waived because the responder played every card of the
    /// opening rank they held.
    #[serde(default)]
    forgiven: usize,
}

impl Trick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: Card, player: &PlayerId) {
        self.plays.push(TrickPlay {
            card,
            player: player.clone(),
        });
        if self.leader.is_none() {
            self.leader = Some(player.clone());
        }
        self.last_player = Some(player.clone());

        let opening = self.plays[0].card.rank;
        if card.is_trump() || card.rank == opening {
            self.last_matching_or_trump_player = Some(player.clone());
        }
    }

    pub fn plays(&self) -> &[TrickPlay] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|p| p.card).collect()
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn has_cards(&self) -> bool {
        !self.plays.is_empty()
    }

    pub fn opening_rank(&self) -> Option<Rank> {
        self.plays.first().map(|p| p.card.rank)
    }

    pub fn leader(&self) -> Option<&PlayerId> {
        self.leader.as_ref()
    }

    pub fn last_player(&self) -> Option<&PlayerId> {
        self.last_player.as_ref()
    }

    pub fn last_matching_or_trump_player(&self) -> Option<&PlayerId> {
        self.last_matching_or_trump_player.as_ref()
    }

    pub fn last_card(&self) -> Option<Card> {
        self.plays.last().map(|p| p.card)
    }

    /// Number of cards the opening play put down (the leader's first turn).
    pub fn opening_play_len(&self) -> usize {
        match &self.leader {
            Some(leader) => self.plays.iter().take_while(|p| &p.player == leader).count(),
            None => 0,
        }
    }

    pub fn leading_player_card_count(&self) -> usize {
        match &self.leader {
            Some(leader) => self.plays.iter().filter(|p| &p.player == leader).count(),
            None => 0,
        }
    }

    pub fn responding_card_count(&self) -> usize {
        self.plays.len() - self.leading_player_card_count()
    }

    /// Cards the responder still owes before the leader may act again.
    pub fn outstanding_count(&self) -> usize {
        self.leading_player_card_count()
            .saturating_sub(self.responding_card_count())
            .saturating_sub(self.forgiven)
    }

    pub fn forgiven(&self) -> usize {
        self.forgiven
    }

    pub fn forgive_shortfall(&mut self, count: usize) {
        self.forgiven += count;
    }

    pub fn last_responding_card(&self) -> Option<Card> {
        let leader = self.leader.as_ref()?;
        self.plays
            .iter()
            .rev()
            .find(|p| &p.player != leader)
            .map(|p| p.card)
    }

    pub fn calculate_points(&self) -> u32 {
        self.plays.iter().map(|p| p.card.points()).sum()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trick{{cards={}, points={}}}",
            format_cards(&self.cards()),
            self.calculate_points()
        )
    }
}
