//! In-process publish/subscribe for game events.
//!
//! Sessions publish here after engine calls succeed. The engine itself
//! never sees the bus.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Card, GameState, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventKind {
    CardsPlayed {
        player: PlayerId,
        cards: Vec<Card>,
    },
    TrickWon {
        winner: PlayerId,
        winner_name: String,
        points: u32,
        cards: Vec<Card>,
    },
    StateChanged {
        state: Box<GameState>,
        description: String,
    },
}

/// Envelope stamped with a unique id and the time of publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub event_id: Uuid,
    pub timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub kind: GameEventKind,
}

impl GameEvent {
    pub fn new(kind: GameEventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: OffsetDateTime::now_utc(),
            kind,
        }
    }

    pub fn cards_played(player: &PlayerId, cards: &[Card]) -> Self {
        Self::new(GameEventKind::CardsPlayed {
            player: player.clone(),
            cards: cards.to_vec(),
        })
    }

    pub fn trick_won(
        winner: &PlayerId,
        winner_name: impl Into<String>,
        points: u32,
        cards: Vec<Card>,
    ) -> Self {
        Self::new(GameEventKind::TrickWon {
            winner: winner.clone(),
            winner_name: winner_name.into(),
            points,
            cards,
        })
    }

    pub fn state_changed(state: GameState, description: impl Into<String>) -> Self {
        Self::new(GameEventKind::StateChanged {
            state: Box::new(state),
            description: description.into(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            GameEventKind::CardsPlayed { .. } => "cards_played",
            GameEventKind::TrickWon { .. } => "trick_won",
            GameEventKind::StateChanged { .. } => "state_changed",
        }
    }
}

/// Receiving end of a subscription. Dropping it unsubscribes lazily on the
/// next publish.
pub struct Subscription {
    pub token: Uuid,
    pub receiver: Receiver<GameEvent>,
}

impl Subscription {
    /// Everything delivered so far, without blocking.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<HashMap<Uuid, Sender<GameEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = channel();
        let token = Uuid::new_v4();
        self.subscribers.lock().insert(token, tx);
        debug!(%token, "Subscriber registered");
        Subscription {
            token,
            receiver: rx,
        }
    }

    /// Returns whether the token was registered.
    pub fn unsubscribe(&self, token: Uuid) -> bool {
        let removed = self.subscribers.lock().remove(&token).is_some();
        if removed {
            debug!(%token, "Subscriber removed");
        }
        removed
    }

    /// Deliver `event` to every live subscriber, dropping the ones that hung up.
    pub fn publish(&self, event: GameEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|token, tx| match tx.send(event.clone()) {
            Ok(()) => true,
            Err(_) => {
                debug!(%token, "Dropping disconnected subscriber");
                false
            }
        });
        debug!(
            event = event.name(),
            event_id = %event.event_id,
            subscribers = subscribers.len(),
            "Event published"
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn clear(&self) {
        self.subscribers.lock().clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
