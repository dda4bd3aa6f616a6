//! Card parsing from ASCII tokens (e.g., "7H", "TS", "10S", "AD")

use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" | "10" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(DomainError::invalid_argument(format!("Parse rank: {s}"))),
        }
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Suit::Hearts),
            "D" => Ok(Suit::Diamonds),
            "C" => Ok(Suit::Clubs),
            "S" => Ok(Suit::Spades),
            _ => Err(DomainError::invalid_argument(format!("Parse suit: {s}"))),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Suit is always the final ASCII char; rank is one char, or "10".
        if !s.is_ascii() || !(2..=3).contains(&s.len()) {
            return Err(DomainError::invalid_argument(format!("Parse card: {s}")));
        }
        let (rank_str, suit_str) = s.split_at(s.len() - 1);
        let rank = rank_str
            .parse::<Rank>()
            .map_err(|_| DomainError::invalid_argument(format!("Parse card: {s}")))?;
        let suit = suit_str
            .parse::<Suit>()
            .map_err(|_| DomainError::invalid_argument(format!("Parse card: {s}")))?;
        Ok(Card { rank, suit })
    }
}

/// Token form used by serde and the terminal client ("7H", "TS").
pub fn card_token(card: &Card) -> String {
    let rank = match card.rank {
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    };
    let suit = match card.suit {
        Suit::Hearts => 'H',
        Suit::Diamonds => 'D',
        Suit::Clubs => 'C',
        Suit::Spades => 'S',
    };
    format!("{rank}{suit}")
}

/// Non-panicking helper to parse card tokens into Card instances.
/// Returns an error if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
