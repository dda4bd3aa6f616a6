//! Line commands understood by the terminal game.

use std::str::FromStr;

use crate::domain::{try_parse_cards, Card};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Vec<Card>),
    Pass,
    Hand,
    Save(Option<String>),
    Load(String),
    New,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = DomainError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(DomainError::invalid_argument("empty command"));
        };
        let rest: Vec<&str> = words.collect();

        let no_args = |cmd: Command| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(DomainError::invalid_argument(format!(
                    "'{verb}' takes no arguments"
                )))
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "play" | "p" => {
                if rest.is_empty() {
                    return Err(DomainError::invalid_argument(
                        "usage: play <card> [card...], e.g. play 9H 9S",
                    ));
                }
                let tokens: Vec<String> = rest.iter().map(|t| t.to_ascii_uppercase()).collect();
                Ok(Command::Play(try_parse_cards(&tokens)?))
            }
            "pass" => no_args(Command::Pass),
            "hand" | "h" => no_args(Command::Hand),
            "save" => match rest.as_slice() {
                [] => Ok(Command::Save(None)),
                [name] => Ok(Command::Save(Some((*name).to_string()))),
                _ => Err(DomainError::invalid_argument("usage: save [name]")),
            },
            "load" => match rest.as_slice() {
                [name] => Ok(Command::Load((*name).to_string())),
                _ => Err(DomainError::invalid_argument("usage: load <name>")),
            },
            "new" => no_args(Command::New),
            "help" | "?" => no_args(Command::Help),
            "quit" | "exit" | "q" => no_args(Command::Quit),
            other => Err(DomainError::invalid_argument(format!(
                "unknown command '{other}', try 'help'"
            ))),
        }
    }
}

pub const HELP: &str = "\
commands:
  play <cards>   put cards down, e.g. 'play 9H 9S' (10 may be written T)
  pass           end the trick instead of continuing
  hand           show your hand
  save [name]    write the game to the save directory
  load <name>    resume a saved game
  new            deal a new game with the same players
  quit           leave";
