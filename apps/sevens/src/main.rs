//! Terminal Sevens: one human against the AI, or two humans on one keyboard.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use sevens::ai::{create_ai, AiAction, AiPlayer};
use sevens::command::{Command, HELP};
use sevens::domain::format_cards;
use sevens::telemetry::{init_tracing, LogFormat};
use sevens::{
    AppError, EventBus, GameEngine, GameEventKind, GameSession, GameState, GameStatus,
    JsonSnapshotStore, LocalGameSession, Opponent, PendingIo, Player, PlayerId, PlayerType,
    SevensConfig, SnapshotStore, SnapshotWorker, Subscription,
};
use tracing::{info, warn};

struct Terminal {
    session: LocalGameSession,
    events: Subscription,
    store: JsonSnapshotStore,
    storage: SnapshotWorker,
    pending_saves: Vec<(PathBuf, PendingIo<()>)>,
    save_dir: PathBuf,
    ai: Option<(PlayerId, Box<dyn AiPlayer>)>,
}

enum Flow {
    Continue,
    Quit,
}

fn main() {
    let config = match SevensConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    init_tracing("warn", LogFormat::Pretty);

    if let Err(e) = run(config) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(config: SevensConfig) -> Result<(), AppError> {
    let engine = Arc::new(GameEngine::with_options(config.deal_options()));
    let bus = Arc::new(EventBus::new());
    let session = LocalGameSession::new(engine, bus.clone());

    let human = Player::new(config.player_name.clone(), PlayerType::Local);
    let (second, ai) = match config.opponent {
        Opponent::Ai => {
            let ai = create_ai(&config.ai, config.seed).ok_or_else(|| {
                AppError::config(format!("SEVENS_AI names no known AI: '{}'", config.ai))
            })?;
            let player = Player::new(format!("Computer ({})", config.ai), PlayerType::Ai);
            let id = player.id.clone();
            (player, Some((id, ai)))
        }
        Opponent::Human => (Player::new("Player 2", PlayerType::Local), None),
    };

    info!(opponent = ?config.opponent, save_dir = %config.save_dir.display(), "Starting terminal game");
    session.start(vec![human, second])?;

    let mut terminal = Terminal {
        session,
        events: bus.subscribe(),
        store: JsonSnapshotStore::new(),
        storage: SnapshotWorker::spawn(Arc::new(JsonSnapshotStore::new()))?,
        pending_saves: Vec::new(),
        save_dir: config.save_dir,
        ai,
    };
    println!("Sevens. Type 'help' for commands.");
    terminal.event_loop()
}

impl Terminal {
    fn event_loop(&mut self) -> Result<(), AppError> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            self.print_events();
            self.report_saves();
            let Some(state) = self.session.state() else {
                println!("No game loaded. Type 'new' or 'load <name>'.");
                if let Flow::Quit = self.prompt(&mut lines, None)? {
                    return Ok(());
                }
                continue;
            };

            if state.status != GameStatus::InProgress {
                print_result(&state);
                if let Flow::Quit = self.prompt(&mut lines, None)? {
                    return Ok(());
                }
                continue;
            }

            let Some(turn) = state.current_turn.clone() else {
                warn!("In-progress game has no turn holder");
                return Ok(());
            };

            if let Some((ai_id, ai)) = &self.ai {
                if *ai_id == turn {
                    let action = ai.choose_action(&state, ai_id)?;
                    let name = display_name(&state, ai_id);
                    match action {
                        AiAction::Play(cards) => {
                            println!("{name} plays {}", format_cards(&cards));
                            self.session.play_cards(ai_id, &cards)?;
                        }
                        AiAction::Pass => {
                            println!("{name} passes");
                            self.session.pass_turn(ai_id)?;
                        }
                    }
                    continue;
                }
            }

            print_table(&state, &turn);
            if let Flow::Quit = self.prompt(&mut lines, Some(&turn))? {
                return Ok(());
            }
        }
    }

    fn prompt(
        &mut self,
        lines: &mut impl Iterator<Item = io::Result<String>>,
        turn: Option<&PlayerId>,
    ) -> Result<Flow, AppError> {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(Flow::Quit);
        };
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.reason());
                return Ok(Flow::Continue);
            }
        };

        match self.execute(command, turn) {
            Ok(flow) => Ok(flow),
            Err(e) if e.is_recoverable() => {
                println!("✗ {}", user_message(&e));
                Ok(Flow::Continue)
            }
            Err(AppError::Storage(e)) => {
                println!("✗ {e}");
                Ok(Flow::Continue)
            }
            Err(e) => Err(e),
        }
    }

    fn execute(&mut self, command: Command, turn: Option<&PlayerId>) -> Result<Flow, AppError> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => println!("{HELP}"),
            Command::Hand => match (self.session.state(), turn) {
                (Some(state), Some(turn)) => {
                    if let Some(player) = state.player(turn) {
                        println!("{}: {}", player.display_name, player.hand);
                    }
                }
                _ => println!("Nobody is holding cards right now."),
            },
            Command::Play(cards) => match turn {
                Some(turn) => {
                    self.session.play_cards(turn, &cards)?;
                }
                None => println!("There is no trick to play into."),
            },
            Command::Pass => match turn {
                Some(turn) => {
                    self.session.pass_turn(turn)?;
                }
                None => println!("There is no trick to pass on."),
            },
            Command::Save(name) => {
                let Some(state) = self.session.state() else {
                    println!("Nothing to save.");
                    return Ok(Flow::Continue);
                };
                let name = name.unwrap_or_else(|| state.game_id.to_string());
                let path = self.store.path_for(&self.save_dir, &name);
                let pending = self.storage.save(state, path.clone());
                println!("Saving to {}...", path.display());
                self.pending_saves.push((path, pending));
            }
            Command::Load(name) => {
                let path = self.store.path_for(&self.save_dir, &name);
                let state = self.storage.load(path.clone()).wait()?;
                self.rebind_ai(&state);
                self.session.restore_state(state);
                println!("Loaded {}", path.display());
            }
            Command::New => {
                if self.session.reset_and_restart()?.is_none() {
                    println!("No players to deal for; load a game first.");
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// A loaded game may seat a different AI player id than the one we started with.
    fn rebind_ai(&mut self, state: &GameState) {
        if let Some((id, _)) = &mut self.ai {
            if let Some(seat) = state.players.iter().find(|p| p.player_type == PlayerType::Ai) {
                *id = seat.id.clone();
            }
        }
    }

    fn report_saves(&mut self) {
        let mut still_running = Vec::new();
        for (path, pending) in self.pending_saves.drain(..) {
            match pending.try_take() {
                Some(Ok(())) => println!("Saved to {}", path.display()),
                Some(Err(e)) => println!("✗ Save to {} failed: {e}", path.display()),
                None => still_running.push((path, pending)),
            }
        }
        self.pending_saves = still_running;
    }

    fn print_events(&self) {
        for event in self.events.drain() {
            if let GameEventKind::TrickWon {
                winner_name,
                points,
                cards,
                ..
            } = event.kind
            {
                println!(
                    "★ {winner_name} takes {} for {points} point(s)",
                    format_cards(&cards)
                );
            }
        }
    }
}

fn display_name(state: &GameState, id: &PlayerId) -> String {
    state
        .player(id)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn user_message(e: &AppError) -> String {
    match e {
        AppError::Domain(d) => d.reason().to_string(),
        other => other.to_string(),
    }
}

fn print_table(state: &GameState, turn: &PlayerId) {
    let [a, b] = &state.players;
    println!();
    println!(
        "Score: {} {} - {} {}   Deck: {}",
        a.display_name,
        a.score(),
        b.score(),
        b.display_name,
        state.deck.remaining()
    );
    if state.trick.has_cards() {
        println!("Trick: {}", state.trick);
    }
    if let Some(player) = state.player(turn) {
        println!("{} to play. Hand: {}", player.display_name, player.hand);
    }
}

fn print_result(state: &GameState) {
    let [a, b] = &state.players;
    println!(
        "Game over ({:?}). {} {} - {} {}",
        state.status,
        a.display_name,
        a.score(),
        b.score(),
        b.display_name
    );
    match state.winner() {
        Some(winner) => println!("{} wins.", winner.display_name),
        None => println!("No winner."),
    }
    println!("Type 'new' to play again or 'quit' to leave.");
}
