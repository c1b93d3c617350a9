use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use connect4_minimax::{
    config::{AppConfig, LogConfig, PacingConfig},
    pacing::thinking_delay,
    *,
};

mod display;

/// Play Connect 4 against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax opponent")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Look-ahead depth of the opponent, in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for breaking ties between equally good moves
    #[arg(long)]
    seed: Option<u64>,

    /// Side the human plays: red (moves first) or black
    #[arg(long, value_parser = parse_player)]
    human: Option<Player>,

    /// Let the engine play both sides
    #[arg(long)]
    ai_vs_ai: bool,

    /// Opening to start from, as 0-based column digits
    #[arg(long)]
    opening: Option<String>,

    /// Show the engine's moves as soon as they are found
    #[arg(long)]
    no_pacing: bool,

    /// Search the engine's candidate moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Command line flags take precedence over the configuration file
    fn apply(&self, config: &mut AppConfig) {
        if let Some(depth) = self.depth {
            config.search.depth = depth;
        }
        if self.seed.is_some() {
            config.search.seed = self.seed;
        }
        config.search.parallel |= self.parallel;
        if let Some(human) = self.human {
            config.game.human = human;
        }
        config.game.ai_vs_ai |= self.ai_vs_ai;
        if self.opening.is_some() {
            config.game.opening = self.opening.clone();
        }
        if self.no_pacing {
            config.pacing.enabled = false;
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        config.log.json |= self.log_json;
    }
}

fn parse_player(name: &str) -> Result<Player, String> {
    match name.to_lowercase().as_str() {
        "red" => Ok(Player::Red),
        "black" => Ok(Player::Black),
        _ => Err(format!("unknown player '{}', expected red or black", name)),
    }
}

fn init_logging(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    cli.apply(&mut config);
    config.validate()?;

    init_logging(&config.log)?;
    info!(
        path = %cli.config.display(),
        found = cli.config.exists(),
        ?config,
        "configuration loaded"
    );

    let rng = match config.search.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut strategist =
        MinimaxStrategist::new(config.search.depth, rng).with_parallel(config.search.parallel);

    println!("Welcome to Connect 4\n");

    loop {
        match play_game(&config, &mut strategist)? {
            Outcome::Win(player) => println!("{} wins", player),
            Outcome::Draw => println!("Draw!"),
            Outcome::InProgress => {}
        }
        if !ask_yes_no("Play again? y/n: ")? {
            break;
        }
    }
    Ok(())
}

/// Plays one game to its end and returns the outcome
fn play_game(config: &AppConfig, strategist: &mut MinimaxStrategist) -> Result<Outcome> {
    let mut state = match &config.game.opening {
        Some(moves) => GameState::from_moves(moves)?,
        None => new_game(),
    };
    let human = config.game.human_player();
    info!(human = ?human, depth = strategist.depth(), "new game");

    loop {
        display::draw(&state)?;

        // the previous mover is the only one who can have just won
        let outcome = evaluate_outcome(&state, state.current_player().opponent());
        if outcome.is_over() {
            info!(?outcome, chips = state.board().num_chips(), "game over");
            return Ok(outcome);
        }

        let mover = state.current_player();
        display::turn_banner(mover)?;

        let column = if Some(mover) == human {
            human_move(&mut state)?
        } else {
            let column = ai_move(&state, mover, strategist, &config.pacing)?;
            apply_human_move(&mut state, column)?;
            column
        };
        info!(player = %mover, column, "move played");
    }
}

/// Prompts until the human enters a playable 1-based column, then plays it
fn human_move(state: &mut GameState) -> Result<usize> {
    let stdin = stdin();
    loop {
        print!("Move input > ");
        stdout().flush()?;

        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            bail!("input closed");
        }

        let column = match input_str.trim().parse::<usize>() {
            Ok(column @ 1..=WIDTH) => column - 1,
            Ok(_) => {
                println!("Columns must be between 1 and {}", WIDTH);
                continue;
            }
            Err(_) => {
                println!("Invalid number: {}", input_str.trim());
                continue;
            }
        };

        match apply_human_move(state, column) {
            Ok(()) => return Ok(column),
            Err(IllegalMove::ColumnFull { .. }) => {
                println!("Invalid move, column {} full", column + 1)
            }
            Err(err) => println!("{}", err),
        }
    }
}

/// Runs the search off the input thread behind a spinner, then holds the
/// result back for the pacing delay
fn ai_move(
    state: &GameState,
    player: Player,
    strategist: &mut MinimaxStrategist,
    pacing: &PacingConfig,
) -> Result<usize> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
    spinner.set_message("AI is thinking...");
    spinner.enable_steady_tick(100);

    let start = Instant::now();
    let snapshot = *state;
    let result = thread::scope(|scope| {
        scope
            .spawn(|| strategist.best_move(&snapshot, player))
            .join()
    });
    let elapsed = start.elapsed();
    spinner.finish_and_clear();

    let best = result.map_err(|_| anyhow!("search thread panicked"))??;

    if pacing.enabled {
        thread::sleep(thinking_delay(elapsed, pacing.ceiling()));
    }
    println!("{} plays column {}", player, best.column + 1);
    Ok(best.column)
}

fn ask_yes_no(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        print!("{}", question);
        stdout().flush()?;

        let mut buffer = String::new();
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}
