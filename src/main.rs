use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use game_2048::engine::{Move, Score, Tile};
use game_2048::{Game, GameConfig, GameError};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "game-2048", version, about = "Play or simulate the 2048 sliding-tile puzzle")]
struct Cli {
    /// TOML file with size / win_tile / four_probability
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play interactively: w/a/s/d, arrow key names or direction names; r to restart, q to quit
    Play {
        /// Seed for tile spawns (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play many games with a random legal-move policy
    Simulate {
        /// Number of games
        #[arg(short = 'n', long, default_value_t = 100)]
        games: u64,
        /// Base seed; game i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match &cli.config {
        Some(path) => GameConfig::from_toml(path).with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };

    match cli.cmd {
        Cmd::Play { seed } => play(config, seed),
        Cmd::Simulate { games, seed, quiet } => simulate(config, games, seed, quiet),
    }
}

fn play(config: GameConfig, seed: Option<u64>) -> Result<()> {
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(config, rng)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_state(&game);

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            "" => continue,
            "q" | "quit" => break,
            "r" | "restart" | "new" => {
                game.restart();
                print_state(&game);
                continue;
            }
            _ => {}
        }
        match input.parse::<Move>() {
            Ok(dir) => match game.apply_move(dir) {
                Ok(outcome) if outcome.moved => print_state(&game),
                Ok(_) => println!("nothing moves {dir}"),
                Err(GameError::GameOver) => println!("Game over. Type r to restart or q to quit."),
                Err(e) => return Err(e.into()),
            },
            Err(e) => println!("{e}"),
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_state<S: game_2048::engine::TileSource>(game: &Game<S>) {
    println!("{}", game.board());
    println!("score: {}", game.score());
    if game.has_won() {
        println!("{} reached!", game.config().win_tile);
    }
    if game.is_over() {
        println!("Game over! Final score {}. Type r to restart or q to quit.", game.score());
    }
}

#[derive(Debug, Clone, Copy)]
struct GameSummary {
    score: Score,
    highest_tile: Tile,
    moves: u64,
    won: bool,
}

fn play_random(config: &GameConfig, seed: u64) -> Result<GameSummary, GameError> {
    let mut policy_rng = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut game = Game::new(config.clone(), StdRng::seed_from_u64(seed))?;
    while !game.is_over() {
        let legal = game.board().legal_moves();
        let Some(&dir) = legal.choose(&mut policy_rng) else { break };
        game.apply_move(dir)?;
    }
    Ok(GameSummary {
        score: game.score(),
        highest_tile: game.board().highest_tile(),
        moves: game.moves(),
        won: game.has_won(),
    })
}

fn simulate(config: GameConfig, games: u64, seed: u64, quiet: bool) -> Result<()> {
    let start = Instant::now();
    let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new(games) };
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
            .progress_chars("=>-"),
    );

    let summaries: Vec<GameSummary> = (0..games)
        .into_par_iter()
        .map(|i| {
            let s = play_random(&config, seed.wrapping_add(i));
            pb.inc(1);
            s
        })
        .collect::<Result<Vec<_>, _>>()?;
    pb.finish_and_clear();

    if summaries.is_empty() {
        println!("no games played");
        return Ok(());
    }
    let total: Score = summaries.iter().map(|s| s.score).sum();
    let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    let best_tile = summaries.iter().map(|s| s.highest_tile).max().unwrap_or(0);
    let wins = summaries.iter().filter(|s| s.won).count();
    let moves: u64 = summaries.iter().map(|s| s.moves).sum();
    info!("simulated {} games in {:.2}s", summaries.len(), start.elapsed().as_secs_f64());
    println!(
        "games: {} | mean score: {:.1} | best score: {} | best tile: {} | reached {}: {} | moves: {}",
        summaries.len(),
        total as f64 / summaries.len() as f64,
        best,
        best_tile,
        config.win_tile,
        wins,
        moves
    );
    Ok(())
}
