use anyhow::{Context, Result};
use clap::Parser;
use knightline::{Engine, EngineConfig, Grid, Mode, View};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about = "Random self-play driven through paged lookahead and move validation", long_about = None)]
struct Args {
    /// Maximum plies to play
    #[arg(long, default_value_t = 40)]
    plies: usize,

    /// Lookahead depth used to collect candidate moves
    #[arg(long, default_value_t = 1)]
    depth: u32,

    /// Lookahead strategy
    #[arg(long, value_enum, default_value_t = Mode::Exhaustive)]
    mode: Mode,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print boards turn-relative instead of white-at-bottom
    #[arg(long)]
    relative: bool,

    /// Print every page as JSON
    #[arg(long)]
    json: bool,
}

/// Pages through the whole lookahead and keeps the distinct first grids:
/// one per legal root move.
fn collect_candidates(engine: &Engine, position: &knightline::Position, args: &Args) -> Result<Vec<Grid>> {
    let mut out: Vec<Grid> = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = engine
            .slice_lookahead(position, cursor.as_deref(), args.depth.max(1), args.mode)
            .context("lookahead page")?;
        if args.json { println!("{}", serde_json::to_string(&page)?); }
        for line in &page.lines {
            if let Some(&first) = line.views().first() {
                if out.last() != Some(&first) { out.push(first); }
            }
        }
        match page.cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let view = if args.relative { View::Relative } else { View::Absolute };
    let engine = Engine::new(EngineConfig::from_env());
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let mut position = engine.new_position();
    println!("{}\n", engine.render(&position, view));

    for ply in 0..args.plies {
        if engine.is_terminal(&position) { break; }
        let candidates = collect_candidates(&engine, &position, &args)?;
        if candidates.is_empty() {
            println!("No legal moves for {:?}", position.side_to_move());
            break;
        }
        let choice = candidates[rng.gen_range(0..candidates.len())];
        let mover = position.side_to_move();
        position = engine.apply_external_move(&position, &choice).with_context(|| format!("ply {}", ply + 1))?;
        println!("ply {} ({:?}, {} candidates)", ply + 1, mover, candidates.len());
        println!("{}\n", engine.render(&position, view));
    }

    if engine.is_terminal(&position) {
        if position.has_kings() {
            println!("Game over: {} moves without a pawn advance", position.moves_since_pawn_advance);
        } else {
            println!("Game over: king captured");
        }
    }
    let (hits, misses) = engine.cache().stats();
    log::info!("move cache: {hits} hits, {misses} misses, {} entries", engine.cache().len());
    Ok(())
}
