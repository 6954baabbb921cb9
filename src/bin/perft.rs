use indicatif::{ProgressBar, ProgressStyle};
use knightline::perft::count_subtree;
use knightline::search::{children, MoveCache, SelfCheck};
use knightline::Position;
use rayon::prelude::*;
use std::time::Instant;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Line counter for knightline lookahead")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Where moves exposing the mover's king are filtered
    #[arg(long, value_enum, default_value_t = SelfCheck::Root)]
    self_check: SelfCheck,
    /// Move-set cache capacity in entries
    #[arg(long, default_value_t = 1 << 16)]
    cache: usize,
    /// Show a progress bar over root moves
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    env_logger::init();

    let args = Args::parse();
    let base = Position::startpos();
    if args.depth == 0 {
        if args.nps { println!("nodes: 1 elapsed: 0.000s nps: inf"); } else { println!("nodes: 1"); }
        return Ok(());
    }

    let cache = MoveCache::with_capacity(args.cache);
    let every_ply = args.self_check == SelfCheck::EveryPly;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let roots = children(&cache, &base, true);
        let bar = if args.progress { ProgressBar::new(roots.len() as u64) } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} root moves [{elapsed}]") {
            bar.set_style(style);
        }
        let nodes: u64 = roots
            .par_iter()
            .map(|child| {
                let n = count_subtree(&cache, child, args.depth - 1, every_ply);
                bar.inc(1);
                n
            })
            .sum();
        bar.finish_and_clear();
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    let (hits, misses) = cache.stats();
    log::info!("move cache: {hits} hits, {misses} misses");
    Ok(())
}
