use std::cell::RefCell;
use std::process;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use log::error;
use picrossa::events::Channel;
use picrossa::game::{catalog, GameEngine, Settings, StatsManager};
use picrossa::helpers::format_time;
use picrossa::model::{Difficulty, GameEngineEvent, GridSize};
use picrossa::storage::{FileStore, KeyValueStore, MemoryStore};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board edge length: 5, 10, 15 or 20.
    #[arg(long, default_value_t = 10)]
    size: usize,

    #[arg(long, value_enum, default_value = "easy")]
    difficulty: DifficultyArg,

    /// Generator seed; falls back to PICROSSA_SEED.
    #[arg(long)]
    seed: Option<u64>,

    /// Play a catalog puzzle instead of generating one.
    #[arg(long, value_name = "PUZZLE_ID")]
    puzzle: Option<String>,

    /// Continue the saved session.
    #[arg(long, conflicts_with = "puzzle")]
    resume: bool,

    /// List catalog packs and exit.
    #[arg(long)]
    list: bool,

    /// Reveal hints until the puzzle is solved.
    #[arg(long)]
    solve: bool,

    /// Keep everything in memory instead of the user data directory.
    #[arg(long)]
    ephemeral: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        list_packs();
        return;
    }

    let result = if args.ephemeral {
        run(&args, MemoryStore::new(), MemoryStore::new())
    } else {
        match (FileStore::in_user_data_dir(), FileStore::in_user_data_dir()) {
            (Ok(game_store), Ok(stats_store)) => run(&args, game_store, stats_store),
            (Err(err), _) | (_, Err(err)) => {
                error!("No data directory ({}); using memory", err);
                run(&args, MemoryStore::new(), MemoryStore::new())
            }
        }
    };

    if let Err(message) = result {
        eprintln!("{}", message);
        process::exit(1);
    }
}

fn list_packs() {
    for pack in catalog::list_packs() {
        println!("{} ({}): {}", pack.name, pack.id, pack.description);
        for puzzle in &pack.puzzles {
            println!(
                "  {:<12} {:<13} {} {}",
                puzzle.id(),
                puzzle.name().unwrap_or_default(),
                puzzle.size(),
                puzzle.difficulty()
            );
        }
    }
}

fn run<S: KeyValueStore + 'static>(
    args: &Args,
    mut game_store: S,
    stats_store: S,
) -> Result<(), String> {
    let settings = Settings::load(&mut game_store);
    let (emitter, observer) = Channel::<GameEngineEvent>::new();
    let stats = Rc::new(RefCell::new(StatsManager::load(stats_store)));
    observer.subscribe_handler(Rc::clone(&stats));
    let mut engine = GameEngine::new(game_store, emitter);

    if args.resume {
        if !engine.load_progress() {
            return Err("No saved game to resume".to_string());
        }
    } else if let Some(puzzle_id) = &args.puzzle {
        engine
            .start_catalog_puzzle(puzzle_id)
            .map_err(|err| err.to_string())?;
    } else {
        let size = GridSize::try_from(args.size).map_err(|err| err.to_string())?;
        let seed = args.seed.or_else(Settings::seed_from_env);
        engine.start_generated(size, args.difficulty.into(), seed);
    }

    let Some(session) = engine.current() else {
        return Err("No active game".to_string());
    };
    println!("{}", session.puzzle());

    if args.solve {
        while engine.use_hint().is_applied() {}
    }

    let Some(session) = engine.current() else {
        return Err("No active game".to_string());
    };
    println!("{:?}", session.grid());
    println!(
        "status: {:?}  progress: {}%  time: {}  hints: {}",
        session.status(),
        session.progress_percent(),
        session.elapsed_time_display(),
        session.hints_used()
    );
    if settings.show_errors {
        println!("errors: {}", session.errors());
    }

    let stats = stats.borrow();
    println!(
        "completed: {}  accuracy: {:.1}%",
        stats.total_completed(),
        stats.average_accuracy()
    );
    for size in GridSize::all() {
        if let Some(best) = stats.best_time(size) {
            println!("best {}: {}", size, format_time(best));
        }
    }
    Ok(())
}
