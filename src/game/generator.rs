use chrono::Utc;
use log::trace;
use rand::{Rng, RngCore, SeedableRng};

use crate::model::{Difficulty, GridSize, Puzzle, PuzzleOrigin};

/// Generates a random puzzle.
///
/// Every cell is filled independently with the difficulty's fill rate. No
/// attempt is made to check that the clues admit a unique solution or a
/// guess-free deduction path.
pub fn generate(size: GridSize, difficulty: Difficulty) -> Puzzle {
    generate_with_seed(size, difficulty, rand::rng().next_u64())
}

/// Same seed, same solution and id suffix.
pub fn generate_with_seed(size: GridSize, difficulty: Difficulty, seed: u64) -> Puzzle {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    trace!(target: "generator", "Generating {} {} puzzle; seed: {}", size, difficulty, seed);
    generate_with_rng(size, difficulty, &mut rng)
}

pub fn generate_with_rng<R: Rng>(size: GridSize, difficulty: Difficulty, rng: &mut R) -> Puzzle {
    let solution = generate_pattern(size, difficulty, rng);
    let id = generate_puzzle_id(rng);
    trace!(target: "generator", "Generated solution {}: {:?}", id, solution);

    Puzzle::from_sized_solution(id, size, difficulty, solution, PuzzleOrigin::Generated)
}

fn generate_pattern<R: Rng>(size: GridSize, difficulty: Difficulty, rng: &mut R) -> Vec<Vec<bool>> {
    let fill_rate = difficulty.fill_rate();
    (0..size.len())
        .map(|_| (0..size.len()).map(|_| rng.random_bool(fill_rate)).collect())
        .collect()
}

/// `puzzle_<unix millis>_<random suffix>`
fn generate_puzzle_id<R: Rng>(rng: &mut R) -> String {
    let suffix = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
    format!(
        "puzzle_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clue_deriver::{column_clues, row_clues};
    use crate::game::tests::UsingLogger;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use test_context::test_context;

    #[test_context(UsingLogger)]
    #[test]
    fn test_every_size_and_difficulty(_: &mut UsingLogger) {
        for size in GridSize::all() {
            for difficulty in Difficulty::all() {
                let puzzle = generate(size, difficulty);
                assert_eq!(puzzle.size(), size);
                assert_eq!(puzzle.difficulty(), difficulty);
                assert_eq!(puzzle.origin(), &PuzzleOrigin::Generated);
                assert_eq!(puzzle.solution().len(), size.len());
                assert!(puzzle.solution().iter().all(|row| row.len() == size.len()));
                assert_eq!(puzzle.row_clues().len(), size.len());
                assert_eq!(puzzle.column_clues().len(), size.len());
                assert_eq!(puzzle.row_clues(), row_clues(puzzle.solution()).as_slice());
                assert_eq!(
                    puzzle.column_clues(),
                    column_clues(puzzle.solution()).as_slice()
                );
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_with_seed(GridSize::Ten, Difficulty::Hard, 42);
        let b = generate_with_seed(GridSize::Ten, Difficulty::Hard, 42);
        assert_eq!(a.solution(), b.solution());
        assert_eq!(a.row_clues(), b.row_clues());

        let c = generate_with_seed(GridSize::Ten, Difficulty::Hard, 43);
        assert_ne!(a.solution(), c.solution());
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..200)
            .map(|_| generate(GridSize::Five, Difficulty::Easy).id().to_string())
            .collect();
        assert_eq!(ids.len(), 200);
        assert!(ids.iter().all(|id| id.starts_with("puzzle_")));
    }

    #[test]
    fn test_fill_rate_tracks_difficulty() {
        // 20 boards of 400 cells each: the observed rate stays well inside +-0.05
        for difficulty in Difficulty::all() {
            let mut filled = 0usize;
            for seed in 0..20 {
                let puzzle = generate_with_seed(GridSize::Twenty, difficulty, seed);
                filled += puzzle.solution().iter().flatten().filter(|&&c| c).count();
            }
            let rate = filled as f64 / (20.0 * 400.0);
            assert!(
                (rate - difficulty.fill_rate()).abs() < 0.05,
                "{} fill rate {} too far from {}",
                difficulty,
                rate,
                difficulty.fill_rate()
            );
        }
    }

    proptest! {
        #[test]
        fn prop_clues_match_solution(
            seed in any::<u64>(),
            size_idx in 0usize..4,
            difficulty_idx in 0usize..4,
        ) {
            let size = GridSize::all()[size_idx];
            let difficulty = Difficulty::all()[difficulty_idx];
            let puzzle = generate_with_seed(size, difficulty, seed);
            prop_assert_eq!(puzzle.row_clues().len(), size.len());
            prop_assert_eq!(puzzle.column_clues().len(), size.len());
            prop_assert_eq!(puzzle.row_clues().to_vec(), row_clues(puzzle.solution()));
            prop_assert_eq!(puzzle.column_clues().to_vec(), column_clues(puzzle.solution()));
        }
    }
}
