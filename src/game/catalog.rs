//! Hand-authored puzzle packs.

use log::error;
use std::sync::LazyLock;

use crate::model::{parse_pattern, Difficulty, Puzzle, PuzzleOrigin, PuzzlePack};

struct PackSource {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    puzzles: &'static [PuzzleSource],
}

struct PuzzleSource {
    id: &'static str,
    name: &'static str,
    difficulty: Difficulty,
    pattern: &'static [&'static str],
}

const PACKS: &[PackSource] = &[
    PackSource {
        id: "basic",
        name: "Basic",
        description: "Simple shapes to get started",
        puzzles: &[
            PuzzleSource {
                id: "basic_1",
                name: "Heart",
                difficulty: Difficulty::Easy,
                pattern: &["01010", "11111", "11111", "01110", "00100"],
            },
            PuzzleSource {
                id: "basic_2",
                name: "Diamond",
                difficulty: Difficulty::Easy,
                pattern: &["00100", "01110", "11111", "01110", "00100"],
            },
            PuzzleSource {
                id: "basic_3",
                name: "House",
                difficulty: Difficulty::Easy,
                pattern: &["00100", "01110", "11111", "10101", "10101"],
            },
            PuzzleSource {
                id: "basic_4",
                name: "Smile",
                difficulty: Difficulty::Medium,
                pattern: &[
                    "0000000000",
                    "0011001100",
                    "0011001100",
                    "0000000000",
                    "0000000000",
                    "1000000001",
                    "0100000010",
                    "0011111100",
                    "0000000000",
                    "0000000000",
                ],
            },
        ],
    },
    PackSource {
        id: "animals",
        name: "Animals",
        description: "Cute pixel animals",
        puzzles: &[
            PuzzleSource {
                id: "animals_1",
                name: "Cat",
                difficulty: Difficulty::Easy,
                pattern: &["10001", "10001", "11111", "11111", "01110"],
            },
            PuzzleSource {
                id: "animals_2",
                name: "Fish",
                difficulty: Difficulty::Easy,
                pattern: &["00100", "01110", "11111", "01110", "00100"],
            },
            PuzzleSource {
                id: "animals_3",
                name: "Bird",
                difficulty: Difficulty::Medium,
                pattern: &[
                    "0010000000",
                    "0111000000",
                    "1111100000",
                    "0111110000",
                    "0011111000",
                    "0001111100",
                    "0000111110",
                    "0000011111",
                    "0000001110",
                    "0000000100",
                ],
            },
            PuzzleSource {
                id: "animals_4",
                name: "Dog",
                difficulty: Difficulty::Medium,
                pattern: &[
                    "1000000001",
                    "1100000011",
                    "0110000110",
                    "0011111100",
                    "0011111100",
                    "0011111100",
                    "0001111000",
                    "0001111000",
                    "0000110000",
                    "0000110000",
                ],
            },
        ],
    },
    PackSource {
        id: "geometric",
        name: "Geometric",
        description: "Abstract patterns and shapes",
        puzzles: &[
            PuzzleSource {
                id: "geometric_1",
                name: "Triangle",
                difficulty: Difficulty::Easy,
                pattern: &["00100", "01110", "11111", "00000", "00000"],
            },
            PuzzleSource {
                id: "geometric_2",
                name: "Cross",
                difficulty: Difficulty::Easy,
                pattern: &["00100", "00100", "11111", "00100", "00100"],
            },
            PuzzleSource {
                id: "geometric_3",
                name: "Checkerboard",
                difficulty: Difficulty::Hard,
                pattern: &[
                    "0101010101",
                    "1010101010",
                    "0101010101",
                    "1010101010",
                    "0101010101",
                    "1010101010",
                    "0101010101",
                    "1010101010",
                    "0101010101",
                    "1010101010",
                ],
            },
            PuzzleSource {
                id: "geometric_4",
                name: "Spiral",
                difficulty: Difficulty::Hard,
                pattern: &[
                    "1111111111",
                    "0000000001",
                    "0111111101",
                    "0100000101",
                    "0101110101",
                    "0101010101",
                    "0101011101",
                    "0100000001",
                    "0111111111",
                    "0000000000",
                ],
            },
        ],
    },
];

static CATALOG: LazyLock<Vec<PuzzlePack>> =
    LazyLock::new(|| PACKS.iter().map(build_pack).collect());

fn build_pack(source: &PackSource) -> PuzzlePack {
    let puzzles = source
        .puzzles
        .iter()
        .filter_map(|puzzle| {
            let origin = PuzzleOrigin::Pack {
                pack_id: source.id.to_string(),
                pack_name: source.name.to_string(),
                name: puzzle.name.to_string(),
            };
            let built = parse_pattern(puzzle.pattern).and_then(|solution| {
                Puzzle::from_solution(puzzle.id, puzzle.difficulty, solution, origin)
            });
            match built {
                Ok(built) => Some(built),
                Err(err) => {
                    error!(target: "catalog", "Skipping catalog puzzle {}: {}", puzzle.id, err);
                    None
                }
            }
        })
        .collect();

    PuzzlePack {
        id: source.id.to_string(),
        name: source.name.to_string(),
        description: source.description.to_string(),
        puzzles,
    }
}

pub fn list_packs() -> &'static [PuzzlePack] {
    &CATALOG
}

pub fn get_pack_by_id(pack_id: &str) -> Option<&'static PuzzlePack> {
    CATALOG.iter().find(|pack| pack.id == pack_id)
}

pub fn get_puzzle_by_id(puzzle_id: &str) -> Option<&'static Puzzle> {
    CATALOG.iter().find_map(|pack| pack.get_puzzle(puzzle_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clue_deriver::{column_clues, row_clues};
    use crate::model::GridSize;
    use std::collections::HashSet;

    #[test]
    fn test_every_puzzle_builds() {
        let built: usize = list_packs().iter().map(|pack| pack.puzzles.len()).sum();
        let authored: usize = PACKS.iter().map(|pack| pack.puzzles.len()).sum();
        assert_eq!(list_packs().len(), 3);
        assert_eq!(built, authored);
        assert_eq!(built, 12);
    }

    #[test]
    fn test_ids_are_unique_and_origins_match_pack() {
        let mut ids = HashSet::new();
        for pack in list_packs() {
            for puzzle in &pack.puzzles {
                assert!(ids.insert(puzzle.id().to_string()));
                assert_eq!(
                    puzzle.origin(),
                    &PuzzleOrigin::Pack {
                        pack_id: pack.id.clone(),
                        pack_name: pack.name.clone(),
                        name: puzzle.name().unwrap_or_default().to_string(),
                    }
                );
                assert_eq!(puzzle.row_clues(), row_clues(puzzle.solution()).as_slice());
                assert_eq!(
                    puzzle.column_clues(),
                    column_clues(puzzle.solution()).as_slice()
                );
            }
        }
    }

    #[test]
    fn test_lookup() {
        let pack = get_pack_by_id("animals").unwrap();
        assert_eq!(pack.name, "Animals");
        assert_eq!(pack.description, "Cute pixel animals");

        let dog = get_puzzle_by_id("animals_4").unwrap();
        assert_eq!(dog.name(), Some("Dog"));
        assert_eq!(dog.size(), GridSize::Ten);
        assert_eq!(dog.difficulty(), Difficulty::Medium);

        assert!(get_pack_by_id("vehicles").is_none());
        assert!(get_puzzle_by_id("basic_99").is_none());
    }

    #[test]
    fn test_cross_clues() {
        let cross = get_puzzle_by_id("geometric_2").unwrap();
        let expected = vec![vec![1], vec![1], vec![5], vec![1], vec![1]];
        assert_eq!(cross.row_clues(), expected.as_slice());
        assert_eq!(cross.column_clues(), expected.as_slice());
    }

    #[test]
    fn test_checkerboard_clues() {
        let board = get_puzzle_by_id("geometric_3").unwrap();
        assert_eq!(board.row_clues()[0], vec![1; 5]);
        assert_eq!(board.column_clues()[9], vec![1; 5]);
    }
}
