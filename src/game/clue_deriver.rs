use itertools::Itertools;

/// Run-length encodes the filled cells of a line.
///
/// An all-empty line yields `[0]`, never an empty list.
pub fn derive_clues(line: &[bool]) -> Vec<usize> {
    let runs = line.iter().chunk_by(|&&filled| filled);
    let clues: Vec<usize> = runs
        .into_iter()
        .filter(|(filled, _)| *filled)
        .map(|(_, run)| run.count())
        .collect();

    if clues.is_empty() {
        vec![0]
    } else {
        clues
    }
}

pub fn row_clues(solution: &[Vec<bool>]) -> Vec<Vec<usize>> {
    solution.iter().map(|row| derive_clues(row)).collect()
}

pub fn column_clues(solution: &[Vec<bool>]) -> Vec<Vec<usize>> {
    let n_cols = solution.first().map_or(0, Vec::len);
    (0..n_cols)
        .map(|col| {
            let column: Vec<bool> = solution.iter().map(|row| row[col]).collect();
            derive_clues(&column)
        })
        .collect()
}
