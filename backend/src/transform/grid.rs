//! The square grid of text cells every operation works on.

use crate::error::{MatrixError, MatrixResult};

const ADDITION: &str = "addition";
const MULTIPLICATION: &str = "multiplication";

/// An N×N matrix of trimmed text cells, N ≥ 1.
///
/// Only [`Grid::try_from_rows`] builds one, so every value upholds the
/// square invariant. [`Grid::transpose`] is the only mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Validate and sanitize raw rows.
    ///
    /// Checks run in order: no rows, then each row's length against the row
    /// count. Cells are trimmed only once both checks pass.
    pub fn try_from_rows(mut rows: Vec<Vec<String>>) -> MatrixResult<Self> {
        if rows.is_empty() {
            return Err(MatrixError::EmptyMatrix);
        }

        let size = rows.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(MatrixError::NotSquare {
                row: index + 1,
                expected: size,
                found: row.len(),
            });
        }

        for cell in rows.iter_mut().flatten() {
            let trimmed = cell.trim();
            if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
            }
        }

        Ok(Self { cells: rows })
    }

    /// Row and column count.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Cells in row-major order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().flatten().map(String::as_str)
    }

    /// Each row joined by `,` and terminated by `\n`, the last one included.
    pub fn echo(&self) -> String {
        let mut out = String::new();
        for row in &self.cells {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// Transpose in place: rows become columns.
    ///
    /// Returns nothing; call [`Grid::echo`] to observe the result.
    pub fn transpose(&mut self) {
        let size = self.size();
        for row in 0..size {
            for col in (row + 1)..size {
                let (upper, lower) = self.cells.split_at_mut(col);
                std::mem::swap(&mut upper[row][col], &mut lower[0][row]);
            }
        }
    }

    /// All cells, row-major, joined by `,`. No newline.
    pub fn flatten(&self) -> String {
        self.cells().collect::<Vec<_>>().join(",")
    }

    /// Sum of all cells parsed as integers.
    ///
    /// Partial sums may leave the i64 range; only the final value has to
    /// fit.
    pub fn add(&self) -> MatrixResult<i64> {
        let values = self.parse_integers(ADDITION)?;
        let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
        i64::try_from(sum).map_err(|_| MatrixError::Overflow { operation: ADDITION })
    }

    /// Product of all cells parsed as integers.
    ///
    /// A zero factor wins over any overflow. Without one the magnitude never
    /// shrinks, so an overflowing step means the final value is out of range.
    pub fn multiply(&self) -> MatrixResult<i64> {
        let values = self.parse_integers(MULTIPLICATION)?;
        if values.contains(&0) {
            return Ok(0);
        }
        values.iter().try_fold(1i64, |acc, &v| {
            acc.checked_mul(v)
                .ok_or(MatrixError::Overflow { operation: MULTIPLICATION })
        })
    }

    /// Parse every cell, failing on the first one that is not an integer.
    fn parse_integers(&self, operation: &'static str) -> MatrixResult<Vec<i64>> {
        self.cells()
            .map(|cell| {
                cell.parse().map_err(|_| MatrixError::NonInteger {
                    operation,
                    value: cell.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_ints(rows: &[&[i64]]) -> Grid {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        Grid::try_from_rows(rows).unwrap()
    }

    fn grid_from_strs(rows: &[&[&str]]) -> Grid {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        Grid::try_from_rows(rows).unwrap()
    }

    #[test]
    fn test_echo() {
        let grid = grid_from_ints(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(grid.echo(), "1,2,3\n4,5,6\n7,8,9\n");

        let single = grid_from_ints(&[&[42]]);
        assert_eq!(single.echo(), "42\n");
    }

    #[test]
    fn test_transpose() {
        let mut grid = grid_from_ints(&[&[1, 2, 3], &[0, -5, 8], &[9, 4, 11]]);
        grid.transpose();
        assert_eq!(grid.echo(), "1,0,9\n2,-5,4\n3,8,11\n");
    }

    #[test]
    fn test_transpose_diagonal_unchanged() {
        let mut grid = grid_from_ints(&[&[4, 0, 0], &[0, -3, 0], &[0, 0, 7]]);
        grid.transpose();
        assert_eq!(grid.echo(), "4,0,0\n0,-3,0\n0,0,7\n");
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let original = grid_from_strs(&[
            &["a", "b", "c", "d"],
            &["e", "f", "g", "h"],
            &["i", "j", "k", "l"],
            &["m", "n", "o", "p"],
        ]);
        let mut grid = original.clone();
        grid.transpose();
        assert_ne!(grid, original);
        grid.transpose();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_flatten() {
        let grid = grid_from_ints(&[&[-2, 0], &[5, 9]]);
        assert_eq!(grid.flatten(), "-2,0,5,9");

        let grid = grid_from_ints(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        let flat = grid.flatten();
        assert_eq!(flat, "1,2,3,4,5,6,7,8,9");
        assert_eq!(flat.split(',').count(), grid.size() * grid.size());
        assert!(flat.split(',').eq(grid.cells()));
    }

    #[test]
    fn test_add() {
        assert_eq!(grid_from_ints(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]).add(), Ok(45));
        assert_eq!(grid_from_ints(&[&[-2, 4], &[-3, 6]]).add(), Ok(5));
        assert_eq!(grid_from_ints(&[&[0, 0], &[0, 0]]).add(), Ok(0));
        assert_eq!(grid_from_ints(&[&[7]]).add(), Ok(7));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(
            grid_from_ints(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]).multiply(),
            Ok(362880)
        );
        assert_eq!(grid_from_ints(&[&[7, 0], &[3, 5]]).multiply(), Ok(0));
        assert_eq!(grid_from_ints(&[&[-1, 2], &[3, 4]]).multiply(), Ok(-24));
        assert_eq!(grid_from_ints(&[&[-1, -2], &[3, 4]]).multiply(), Ok(24));
    }

    #[test]
    fn test_non_integer_cells() {
        let grid = grid_from_strs(&[&["1", "two"], &["3", "4"]]);

        let err = grid.add().unwrap_err();
        assert!(matches!(err, MatrixError::NonInteger { operation: "addition", .. }));
        assert!(err.to_string().contains("addition"));

        let err = grid.multiply().unwrap_err();
        assert!(err.to_string().contains("multiplication"));
    }

    #[test]
    fn test_empty_cell_is_not_an_integer() {
        let grid = grid_from_strs(&[&["1", ""], &["3", "4"]]);
        assert!(matches!(grid.add(), Err(MatrixError::NonInteger { .. })));
    }

    #[test]
    fn test_plus_sign_accepted() {
        let grid = grid_from_strs(&[&["+2", "3"], &["-1", "0"]]);
        assert_eq!(grid.add(), Ok(4));
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = i64::MAX.to_string();
        let grid = grid_from_strs(&[&[max.as_str(), "1"], &["0", "0"]]);
        assert_eq!(
            grid.add(),
            Err(MatrixError::Overflow { operation: "addition" })
        );

        let grid = grid_from_strs(&[&[max.as_str(), "2"], &["1", "1"]]);
        assert_eq!(
            grid.multiply(),
            Err(MatrixError::Overflow { operation: "multiplication" })
        );
    }

    #[test]
    fn test_non_integer_after_large_prefix() {
        let max = i64::MAX.to_string();
        let grid = grid_from_strs(&[&[max.as_str(), "2"], &["x", "1"]]);

        assert_eq!(
            grid.add(),
            Err(MatrixError::NonInteger {
                operation: "addition",
                value: "x".into()
            })
        );
        assert_eq!(
            grid.multiply(),
            Err(MatrixError::NonInteger {
                operation: "multiplication",
                value: "x".into()
            })
        );
    }

    #[test]
    fn test_non_integer_fails_both_operations_anywhere() {
        let min = i64::MIN.to_string();
        let layouts: [&[&[&str]]; 4] = [
            &[&["abc"]],
            &[&["1.5", "2"], &["3", "4"]],
            &[&[min.as_str(), min.as_str()], &["0", "9x"]],
            &[&["1", "2", "3"], &["4", "5", "6"], &["7", "8", "99999999999999999999"]],
        ];

        for rows in layouts {
            let grid = grid_from_strs(rows);
            assert!(matches!(grid.add(), Err(MatrixError::NonInteger { operation: "addition", .. })));
            assert!(matches!(
                grid.multiply(),
                Err(MatrixError::NonInteger { operation: "multiplication", .. })
            ));
        }
    }

    #[test]
    fn test_zero_factor_after_overflowing_prefix() {
        let max = i64::MAX.to_string();
        let grid = grid_from_strs(&[&[max.as_str(), "2"], &["0", "1"]]);
        assert_eq!(grid.multiply(), Ok(0));
    }

    #[test]
    fn test_sum_fits_after_intermediate_overflow() {
        let max = i64::MAX.to_string();
        let grid = grid_from_strs(&[&[max.as_str(), "1"], &["-1", "0"]]);
        assert_eq!(grid.add(), Ok(i64::MAX));

        let min = i64::MIN.to_string();
        let grid = grid_from_strs(&[&[min.as_str(), "-1"], &["1", "0"]]);
        assert_eq!(grid.add(), Ok(i64::MIN));
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        assert_eq!(Grid::try_from_rows(vec![]), Err(MatrixError::EmptyMatrix));

        let rows = vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string()]];
        assert_eq!(
            Grid::try_from_rows(rows),
            Err(MatrixError::NotSquare {
                row: 2,
                expected: 2,
                found: 1
            })
        );
    }
}
