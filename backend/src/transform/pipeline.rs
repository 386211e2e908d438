//! Load + apply in one call.
//!
//! Shared by the HTTP handlers and the CLI so both produce byte-identical
//! output for the same input.
//!
//! # Example
//!
//! ```
//! use matrixops::{run_bytes, Operation};
//!
//! let out = run_bytes(b"1,2\n3,4\n", Operation::Transpose).unwrap();
//! assert_eq!(out, "1,3\n2,4\n");
//! ```

use std::path::Path;

use super::operations::Operation;
use crate::error::MatrixResult;
use crate::parser::{load_grid, load_grid_file};

/// Run an operation on raw CSV bytes.
pub fn run_bytes(bytes: &[u8], operation: Operation) -> MatrixResult<String> {
    let grid = load_grid(bytes)?;
    operation.apply(grid)
}

/// Run an operation on a CSV file.
pub fn run_file(path: &Path, operation: Operation) -> MatrixResult<String> {
    let grid = load_grid_file(path)?;
    operation.apply(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;

    const SAMPLE: &[u8] = b"1,2,3\n4,5,6\n7,8,9\n";

    #[test]
    fn test_scenarios() {
        assert_eq!(run_bytes(SAMPLE, Operation::Echo).unwrap(), "1,2,3\n4,5,6\n7,8,9\n");
        assert_eq!(
            run_bytes(SAMPLE, Operation::Transpose).unwrap(),
            "1,4,7\n2,5,8\n3,6,9\n"
        );
        assert_eq!(run_bytes(SAMPLE, Operation::Flatten).unwrap(), "1,2,3,4,5,6,7,8,9");
        assert_eq!(run_bytes(SAMPLE, Operation::Add).unwrap(), "45");
        assert_eq!(run_bytes(SAMPLE, Operation::Multiply).unwrap(), "362880");
    }

    #[test]
    fn test_loader_errors_win_over_operation() {
        for op in Operation::ALL {
            assert_eq!(run_bytes(b"", op), Err(MatrixError::EmptyMatrix));
            assert!(matches!(
                run_bytes(b"1,2,3\n4,5\n7,8,9\n", op),
                Err(MatrixError::NotSquare { .. })
            ));
        }
    }

    #[test]
    fn test_non_integer_names_operation() {
        let input = b"1,two\n3,4\n";

        let err = run_bytes(input, Operation::Add).unwrap_err();
        assert!(err.to_string().contains("addition"));

        let err = run_bytes(input, Operation::Multiply).unwrap_err();
        assert!(err.to_string().contains("multiplication"));

        // text operations never parse integers
        assert_eq!(run_bytes(input, Operation::Flatten).unwrap(), "1,two,3,4");
    }

    #[test]
    fn test_echo_round_trip() {
        let input = b" a ,b,c\nd, e ,f\ng,h,i \n";
        let echoed = run_bytes(input, Operation::Echo).unwrap();
        let reparsed = run_bytes(echoed.as_bytes(), Operation::Echo).unwrap();
        assert_eq!(echoed, reparsed);
        assert_eq!(echoed, "a,b,c\nd,e,f\ng,h,i\n");
    }

    #[test]
    fn test_run_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        assert_eq!(run_file(&path, Operation::Add).unwrap(), "45");
    }
}
