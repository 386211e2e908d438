//! The five operations the service exposes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::grid::Grid;
use crate::error::MatrixResult;

/// All available matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Return the matrix unchanged
    Echo,

    /// Swap rows and columns
    Transpose,

    /// All cells on one line
    Flatten,

    /// Sum of all cells
    Add,

    /// Product of all cells
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Transpose,
        Operation::Flatten,
        Operation::Add,
        Operation::Multiply,
    ];

    /// Apply this operation and render the response body.
    ///
    /// Takes the grid by value: transpose mutates it in place before
    /// echoing, so the caller never sees a half-used grid.
    pub fn apply(&self, mut grid: Grid) -> MatrixResult<String> {
        match self {
            Operation::Echo => Ok(grid.echo()),
            Operation::Transpose => {
                grid.transpose();
                Ok(grid.echo())
            }
            Operation::Flatten => Ok(grid.flatten()),
            Operation::Add => grid.add().map(|sum| sum.to_string()),
            Operation::Multiply => grid.multiply().map(|product| product.to_string()),
        }
    }

    /// Canonical name, as used by the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Transpose => "transpose",
            Operation::Flatten => "flatten",
            Operation::Add => "add",
            Operation::Multiply => "multiply",
        }
    }

    /// HTTP path serving this operation.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Echo => "/echo",
            Operation::Transpose => "/invert",
            Operation::Flatten => "/flatten",
            Operation::Add => "/add",
            Operation::Multiply => "/mul",
        }
    }

    /// Secondary HTTP path, if any.
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            Operation::Echo | Operation::Flatten => None,
            Operation::Transpose => Some("/transpose"),
            Operation::Add => Some("/sum"),
            Operation::Multiply => Some("/multiply"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "echo" => Ok(Operation::Echo),
            "transpose" | "invert" => Ok(Operation::Transpose),
            "flatten" => Ok(Operation::Flatten),
            "add" | "sum" | "addition" => Ok(Operation::Add),
            "multiply" | "mul" | "product" | "multiplication" => Ok(Operation::Multiply),
            other => Err(format!(
                "unknown operation '{}' (expected one of: echo, transpose, flatten, add, multiply)",
                other
            )),
        }
    }
}

/// Get description of all available operations
pub fn operations_description() -> String {
    r#"Available matrix operations:

| Operation | Endpoint              | Output                                      |
|-----------|-----------------------|---------------------------------------------|
| echo      | POST /echo            | The matrix as CSV, one row per line         |
| transpose | POST /invert          | The transposed matrix as CSV                |
| flatten   | POST /flatten         | All cells on one line, comma separated      |
| add       | POST /add             | Sum of all cells (integers only)            |
| multiply  | POST /mul             | Product of all cells (integers only)        |

Upload the matrix as multipart form field 'file':

  curl -F 'file=@matrix.csv' http://localhost:8080/echo"#
        .to_string()
}
