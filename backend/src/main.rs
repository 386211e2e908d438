//! matrixops CLI
//!
//! ```bash
//! matrixops serve                       # Start HTTP server (port 8080)
//! matrixops apply transpose matrix.csv  # Run one operation locally
//! matrixops operations                  # Show available operations
//! ```

use clap::{Parser, Subcommand};
use matrixops::{operations_description, run_file, Operation, ServerConfig, ServerError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matrixops")]
#[command(about = "Echo, transpose, flatten, sum or multiply square CSV matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        #[command(flatten)]
        config: ServerConfig,
    },

    /// Run one operation on a CSV file and print the result
    Apply {
        /// echo, transpose, flatten, add or multiply
        operation: Operation,

        /// Input CSV file
        input: PathBuf,
    },

    /// Show available operations
    Operations,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config } => matrixops::server::start_server(config).await,
        Commands::Apply { operation, input } => cmd_apply(operation, &input),
        Commands::Operations => {
            println!("{}", operations_description());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn cmd_apply(operation: Operation, input: &std::path::Path) -> Result<(), ServerError> {
    let output = run_file(input, operation)?;
    print!("{}", output);
    Ok(())
}
