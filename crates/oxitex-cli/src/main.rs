use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxitex")]
#[command(about = "OxiTeX parser tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a LaTeX file and emit the syntax tree as JSON
    Parse {
        /// Path to the .tex file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Tokenize a file and emit the token stream as JSON
    Tokens {
        /// Path to the input file
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Use the math-mode token grammar
        #[arg(long)]
        math: bool,
    },
    /// Parse a math-mode expression and emit the syntax tree as JSON
    Math {
        /// The expression, e.g. "2 + (2^e * 4)"
        #[arg(value_name = "EXPR")]
        expr: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse { path } => {
            let content = fs::read_to_string(path)?;
            let root = oxitex_syntax::latex::parse(&content)?;
            println!("{}", serde_json::to_string_pretty(&root)?);
        }
        Commands::Tokens { path, math } => {
            let content = fs::read_to_string(path)?;
            if *math {
                let tokens = oxitex_math::tokenize(&content)?;
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                let tokens = oxitex_syntax::latex::tokenize(&content)?;
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            }
        }
        Commands::Math { expr } => {
            let root = oxitex_math::parse(expr)?;
            println!("{}", serde_json::to_string_pretty(&root)?);
        }
    }
    Ok(())
}
