use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use arborist::driver::{
    self, AvlReport, DriverConfig, HuffmanReport, SegmentReport, DEFAULT_HUFFMAN_TEXT,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arborist", about = "AVL, Huffman and segment tree exercises")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Huffman code of every lowercase letter in TEXT.
    Huffman {
        /// Text to count letters in.
        #[arg(default_value = DEFAULT_HUFFMAN_TEXT)]
        text: String,
    },
    /// Time inserting and removing generated keys in an AVL tree.
    Avl {
        /// Number of keys (1..=N).
        #[arg(long, default_value_t = 999)]
        keys: u32,
        /// Key width; shorter keys are padded with '-'.
        #[arg(long, default_value_t = 30)]
        width: usize,
        /// Check every invariant after each insert and remove.
        #[arg(long)]
        check: bool,
    },
    /// Solve the car traversal problem for a move file.
    Segment {
        /// File with `num_moves solution` followed by the moves.
        file: PathBuf,
    },
    /// Run all three exercises with the default configuration.
    All {
        /// Move file for the segment exercise.
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Huffman { text } => print_huffman(&driver::run_huffman(&text)?),
        Commands::Avl { keys, width, check } => {
            let config = DriverConfig {
                avl_keys: keys,
                key_width: width,
                check_each_step: check,
                ..DriverConfig::default()
            };
            let report = driver::run_avl(&config)?;
            print_avl(&report);
            if !report.is_clean() {
                bail!("avl sweep failed");
            }
        }
        Commands::Segment { file } => print_segment(&driver::run_segment_file(&file)?),
        Commands::All { file } => {
            let config = DriverConfig {
                moves_path: file,
                ..DriverConfig::default()
            };
            let report = driver::run_all(&config).context("exercise run failed")?;
            println!("HUFFMAN TREE TEST:");
            print_huffman(&report.huffman);
            println!("AVL TREE TEST:");
            print_avl(&report.avl);
            if let Some(segment) = &report.segment {
                println!("SEGMENT TREE TEST:");
                print_segment(segment);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "arborist=debug" } else { "arborist=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_huffman(report: &HuffmanReport) {
    for (symbol, code) in &report.codes {
        println!("The character '{symbol}' is encoded as {code}");
    }
    println!("Encoded length: {} bits\n", report.encoded_bits);
}

fn print_avl(report: &AvlReport) {
    println!("Time to insert (in seconds): {:.6}", report.insert_time.as_secs_f64());
    for key in &report.missing {
        println!("NULL returned for: {key}");
    }
    for key in &report.wrong_value {
        println!("Wrong value returned for: {key}");
    }
    for key in &report.not_removed {
        println!("Failed to remove: {key}");
    }
    for violation in &report.violations {
        println!("Invariant violated: {violation}");
    }
    if report.leaked_nodes > 0 {
        println!("{} nodes left allocated", report.leaked_nodes);
    }
    println!("Time to remove (in seconds): {:.6}\n", report.remove_time.as_secs_f64());
}

fn print_segment(report: &SegmentReport) {
    println!("Your segment tree computed a solution of {}", report.computed);
    match (report.matches(), report.expected) {
        (Some(true), _) => println!("Matches the provided solution"),
        (Some(false), Some(expected)) => {
            println!("Does not match the provided solution of {expected}")
        }
        _ => {}
    }
}
