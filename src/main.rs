//! Command-line interface for decompound-rs
//!
//! Usage:
//!   decompound [OPTIONS] [WORD]...
//!   echo "Autobahnfahrer" | decompound -d words.tsv
//!
//! Words are read from stdin (one per line) when none are given.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use decompound_rs::{
    normalize_word, AlgorithmKind, DecompoundedWord, DecompoundingTree, Splitter,
    SplitterAlgorithm, SplitterConfig,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Split compound words into their parts
#[derive(Parser, Debug)]
#[clap(name = "decompound", version)]
struct Args {
    /// Words to split; read from stdin when empty
    words: Vec<String>,

    /// JSON configuration file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// Resource pack directory
    #[clap(short = 'r', long)]
    resources: Option<PathBuf>,

    /// Dictionary TSV file or directory
    #[clap(short = 'd', long = "dict")]
    dictionary: Option<PathBuf>,

    /// Linking morpheme list
    #[clap(short = 'm', long)]
    morphemes: Option<PathBuf>,

    /// Splitting strategy
    #[clap(short = 'a', long, value_enum)]
    algorithm: Option<AlgorithmKind>,

    /// Maximum depth of the split tree
    #[clap(long)]
    max_depth: Option<usize>,

    /// Minimum length of a dictionary part
    #[clap(long)]
    min_word_length: Option<usize>,

    /// Remainders of this length or shorter are not split off
    #[clap(long)]
    min_rest_length: Option<usize>,

    /// Print every distinct split instead of the best one
    #[clap(long)]
    all: bool,

    /// Print the whole split tree
    #[clap(long, conflicts_with = "all")]
    tree: bool,

    /// Output as JSON lines
    #[clap(short = 'j', long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    word: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    best: Option<&'a DecompoundedWord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    splits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a DecompoundingTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<SplitterConfig, decompound_rs::ResourceError> {
    let mut config = match args.config {
        Some(ref path) => SplitterConfig::from_file(path)?,
        None => SplitterConfig::default(),
    };

    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if args.resources.is_some() {
        config.resources = args.resources.clone();
    }
    if args.dictionary.is_some() {
        config.dictionary = args.dictionary.clone();
    }
    if args.morphemes.is_some() {
        config.morphemes = args.morphemes.clone();
    }
    if args.max_depth.is_some() {
        config.max_tree_depth = args.max_depth;
    }
    if let Some(len) = args.min_word_length {
        config.min_word_length = len;
    }
    if let Some(len) = args.min_rest_length {
        config.min_rest_length = len;
    }
    Ok(config)
}

fn print_word(
    out: &mut impl Write,
    args: &Args,
    splitter: &Splitter,
    word: &str,
) -> io::Result<()> {
    let tree = match splitter.split(word) {
        Ok(tree) => tree,
        Err(err) => {
            // a word that cannot be split is printed as is
            tracing::warn!(word, error = %err, "decompounding not possible");
            if args.json {
                let record = JsonRecord {
                    word,
                    best: None,
                    splits: None,
                    tree: None,
                    error: Some(err.to_string()),
                };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            } else {
                writeln!(out, "{}\t{}", word, normalize_word(word.trim()))?;
            }
            return Ok(());
        }
    };

    if args.json {
        let record = JsonRecord {
            word,
            best: Some(tree.best_split()),
            splits: args
                .all
                .then(|| tree.all_splits().iter().map(ToString::to_string).collect()),
            tree: args.tree.then_some(&tree),
            error: None,
        };
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    } else if args.tree {
        write!(out, "{}", tree)?;
    } else if args.all {
        let splits: Vec<String> = tree.all_splits().iter().map(ToString::to_string).collect();
        writeln!(out, "{}\t{}", word, splits.join("\t"))?;
    } else {
        writeln!(out, "{}\t{}", word, tree.best_split())?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(args)?;
    let splitter = config.build_splitter()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                print_word(&mut out, args, &splitter, word)?;
            }
        }
    } else {
        for word in &args.words {
            print_word(&mut out, args, &splitter, word)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decompound_rs::{Dictionary, LeftToRightSplitter, LinkingMorphemes};

    fn render(args: &[&str], word: &str) -> String {
        let args = Args::parse_from(args);
        let splitter: Splitter = LeftToRightSplitter::new(
            Dictionary::from_words(["haus", "boot"]),
            LinkingMorphemes::default(),
        )
        .into();
        let mut out = Vec::new();
        print_word(&mut out, &args, &splitter, word).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_best_split_line() {
        assert_eq!(render(&["decompound"], "Hausboot"), "Hausboot\thaus+boot\n");
    }

    #[test]
    fn test_failed_word_printed_normalized() {
        // "a" followed by a combining diaeresis, composed on output
        let word = "Ha\u{0308}us+Boot";
        assert_eq!(
            render(&["decompound"], word),
            format!("{}\th\u{00e4}us+boot\n", word)
        );
    }

    #[test]
    fn test_failed_word_json() {
        let line = render(&["decompound", "--json"], "haus(boot");
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["word"], "haus(boot");
        assert!(value["error"].as_str().unwrap().contains("malformed fragment"));
        assert!(value.get("best").is_none());
    }
}
