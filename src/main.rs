//! Command-line interface for vncorenlp.
//!
//! Usage:
//!   vncorenlp --fin `<file>` [--fout `<file>`] [-f inline|column] [-a wseg,pos,ner,parse]
//!   vncorenlp --din `<dir>` [--dout `<dir>`] [-f inline|column] [-a wseg,pos,ner,parse] [-j N]
use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vncorenlp::batch;
use vncorenlp::stage::DEFAULT_ANNOTATORS;
use vncorenlp::{Pipeline, PipelineConfig};

const EXAMPLES: &str = "\
Example:
With file:
  vncorenlp --fin sample_input.txt --fout output.txt
  vncorenlp --format column --fin sample_input.txt --fout output.txt
  vncorenlp --format column --annotators wseg,pos,ner --fin sample_input.txt --fout output.txt
With directory:
  vncorenlp --din sample_input/ --dout output/
  vncorenlp --format column --din sample_input/ --dout output/
  vncorenlp --format column --annotators wseg,pos,ner --din sample_input/ --dout output/";

#[derive(Parser, Debug)]
#[command(
  name = "vncorenlp",
  version,
  about = "Annotate Vietnamese text: word segmentation, POS tagging, NER and dependency parsing",
  after_help = EXAMPLES
)]
struct Cli {
  /// Path to input file
  #[arg(long, value_name = "FILE")]
  fin: Option<PathBuf>,

  /// Path to output file (optional, default: fin-name.out)
  #[arg(long, value_name = "FILE")]
  fout: Option<PathBuf>,

  /// Path to input directory
  #[arg(long, value_name = "DIR")]
  din: Option<PathBuf>,

  /// Path to output directory (optional, default: din/*.out)
  #[arg(long, value_name = "DIR")]
  dout: Option<PathBuf>,

  /// Output format: column or inline
  #[arg(short, long, default_value = "inline")]
  format: String,

  /// The annotators to run over a given sentence
  #[arg(short, long, value_name = "ANNOTATORS", default_value = DEFAULT_ANNOTATORS)]
  annotators: String,

  /// Directory holding the collaborator resources
  #[arg(long, value_name = "DIR", env = "VNCORENLP_MODELS", default_value = "models")]
  models: PathBuf,

  /// Worker threads for directory mode
  #[arg(short, long, default_value_t = 1)]
  jobs: usize,

  /// Log stage initialization and per-file details
  #[arg(short, long)]
  verbose: bool,
}

fn print_usage() {
  let _ = Cli::command().print_help();
  println!();
}

fn init_logging(verbose: bool) {
  let default_filter = if verbose {
    "vncorenlp=debug"
  } else {
    "vncorenlp=info"
  };
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into()),
    )
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal()),
    )
    .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
  // validate everything before touching a model or a file
  let config = PipelineConfig::from_options(Some(&cli.annotators), Some(&cli.format))?
    .with_models_dir(cli.models.clone());

  match (cli.fin, cli.din) {
    (None, None) => {
      println!("Missing input!");
      print_usage();
    },
    (Some(_), Some(_)) => {
      println!("Many inputs!");
      print_usage();
    },
    (Some(fin), None) => {
      let fout = cli.fout.unwrap_or_else(|| batch::default_output_file(&fin));
      let mut pipeline = Pipeline::new(config).context("initializing the pipeline")?;
      batch::process_file(&mut pipeline, &fin, &fout)?;
    },
    (None, Some(din)) => {
      let dout = cli.dout.unwrap_or_else(|| din.clone());
      let report = if cli.jobs > 1 {
        batch::process_dir_parallel(|| Pipeline::new(config.clone()), &din, &dout, cli.jobs)?
      } else {
        let mut pipeline = Pipeline::new(config).context("initializing the pipeline")?;
        batch::process_dir(&mut pipeline, &din, &dout)?
      };
      info!(
        "{} files processed, {} failed",
        report.processed.len(),
        report.failures.len()
      );
      report.into_result()?;
    },
  }
  Ok(())
}

fn main() {
  if std::env::args_os().len() <= 1 {
    print_usage();
    return;
  }
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => match e.kind() {
      ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
        let _ = e.print();
        return;
      },
      _ => {
        let _ = e.print();
        print_usage();
        process::exit(1);
      },
    },
  };
  init_logging(cli.verbose);

  let start = Instant::now();
  if let Err(e) = run(cli) {
    error!("{:#}", e);
    process::exit(1);
  }
  info!("finished in {:?}", start.elapsed());
}
