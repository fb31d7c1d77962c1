//! Batch processing of files and directory trees.
//!
//! File mode treats every non-blank line as an independent document. Output
//! is written as it is produced: a failure half-way through a file leaves the
//! lines already processed in the output file.
//!
//! Directory mode keeps going when a file fails and reports every failure in
//! the returned `BatchReport`.
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::format;
use crate::pipeline::Pipeline;

/// Appended to an input file name to name its output
pub const OUTPUT_SUFFIX: &str = ".out";

/// Filesystem metadata entries that are never treated as input documents
pub const IGNORED_FILE_NAMES: [&str; 3] = [".DS_Store", "Thumbs.db", "desktop.ini"];

static BUFFER_CAPACITY: usize = 1_048_576;

/// Is `file_name` a platform metadata file (including macOS `._*` resource forks)?
pub fn is_ignored(file_name: &str) -> bool {
  IGNORED_FILE_NAMES.contains(&file_name) || file_name.starts_with("._")
}

/// `<input>.out`, next to the input file
pub fn default_output_file(input: &Path) -> PathBuf {
  let mut name = input.as_os_str().to_owned();
  name.push(OUTPUT_SUFFIX);
  PathBuf::from(name)
}

/// `<output_dir>/<input file name>.out`
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
  let mut name = input
    .file_name()
    .map(|name| name.to_owned())
    .unwrap_or_default();
  name.push(OUTPUT_SUFFIX);
  output_dir.join(name)
}

/// Annotates every non-blank line of `reader` as one document and writes the
/// rendered result to `writer`, in line order. Returns the number of documents.
pub fn process_stream<R, W>(
  pipeline: &mut Pipeline,
  reader: R,
  writer: &mut W,
  label: &str,
) -> Result<usize>
where
  R: BufRead,
  W: Write,
{
  let format = pipeline.format();
  let mut documents = 0;
  for line in reader.lines() {
    let line = line.map_err(|e| Error::io(format!("reading {}", label), e))?;
    if line.trim().is_empty() {
      continue;
    }
    let annotation = pipeline.annotate(&line)?;
    format::write_annotation(writer, &annotation, format)
      .map_err(|e| Error::io(format!("writing output for {}", label), e))?;
    documents += 1;
  }
  Ok(documents)
}

/// File mode: annotates `input` line by line into `output`
pub fn process_file(pipeline: &mut Pipeline, input: &Path, output: &Path) -> Result<usize> {
  let reader = File::open(input)
    .map(BufReader::new)
    .map_err(|e| Error::io(format!("opening {}", input.display()), e))?;
  let output_file =
    File::create(output).map_err(|e| Error::io(format!("creating {}", output.display()), e))?;
  let mut writer = BufWriter::with_capacity(BUFFER_CAPACITY, output_file);

  info!("Start processing {}", input.display());
  let label = input.display().to_string();
  let outcome = process_stream(pipeline, reader, &mut writer, &label);
  // keep whatever was produced before a failure
  let flushed = writer
    .flush()
    .map_err(|e| Error::io(format!("writing {}", output.display()), e));
  let documents = outcome?;
  flushed?;
  info!("Wrote output to {}", output.display());
  Ok(documents)
}

/// The regular files of a directory tree, in a stable order
#[derive(Debug, Default)]
pub struct FileListing {
  /// files to process, sorted by path components
  pub files: Vec<PathBuf>,
  /// entries that could not be read during the walk
  pub unreadable: Vec<(PathBuf, Error)>,
}

/// Recursively lists the regular files under `dir`, skipping platform
/// metadata files. Fails only when `dir` itself is not a readable directory.
pub fn list_files(dir: &Path) -> Result<FileListing> {
  let metadata =
    fs::metadata(dir).map_err(|e| Error::io(format!("reading directory {}", dir.display()), e))?;
  if !metadata.is_dir() {
    return Err(Error::io(
      format!("reading directory {}", dir.display()),
      io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
    ));
  }
  let mut listing = FileListing::default();
  for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
    match entry {
      Ok(entry) => {
        if !entry.file_type().is_file() {
          continue;
        }
        if is_ignored(&entry.file_name().to_string_lossy()) {
          continue;
        }
        listing.files.push(entry.into_path());
      },
      Err(e) => {
        let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
        let context = format!("walking {}", path.display());
        let source = e
          .into_io_error()
          .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
        listing.unreadable.push((path, Error::io(context, source)));
      },
    }
  }
  Ok(listing)
}

/// The outcome of a directory run
#[derive(Debug, Default)]
pub struct BatchReport {
  /// `(input, output)` pairs processed successfully, in walk order
  pub processed: Vec<(PathBuf, PathBuf)>,
  /// inputs that failed, with the reason
  pub failures: Vec<(PathBuf, Error)>,
}

impl BatchReport {
  /// True when no file failed
  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }

  /// Turns a report with failures into an `Error::Batch`
  pub fn into_result(self) -> Result<Self> {
    if self.is_success() {
      Ok(self)
    } else {
      Err(Error::Batch {
        attempted: self.processed.len() + self.failures.len(),
        failures: self.failures,
      })
    }
  }

  fn record(&mut self, input: PathBuf, output: PathBuf, outcome: Result<usize>) {
    match outcome {
      Ok(_) => self.processed.push((input, output)),
      Err(e) => {
        warn!("failed to process {}: {}", input.display(), e);
        self.failures.push((input, e));
      },
    }
  }
}

/// Lists the inputs, prepares the output directory and pairs every input with
/// its output path. Inputs whose output name is already taken are reported as
/// failures instead of overwriting an earlier result.
fn plan(input_dir: &Path, output_dir: &Path) -> Result<(Vec<(PathBuf, PathBuf)>, BatchReport)> {
  let listing = list_files(input_dir)?;
  fs::create_dir_all(output_dir)
    .map_err(|e| Error::io(format!("creating directory {}", output_dir.display()), e))?;

  let mut report = BatchReport::default();
  for (path, error) in listing.unreadable {
    report.record(path.clone(), path, Err(error));
  }
  let mut taken = HashSet::new();
  let mut pairs = Vec::with_capacity(listing.files.len());
  for input in listing.files {
    let output = output_path(&input, output_dir);
    if taken.insert(output.clone()) {
      pairs.push((input, output));
    } else {
      let collision = Error::io(
        format!("writing {}", output.display()),
        io::Error::new(
          io::ErrorKind::AlreadyExists,
          "another input file has the same name",
        ),
      );
      report.record(input, output, Err(collision));
    }
  }
  Ok((pairs, report))
}

/// Directory mode: runs file mode on every file under `input_dir`, writing
/// `<file name>.out` files into `output_dir`
pub fn process_dir(
  pipeline: &mut Pipeline,
  input_dir: &Path,
  output_dir: &Path,
) -> Result<BatchReport> {
  let (pairs, mut report) = plan(input_dir, output_dir)?;
  for (input, output) in pairs {
    let outcome = process_file(pipeline, &input, &output);
    report.record(input, output, outcome);
  }
  Ok(report)
}

/// Directory mode over `jobs` worker threads. Each worker builds its own
/// pipeline with `factory` and processes a contiguous share of the files;
/// the report keeps the walk order.
pub fn process_dir_parallel<F>(
  factory: F,
  input_dir: &Path,
  output_dir: &Path,
  jobs: usize,
) -> Result<BatchReport>
where
  F: Fn() -> Result<Pipeline> + Sync + Send,
{
  let jobs = jobs.max(1);
  let (pairs, mut report) = plan(input_dir, output_dir)?;
  if pairs.is_empty() {
    return Ok(report);
  }
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(jobs)
    .build()
    .map_err(|e| Error::invalid(format!("cannot start {} workers: {}", jobs, e)))?;
  let share = (pairs.len() + jobs - 1) / jobs;

  let outcomes: Vec<Vec<Result<usize>>> = pool.install(|| {
    pairs
      .par_chunks(share)
      .map(|chunk| -> Vec<Result<usize>> {
        match factory() {
          Ok(mut pipeline) => chunk
            .iter()
            .map(|(input, output)| process_file(&mut pipeline, input, output))
            .collect(),
          Err(e) => chunk
            .iter()
            .map(|_| Err(Error::invalid(format!("building worker pipeline: {}", e))))
            .collect(),
        }
      })
      .collect()
  });

  for ((input, output), outcome) in pairs.into_iter().zip(outcomes.into_iter().flatten()) {
    report.record(input, output, outcome);
  }
  Ok(report)
}
