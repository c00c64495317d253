//! Directory-driven batch runs.
//!
//! These helpers connect a [`DocumentLoader`] to the two pipelines: one
//! outline JSON per input document, or a single ranking over all of them.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentLoader, PersonaRequest, RankedOutput};
use crate::outline::extract_outline;
use crate::persona::{PersonaRanker, RankOptions};
use crate::render::{write_json, JsonFormat};

/// Fields that must be present in a persona request file.
const REQUIRED_FIELDS: [&str; 2] = ["persona", "job_to_be_done"];

/// Persona request looked up inside an input directory.
pub const PERSONA_FILE: &str = "persona.json";

/// Ranked output written inside an output directory.
pub const RANKED_FILE: &str = "output.json";

/// List the PDF files directly inside `dir`, sorted by file name.
///
/// The extension check is case-insensitive. Subdirectories are not walked.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

/// Output path for a document's outline: `<output_dir>/<stem>.json`.
pub fn outline_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Load one document, extract its outline and write it next to the others.
pub fn outline_file<L: DocumentLoader + ?Sized>(
    loader: &L,
    input: &Path,
    output_dir: &Path,
    format: JsonFormat,
) -> Result<PathBuf> {
    let doc = loader.load(input)?;
    write_outline(&doc, input, output_dir, format)
}

/// Extract the outline of an already loaded document and write it.
pub fn write_outline(
    doc: &Document,
    input: &Path,
    output_dir: &Path,
    format: JsonFormat,
) -> Result<PathBuf> {
    let path = outline_path(input, output_dir);
    write_json(&extract_outline(doc), &path, format)?;
    Ok(path)
}

/// Outcome of an outline batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in input order
    pub written: Vec<PathBuf>,
    /// Inputs that could not be processed
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    /// Check if every input was processed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write one outline JSON per input into `output_dir`.
///
/// A document that fails to load or write is logged and recorded in the
/// report; the remaining inputs are still processed. The output directory
/// is created if needed.
pub fn extract_outlines<L: DocumentLoader + ?Sized>(
    loader: &L,
    inputs: &[PathBuf],
    output_dir: &Path,
    format: JsonFormat,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    for input in inputs {
        match outline_file(loader, input, output_dir, format) {
            Ok(path) => report.written.push(path),
            Err(e) => {
                log::warn!("{}", e);
                report.failed.push((input.clone(), e));
            }
        }
    }
    Ok(report)
}

/// Read a persona request file.
///
/// A missing file or a missing top-level field is [`Error::MissingInput`];
/// malformed JSON or wrongly typed fields are [`Error::InvalidInput`].
pub fn load_persona_request(path: &Path) -> Result<PersonaRequest> {
    let data = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingInput(format!("{} not found", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    let value: Value = serde_json::from_str(&data)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(Error::MissingInput(format!(
                "{}: missing field `{}`",
                path.display(),
                field
            )));
        }
    }

    serde_json::from_value(value)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Load every input document, failing on the first one that cannot be read.
pub fn load_documents<L: DocumentLoader + ?Sized>(
    loader: &L,
    inputs: &[PathBuf],
) -> Result<Vec<Document>> {
    inputs.iter().map(|input| loader.load(input)).collect()
}

/// Load every input and rank their paragraphs for `request`.
pub fn rank_directory<L: DocumentLoader + ?Sized>(
    loader: &L,
    inputs: &[PathBuf],
    request: &PersonaRequest,
    options: RankOptions,
) -> Result<RankedOutput> {
    let documents = load_documents(loader, inputs)?;
    Ok(PersonaRanker::with_options(options).rank(&documents, request))
}

/// Outcome of [`process_directory`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Outline files written and inputs that failed
    pub outlines: BatchReport,
    /// Path of the ranked output, when a persona request was present
    pub ranked: Option<PathBuf>,
    /// Number of ranked sections written
    pub ranked_sections: usize,
}

/// Process an input directory in one pass.
///
/// Writes `<stem>.json` outlines for every PDF in `input_dir`. When
/// `input_dir` holds a [`PERSONA_FILE`], also ranks all documents into
/// [`RANKED_FILE`]. The persona file is validated before any document is
/// opened, and each document is loaded once for both pipelines.
///
/// Outline failures are recorded and skipped when there is no persona
/// request. With one, the first failure aborts the run before ranking.
pub fn process_directory<L: DocumentLoader + ?Sized>(
    loader: &L,
    input_dir: &Path,
    output_dir: &Path,
    options: RankOptions,
    format: JsonFormat,
) -> Result<RunReport> {
    let persona_path = input_dir.join(PERSONA_FILE);
    let request = if persona_path.is_file() {
        Some(load_persona_request(&persona_path)?)
    } else {
        None
    };

    let inputs = list_pdfs(input_dir)?;
    fs::create_dir_all(output_dir)?;

    let mut report = RunReport::default();
    let mut documents = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let processed = loader.load(input).and_then(|doc| {
            let path = write_outline(&doc, input, output_dir, format)?;
            Ok((doc, path))
        });
        match processed {
            Ok((doc, path)) => {
                report.outlines.written.push(path);
                documents.push(doc);
            }
            Err(e) => {
                log::warn!("{}", e);
                report.outlines.failed.push((input.clone(), e));
            }
        }
    }

    let Some(request) = request else {
        return Ok(report);
    };
    if let Some((_, e)) = report.outlines.failed.drain(..).next() {
        return Err(e);
    }

    let ranked = PersonaRanker::with_options(options).rank(&documents, &request);
    let path = output_dir.join(RANKED_FILE);
    write_json(&ranked, &path, format)?;
    report.ranked_sections = ranked.extracted_sections.len();
    report.ranked = Some(path);
    Ok(report)
}
