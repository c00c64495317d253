//! docoutline CLI - PDF outline extraction and persona ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docoutline::batch::{self, outline_path};
use docoutline::render::{to_json, write_json};
use docoutline::{
    extract_outline, load_persona_request, DocumentLoader, HeadingLevelMap, JsonFormat,
    ParseOptions, PdfLoader, PersonaRanker, RankOptions,
};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a persona", long_about = None)]
struct Cli {
    /// Input PDF file or directory
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and heading outline as JSON
    Outline {
        /// Input PDF file or directory of PDFs
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file, or directory for one JSON per document
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip unreadable pages instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Rank paragraphs of a directory of PDFs for a persona
    Rank {
        /// Directory containing the PDFs
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,

        /// Persona request JSON file
        #[arg(short, long, value_name = "FILE")]
        persona: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of sections to keep
        #[arg(long, default_value = "20")]
        top: usize,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Process an input directory in one go: outlines, then ranking if persona.json exists
    Run {
        /// Input directory
        #[arg(long, value_name = "DIR", env = "DOCOUTLINE_INPUT", default_value = "input")]
        input: PathBuf,

        /// Output directory
        #[arg(long, value_name = "DIR", env = "DOCOUTLINE_OUTPUT", default_value = "output")]
        output: PathBuf,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            lenient,
        }) => cmd_outline(&input, output.as_deref(), compact, lenient),
        Some(Commands::Rank {
            input,
            persona,
            output,
            top,
            compact,
        }) => cmd_rank(&input, &persona, output.as_deref(), top, compact),
        Some(Commands::Run { input, output }) => cmd_run(&input, &output),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(&input, cli.output.as_deref(), false, false)
            } else {
                println!("{}", "Usage: docoutline <INPUT> [OUTPUT]".yellow());
                println!("       docoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn progress_bar(len: usize) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_outline(input: &Path, output: Option<&Path>, compact: bool, lenient: bool) -> CliResult {
    let mut options = ParseOptions::new();
    if lenient {
        options = options.lenient();
    }
    let loader = PdfLoader::with_options(options);
    let format = json_format(compact);

    if input.is_dir() {
        let output_dir = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("output"));
        return outline_directory(&loader, input, &output_dir, format);
    }

    let doc = loader.load(input)?;
    let result = extract_outline(&doc);

    match output {
        Some(path) if path.is_dir() => {
            let target = outline_path(input, path);
            write_json(&result, &target, format)?;
            println!("{} {}", "Saved to".green(), target.display());
        }
        Some(path) => {
            write_json(&result, path, format)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", to_json(&result, format)?),
    }

    Ok(())
}

fn outline_directory(
    loader: &PdfLoader,
    input: &Path,
    output_dir: &Path,
    format: JsonFormat,
) -> CliResult {
    let pdfs = batch::list_pdfs(input)?;
    if pdfs.is_empty() {
        println!("{} {}", "No PDF files in".yellow(), input.display());
        return Ok(());
    }
    fs::create_dir_all(output_dir)?;

    let pb = progress_bar(pdfs.len())?;
    let mut failed = 0;
    for pdf in &pdfs {
        pb.set_message(file_label(pdf));
        if let Err(e) = batch::outline_file(loader, pdf, output_dir, format) {
            pb.println(format!("{} {}", "Skipped".yellow(), e));
            failed += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} documents written to {}",
        "Outlines:".green().bold(),
        pdfs.len() - failed,
        pdfs.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_rank(
    input: &Path,
    persona: &Path,
    output: Option<&Path>,
    top: usize,
    compact: bool,
) -> CliResult {
    // Validate the request before touching any document
    let request = load_persona_request(persona)?;
    let pdfs = batch::list_pdfs(input)?;

    let loader = PdfLoader::new();
    let pb = progress_bar(pdfs.len())?;
    let mut documents = Vec::with_capacity(pdfs.len());
    for pdf in &pdfs {
        pb.set_message(file_label(pdf));
        documents.push(loader.load(pdf)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let ranker = PersonaRanker::with_options(RankOptions::new().with_top_n(top));
    let ranked = ranker.rank(&documents, &request);
    let format = json_format(compact);

    if let Some(path) = output {
        write_json(&ranked, path, format)?;
        println!(
            "{} {} sections to {}",
            "Ranked".green(),
            ranked.extracted_sections.len(),
            path.display()
        );
    } else {
        println!("{}", to_json(&ranked, format)?);
    }

    Ok(())
}

fn cmd_run(input: &Path, output: &Path) -> CliResult {
    log::debug!("run: input={} output={}", input.display(), output.display());
    let loader = PdfLoader::with_options(ParseOptions::new().lenient());

    let report = batch::process_directory(
        &loader,
        input,
        output,
        RankOptions::default(),
        JsonFormat::Pretty,
    )?;

    let outlines = &report.outlines;
    println!(
        "{} {} of {} PDF files in {}",
        "Outlined".cyan(),
        outlines.written.len(),
        outlines.written.len() + outlines.failed.len(),
        input.display()
    );
    for path in &outlines.written {
        println!("  {} {}", "├─".dimmed(), file_label(path));
    }
    for (path, e) in &outlines.failed {
        println!("  {} {}: {}", "✗".red(), file_label(path), e);
    }

    match &report.ranked {
        Some(target) => println!(
            "{} {} sections to {}",
            "Ranked".green().bold(),
            report.ranked_sections,
            target.display()
        ),
        None => println!(
            "{}",
            format!("No {} found, skipping ranking", batch::PERSONA_FILE).dimmed()
        ),
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    // Lenient: show what we can even if some pages fail
    let loader = PdfLoader::with_options(ParseOptions::new().lenient());
    let doc = loader.load(input)?;
    let levels = HeadingLevelMap::from_document(&doc);
    let result = extract_outline(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Spans".bold(), doc.span_count());
    println!("{}: {}", "Title".bold(), result.title);
    println!("{}: {}", "Outline items".bold(), result.outline.len());

    println!();
    println!("{}", "Heading Levels".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (size, level) in levels.iter() {
        println!("  {:<4} {:>6.1}pt", level.to_string().bold(), size);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona ranking tool");
    println!();
    println!("License: MIT");
}
