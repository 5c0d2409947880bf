use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use paperlens_core::{
    Config, PdfBackend, PipelineState, SelectOutcome, Status, TextExtractor, messages,
};
use paperlens_pdf_mupdf::MupdfBackend;

mod input;
mod output;

use output::ColorMode;

/// paperlens - Summarize academic research papers with a generative AI service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a PDF's text and print the structured summary
    Analyze {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// API key (overrides API_KEY / VITE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the text that would be sent for analysis, without calling the service
    Extract {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file_path,
            json,
            no_color,
            model,
            api_key,
            output,
        } => analyze(file_path, json, no_color, model, api_key, output).await,
        Command::Extract {
            file_path,
            no_color,
            output,
        } => extract(file_path, no_color, output).await,
    }
}

fn open_writer(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    })
}

async fn analyze(
    file_path: PathBuf,
    json: bool,
    no_color: bool,
    model: Option<String>,
    api_key: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let mut config = Config::load();
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key);
    }
    tracing::debug!(?config, "resolved configuration");

    let upload = input::read_upload(&file_path)?;
    let file_name = upload.filename.clone();

    let color = ColorMode(!no_color && !json && output.is_none());
    let mut writer = open_writer(output.as_deref())?;

    let backend: Arc<dyn PdfBackend> = Arc::new(MupdfBackend::new());
    let controller = config.build_controller(backend);

    let spinner = if json { None } else { Some(spinner()) };
    let progress = spinner.clone().map(|bar| {
        let mut rx = controller.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().status();
                match status {
                    Status::Extracting => bar.set_message(messages::STATUS_EXTRACTING),
                    Status::Analyzing => bar.set_message(messages::STATUS_ANALYZING),
                    _ => break,
                }
            }
            bar.finish_and_clear();
        })
    });

    let outcome = controller.select_file(upload).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    if let Some(task) = progress {
        task.abort();
    }

    match outcome {
        SelectOutcome::NotPdf => anyhow::bail!("{}: {}", file_path.display(), messages::NOT_A_PDF),
        SelectOutcome::Busy(status) => {
            anyhow::bail!("pipeline unexpectedly busy ({})", status)
        }
        SelectOutcome::Finished(PipelineState::Completed(analysis)) => {
            if json {
                serde_json::to_writer_pretty(&mut writer, &analysis)?;
                writeln!(writer)?;
            } else {
                output::print_analysis(&mut writer, &file_name, &analysis, color)?;
            }
            Ok(())
        }
        SelectOutcome::Finished(state) => {
            anyhow::bail!("{}", state.error().unwrap_or(messages::UNEXPECTED_ERROR))
        }
    }
}

async fn extract(file_path: PathBuf, no_color: bool, output: Option<PathBuf>) -> anyhow::Result<()> {
    let upload = input::read_upload(&file_path)?;
    if !upload.is_pdf() {
        anyhow::bail!("{}: {}", file_path.display(), messages::NOT_A_PDF);
    }

    let color = ColorMode(!no_color && output.is_none());
    let mut writer = open_writer(output.as_deref())?;

    let extractor = TextExtractor::new(Arc::new(MupdfBackend::new()));
    let extracted = extractor
        .extract_blocking(upload.data)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", messages::EXTRACTION_FAILED, e))?;

    output::print_extracted(&mut writer, &extracted, color)?;
    Ok(())
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
