//! oasrpc CLI entrypoint
//! Parses command-line arguments and dispatches to the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use oasrpc::application::{
    ApplicationError, GenerateRequest, GenerateUseCase, ValidateUseCase,
};
use oasrpc::config::ConfigOverrides;
use oasrpc::generation::{
    ArtifactWriter, ConventionValidator, GenerationOrchestrator, SourceFormatter,
};
use oasrpc::infrastructure::{
    CompositeFormatter, DryRunOutput, FileOpenApiLoader, FileSystemOutputService, GofmtFormatter,
    NormalizingFormatter, ShellCommandExecutor, TeraTemplateRenderer,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// Exit status for any resolution, validation, extraction, render or write failure
const FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "oasrpc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug details of extraction and classification
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate client, server and protobuf artifacts from an OpenAPI document
    Generate(GenerateArgs),
    /// Check an OpenAPI document against the RPC convention
    Validate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(default_value = "openapi.yaml")]
        spec: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to the OpenAPI document (YAML or JSON)
    #[arg(default_value = "openapi.yaml")]
    spec: PathBuf,
    /// Package name of the generated sources
    #[arg(long)]
    package: Option<String>,
    /// Output directory (must exist)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Protobuf file path, relative to the output directory
    #[arg(long)]
    proto_path: Option<String>,
    /// Import path of the code generated from the protobuf file
    #[arg(long)]
    proto_import: Option<String>,
    /// Protobuf package namespace
    #[arg(long)]
    proto_package: Option<String>,
    /// Vendor prefix of the derived protobuf namespace
    #[arg(long)]
    vendor: Option<String>,
    /// Also scaffold the daemon, service stubs, tests, Makefile and buf configuration
    #[arg(long)]
    full: bool,
    /// Settings file (defaults to the nearest oasrpc.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Generate even when the document violates the convention
    #[arg(long)]
    skip_validation: bool,
    /// Report what would be written without touching the filesystem
    #[arg(long)]
    dry_run: bool,
    /// Pipe generated Go sources through gofmt
    #[arg(long)]
    gofmt: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            if let Some(app) = e.downcast_ref::<ApplicationError>() {
                for violation in app.violations() {
                    eprintln!("  {violation}");
                }
            }
            eprintln!("error: {e:#}");
            ExitCode::from(FAILURE)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Generate(args) => generate(args),
        Commands::Validate { spec } => validate(spec),
    }
}

fn generate(args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let renderer = TeraTemplateRenderer::new().context("Failed to load embedded templates")?;
    let mut formatters: Vec<Arc<dyn SourceFormatter>> = vec![Arc::new(NormalizingFormatter::new())];
    if args.gofmt {
        formatters.push(Arc::new(GofmtFormatter::new(Arc::new(
            ShellCommandExecutor::new(),
        ))));
    }
    let writer: Arc<dyn ArtifactWriter> = if args.dry_run {
        Arc::new(DryRunOutput::new())
    } else {
        Arc::new(FileSystemOutputService::new())
    };

    let orchestrator = GenerationOrchestrator::new(
        Arc::new(renderer),
        Arc::new(CompositeFormatter::new(formatters)),
        writer,
    );
    let use_case = GenerateUseCase::new(
        Arc::new(FileOpenApiLoader::new()),
        Arc::new(ConventionValidator::new()),
        Arc::new(orchestrator),
    );

    let mut request = GenerateRequest::new(&args.spec, chrono::Utc::now());
    request.overrides = ConfigOverrides {
        package_name: args.package,
        output_dir: args.output,
        artifact_path: args.proto_path,
        proto_import_path: args.proto_import,
        proto_package: args.proto_package,
        vendor: args.vendor,
        full_scaffold: args.full,
    };
    request.settings_path = args.config;
    request.skip_validation = args.skip_validation;

    let report = use_case.execute(request)?;
    if args.dry_run {
        info!(output = %report.output_dir.display(), "Dry run, nothing was written");
    }
    println!("{report}");
    Ok(ExitCode::SUCCESS)
}

fn validate(spec: PathBuf) -> anyhow::Result<ExitCode> {
    let use_case = ValidateUseCase::new(
        Arc::new(FileOpenApiLoader::new()),
        Arc::new(ConventionValidator::new()),
    );
    let violations = use_case
        .execute(&spec)
        .with_context(|| format!("Failed to validate {}", spec.display()))?;

    if violations.is_empty() {
        println!("{} follows the RPC convention", spec.display());
        return Ok(ExitCode::SUCCESS);
    }
    for violation in &violations {
        println!("{violation}");
    }
    println!("{} violations", violations.len());
    Ok(ExitCode::from(FAILURE))
}
