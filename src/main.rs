mod adapters;
mod application;
mod budgeting;
mod cli;
mod config;
mod ports;
mod shared;

use adapters::outbound::console::{
    render_project, render_project_list, render_suggestions, AssumeYes, StderrProgressReporter,
    StdinConfirmation,
};
use adapters::outbound::credentials::{StaticCredentialProvider, TokenFileCredentialProvider};
use adapters::outbound::filesystem::{FileSystemWriter, ImageFileReader};
use adapters::outbound::formatters::PlainTextBudgetFormatter;
use adapters::outbound::network::{AnalysisApiClient, HttpSettings, ProjectApiClient};
use application::use_cases::{
    BudgetPresenter, GenerateSketchUseCase, ProjectSyncController, QuickSuggestionsUseCase,
};
use application::SessionGate;
use budgeting::services::CurrencyFormatter;
use cli::{AnalysisRequest, AnalyzeArgs, Args, Command, ItemsCommand, ProjectsCommand, SketchArgs};
use config::{discover_config, load_config_from_path, CliOverrides, Settings, TokenSource};
use owo_colors::OwoColorize;
use ports::inbound::{AnalysisInput, ProjectSyncPort};
use ports::outbound::{
    AnalysisGateway, ConfirmationPrompt, CredentialProvider, OutputPresenter, ProgressReporter,
};
use shared::error::{ArkitectoError, ExitCode};
use shared::Result;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Controller = ProjectSyncController<ProjectApiClient, AnalysisApiClient, Box<dyn ConfirmationPrompt>>;

fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n{} {}\n", "❌".red(), "An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        let code = e
            .downcast_ref::<ArkitectoError>()
            .map(ArkitectoError::exit_code)
            .unwrap_or(ExitCode::ApplicationError);
        process::exit(code.as_i32());
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "arkitecto=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config_file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let overrides = CliOverrides {
        api_url: args.api_url.clone(),
    };
    let settings = Settings::resolve(config_file.as_ref(), |name| std::env::var(name).ok(), &overrides)?;
    debug!(api = %settings.api_base_url, timeout = ?settings.timeout, "settings resolved");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(args.command, settings))
}

async fn dispatch(command: Command, settings: Settings) -> Result<()> {
    let http = HttpSettings::new(settings.api_base_url.clone(), settings.timeout);
    let analysis_client = AnalysisApiClient::new(http.clone())?;

    match command {
        Command::Health => health(&analysis_client).await,
        Command::Whoami => whoami(&settings, http).await,
        Command::Suggestions => suggestions(analysis_client).await,
        Command::Projects(command) => {
            let yes = matches!(command, ProjectsCommand::Delete { yes: true, .. });
            let controller = project_controller(&settings, http, analysis_client, yes).await?;
            let outcome = projects(&controller, command).await;
            controller.teardown();
            outcome
        }
        Command::Items(command) => {
            let controller = project_controller(&settings, http, analysis_client, false).await?;
            let outcome = items(&controller, command).await;
            controller.teardown();
            outcome
        }
        Command::Analyze(analyze_args) => {
            let credentials = credential_provider(&settings.token);
            let controller = Controller::with_retry_policy(
                ProjectApiClient::new(http, credentials)?,
                analysis_client.clone(),
                Box::new(AssumeYes),
                settings.retry_policy,
            );
            analyze(&controller, analysis_client, analyze_args).await
        }
        Command::Sketch(sketch_args) => sketch(analysis_client, sketch_args).await,
    }
}

fn credential_provider(token: &TokenSource) -> Arc<dyn CredentialProvider> {
    match token {
        TokenSource::Inline(token) => Arc::new(StaticCredentialProvider::new(Some(token.clone()))),
        TokenSource::File(path) => Arc::new(TokenFileCredentialProvider::new(path.clone())),
        TokenSource::None => Arc::new(StaticCredentialProvider::new(None)),
    }
}

/// Builds the controller for project commands once the session gate lets us through
async fn project_controller(
    settings: &Settings,
    http: HttpSettings,
    analysis_client: AnalysisApiClient,
    assume_yes: bool,
) -> Result<Controller> {
    let credentials = credential_provider(&settings.token);
    SessionGate::new(credentials.as_ref())
        .require_session()
        .await?;

    let confirmation: Box<dyn ConfirmationPrompt> = if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirmation::new())
    };

    Ok(Controller::with_retry_policy(
        ProjectApiClient::new(http, credentials)?,
        analysis_client,
        confirmation,
        settings.retry_policy,
    ))
}

async fn health(client: &AnalysisApiClient) -> Result<()> {
    let status = client.check_health().await.map_err(ArkitectoError::Api)?;
    let brain = status.brain.as_deref().unwrap_or("unknown");
    println!("{} API {} (brain: {})", "🟢".green(), status.status.bold(), brain);
    Ok(())
}

async fn whoami(settings: &Settings, http: HttpSettings) -> Result<()> {
    let credentials = credential_provider(&settings.token);
    let client = ProjectApiClient::new(http, credentials.clone())?;
    let user = SessionGate::new(credentials.as_ref()).whoami(&client).await?;
    println!("{} Signed in as {}", "👤".green(), user.display_name().bold());
    Ok(())
}

async fn suggestions(client: AnalysisApiClient) -> Result<()> {
    let catalog = QuickSuggestionsUseCase::new(client).list().await?;
    println!("{}", render_suggestions(&catalog));
    Ok(())
}

async fn projects(controller: &Controller, command: ProjectsCommand) -> Result<()> {
    match command {
        ProjectsCommand::List => {
            let reporter = StderrProgressReporter::new();
            reporter.start_activity("Loading projects...");
            let loaded = controller.initialize().await;
            reporter.finish_activity();
            loaded?;
            println!("{}", render_project_list(&controller.snapshot().projects));
        }
        ProjectsCommand::Show { id } => {
            let project = controller.refresh_project(&id).await?;
            println!("{}", render_project(&project, &PlainTextBudgetFormatter::new()));
        }
        ProjectsCommand::Create { title, description } => {
            let draft = ProjectsCommand::draft(&title, description.as_deref());
            let project = controller.create_project(draft).await?;
            println!("{} Created project {} ({})", "✅".green(), project.title().bold(), project.id);
        }
        ProjectsCommand::Update {
            id,
            title,
            description,
            status,
        } => {
            let patch = ProjectsCommand::patch(title.as_deref(), description.as_deref(), status)
                .ok_or_else(|| {
                    ArkitectoError::validation(
                        "update",
                        "nothing to change; pass --title, --description or --status",
                    )
                })?;
            let project = controller.update_project(&id, patch).await?;
            println!(
                "{} Updated project {} [{}]",
                "✅".green(),
                project.title().bold(),
                project.status().label()
            );
        }
        ProjectsCommand::Delete { id, .. } => {
            controller.initialize().await?;
            if !controller.delete_project(&id).await? {
                return Err(ArkitectoError::ConfirmationDeclined { id }.into());
            }
            println!("{} Deleted project {}", "🗑️".red(), id);
        }
    }
    Ok(())
}

async fn items(controller: &Controller, command: ItemsCommand) -> Result<()> {
    let project = match command {
        ItemsCommand::Add(add) => {
            controller.refresh_project(&add.project_id).await?;
            controller.add_item(&add.project_id, add.to_new_item()).await?
        }
        ItemsCommand::Remove {
            project_id,
            position,
        } => {
            let index = position.checked_sub(1).ok_or_else(|| {
                ArkitectoError::validation("position", "positions start at 1")
            })?;
            controller.refresh_project(&project_id).await?;
            controller.remove_item(&project_id, index).await?
        }
    };
    println!("{}", render_project(&project, &PlainTextBudgetFormatter::new()));
    Ok(())
}

async fn analyze(
    controller: &Controller,
    export_client: AnalysisApiClient,
    args: AnalyzeArgs,
) -> Result<()> {
    let image = args
        .image
        .as_deref()
        .map(|path| ImageFileReader::new().read(path))
        .transpose()?;

    let mut title = args.title.clone();
    let instruction = match args.request() {
        AnalysisRequest::Instruction(instruction) => instruction,
        AnalysisRequest::Guided(guided) => guided.to_instruction(),
        AnalysisRequest::Suggestion(position) => {
            let preset = QuickSuggestionsUseCase::new(export_client.clone())
                .pick(position)
                .await?;
            title.get_or_insert_with(|| preset.titulo.clone());
            preset.instruction()
        }
    };
    debug!(%instruction, "analysis instruction");

    let reporter = StderrProgressReporter::new();
    reporter.start_activity("Analyzing with ARKITECTO AI...");
    let outcome = controller
        .run_analysis(AnalysisInput::new(image, instruction))
        .await;
    reporter.finish_activity();
    let result = outcome?;
    reporter.report_completion(&format!(
        "Budget ready: {} line(s), {}",
        result.item_count(),
        CurrencyFormatter::format(result.total)
    ));

    let presenter = BudgetPresenter::new(export_client, PlainTextBudgetFormatter::new());
    if !result.narrative.trim().is_empty() {
        println!("{}\n", result.narrative.trim());
    }
    println!("{}", presenter.render(&result, title.as_deref()));

    if let Some(format) = args.export {
        reporter.start_activity(&format!("Exporting {}...", format));
        let exported = presenter.export(&result, format).await;
        reporter.finish_activity();
        if let Some(document) = exported? {
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(document.file_name()));
            FileSystemWriter::new(path).present(&document.content)?;
        }
    }

    if let Some(target) = args.share {
        println!(
            "\n{} {}",
            format!("Share via {}:", target).bold(),
            presenter.share_link(&result, title.as_deref(), target)
        );
    }
    Ok(())
}

async fn sketch(client: AnalysisApiClient, args: SketchArgs) -> Result<()> {
    let image = args
        .image
        .as_deref()
        .map(|path| ImageFileReader::new().read(path))
        .transpose()?;

    let reporter = StderrProgressReporter::new();
    reporter.start_activity("Generating render...");
    let outcome = GenerateSketchUseCase::new(client)
        .execute(image.as_ref(), &args.prompt)
        .await;
    reporter.finish_activity();
    let sketch = outcome?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("render_arkitecto.{}", sketch.extension())));
    FileSystemWriter::new(path).present(&sketch.bytes)?;
    Ok(())
}
