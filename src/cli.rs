use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{
    ExportFormat, FinishQuality, GuidedRequest, ProjectKind, ShareTarget,
};
use crate::budgeting::domain::{NewBudgetItem, ProjectStatus};
use crate::ports::outbound::{MetadataPatch, ProjectDraft, ProjectPatch};

/// Construction budgets from site photos, backed by the ARKITECTO AI API
#[derive(Parser, Debug)]
#[command(name = "arkitecto")]
#[command(version)]
#[command(about = "Construction budgets from site photos, backed by the ARKITECTO AI API", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./arkitecto.config.yml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the API, overrides ARKITECTO_API_URL and the config file
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the analysis service is up
    Health,

    /// Show who the session token belongs to
    Whoami,

    /// Manage saved projects (requires a session token)
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Edit the budget lines of a saved project (requires a session token)
    #[command(subcommand)]
    Items(ItemsCommand),

    /// List the preset requests usable with `analyze --suggestion`
    Suggestions,

    /// Analyze a site photo or a text instruction into a budget
    Analyze(AnalyzeArgs),

    /// Generate an architectural render from a prompt
    Sketch(SketchArgs),
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List every project you collaborate on
    List,

    /// Show one project with its budget
    Show { id: String },

    /// Create a draft project
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Change the title, description or status of a project
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// draft, budgeted, approved, in_progress or completed
        #[arg(long)]
        status: Option<ProjectStatus>,
    },

    /// Delete a project
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// Append a budget line
    Add(AddItemArgs),

    /// Remove a budget line by its position as listed (starting at 1)
    Remove { project_id: String, position: usize },
}

#[derive(ClapArgs, Debug)]
pub struct AddItemArgs {
    pub project_id: String,
    #[arg(long)]
    pub elemento: String,
    #[arg(long, default_value = "")]
    pub descripcion: String,
    #[arg(long)]
    pub cantidad: f64,
    #[arg(long)]
    pub unidad: String,
    /// Unit price in CLP
    #[arg(long)]
    pub precio: f64,
    /// Source of the unit price analysis (defaults to manual entry)
    #[arg(long)]
    pub apu: Option<String>,
}

#[derive(ClapArgs, Debug)]
#[command(group(
    ArgGroup::new("request")
        .required(true)
        .args(["instruction", "suggestion", "tipo"])
))]
pub struct AnalyzeArgs {
    /// What to budget, e.g. "muro de 10m de albañilería"
    #[arg(short, long)]
    pub instruction: Option<String>,

    /// Use a preset from `arkitecto suggestions` by its number
    #[arg(long, value_name = "N")]
    pub suggestion: Option<usize>,

    /// Guided request: casa, quincho, piscina or remodelacion
    #[arg(long)]
    pub tipo: Option<ProjectKind>,

    /// Guided request: approximate size, e.g. "50 m2" or "10x5 metros"
    #[arg(long, requires = "tipo")]
    pub dimensiones: Option<String>,

    /// Guided request: economico, estandar or premium
    #[arg(long, requires = "tipo")]
    pub calidad: Option<FinishQuality>,

    /// Guided request: materials or details to include
    #[arg(long, requires = "tipo")]
    pub detalles: Option<String>,

    /// Guided request: commune or city of the site
    #[arg(long, requires = "tipo")]
    pub comuna: Option<String>,

    /// Photo of the site or plan
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Also export the budget: pdf, excel or text
    #[arg(short, long)]
    pub export: Option<ExportFormat>,

    /// Where to save the export (defaults to presupuesto_arkitecto.<ext>)
    #[arg(short, long, value_name = "PATH", requires = "export")]
    pub output: Option<PathBuf>,

    /// Print a share link: whatsapp or email
    #[arg(short, long)]
    pub share: Option<ShareTarget>,

    /// Project title used in the summary and share subject
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct SketchArgs {
    /// Description of the render
    #[arg(short, long)]
    pub prompt: String,

    /// Reference photo to render over
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Where to save the render (defaults to render_arkitecto.<ext>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl ProjectsCommand {
    /// Builds the creation body for `projects create`
    pub fn draft(title: &str, description: Option<&str>) -> ProjectDraft {
        let mut draft = ProjectDraft::titled(title.trim());
        draft.description = description.map(str::to_string);
        draft
    }

    /// Builds the partial update for `projects update`; `None` when nothing was given
    pub fn patch(
        title: Option<&str>,
        description: Option<&str>,
        status: Option<ProjectStatus>,
    ) -> Option<ProjectPatch> {
        let metadata = MetadataPatch {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            location: None,
            status,
        };
        (!metadata.is_empty()).then(|| ProjectPatch::metadata(metadata))
    }
}

/// Where the analysis instruction comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Instruction(String),
    Suggestion(usize),
    Guided(GuidedRequest),
}

impl AnalyzeArgs {
    pub fn request(&self) -> AnalysisRequest {
        if let Some(position) = self.suggestion {
            return AnalysisRequest::Suggestion(position);
        }
        if let Some(kind) = self.tipo {
            return AnalysisRequest::Guided(GuidedRequest {
                kind,
                dimensions: self.dimensiones.clone(),
                quality: self.calidad,
                details: self.detalles.clone(),
                location: self.comuna.clone(),
            });
        }
        AnalysisRequest::Instruction(self.instruction.clone().unwrap_or_default())
    }
}

impl AddItemArgs {
    pub fn to_new_item(&self) -> NewBudgetItem {
        NewBudgetItem {
            elemento: self.elemento.clone(),
            descripcion: self.descripcion.clone(),
            cantidad: self.cantidad,
            unidad: self.unidad.clone(),
            precio_unitario: self.precio,
            apu_origen: self.apu.clone(),
        }
    }
}
