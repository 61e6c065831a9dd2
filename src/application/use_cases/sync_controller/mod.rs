use crate::budgeting::domain::{AnalysisResult, NewBudgetItem, Project};
use crate::budgeting::policies::{LoadRetryPolicy, RetryDecision};
use crate::budgeting::services::BudgetCalculator;
use crate::ports::inbound::{
    AnalysisInput, ProjectSyncPort, SurfacedError, SyncOperation, SyncSnapshot,
};
use crate::ports::outbound::{
    AnalysisGateway, AnalysisPayload, ConfirmationPrompt, ImageUpload, ProjectDraft,
    ProjectPatch, ProjectRepository,
};
use crate::shared::error::{ApiError, ArkitectoError};
use crate::shared::AppResult;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use uuid::Uuid;


/// Shown when the backend reports a failed analysis without saying why
const GENERIC_ANALYSIS_ERROR: &str = "Error analyzing the request. Please try again.";

#[derive(Debug, Default)]
struct SyncState {
    projects: Vec<Project>,
    selected: Option<Project>,
    analysis: Option<AnalysisResult>,
    errors: Vec<SurfacedError>,
    loading: bool,
    analyzing: bool,
    has_fetched: bool,
    /// Bumped on teardown; responses from an older epoch are dropped
    epoch: u64,
}

impl SyncState {
    fn surface(&mut self, operation: SyncOperation, message: String) {
        warn!(%operation, %message, "surfacing error");
        self.errors.push(SurfacedError {
            id: Uuid::new_v4(),
            operation,
            message,
        });
    }

    /// Replaces the project with the same id; the selection follows it
    fn replace_project(&mut self, project: &Project) -> bool {
        let replaced = match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project.clone();
                true
            }
            None => false,
        };
        if self.selected.as_ref().is_some_and(|s| s.id == project.id) {
            self.selected = Some(project.clone());
        }
        replaced
    }
}

/// ProjectSyncController - single source of truth for the project collection
/// and the current budget analysis of a session.
///
/// The controller does not serialize calls: two intents issued before the
/// first resolves interleave freely at their network awaits. State is only
/// locked between awaits, never across them.
///
/// # Type Parameters
/// * `R` - ProjectRepository implementation
/// * `A` - AnalysisGateway implementation
/// * `C` - ConfirmationPrompt implementation
pub struct ProjectSyncController<R, A, C> {
    repository: R,
    analysis_gateway: A,
    confirmation: C,
    retry_policy: LoadRetryPolicy,
    state: Mutex<SyncState>,
}

impl<R, A, C> ProjectSyncController<R, A, C>
where
    R: ProjectRepository,
    A: AnalysisGateway,
    C: ConfirmationPrompt,
{
    /// Creates a new controller with injected dependencies
    pub fn new(repository: R, analysis_gateway: A, confirmation: C) -> Self {
        Self::with_retry_policy(
            repository,
            analysis_gateway,
            confirmation,
            LoadRetryPolicy::default(),
        )
    }

    pub fn with_retry_policy(
        repository: R,
        analysis_gateway: A,
        confirmation: C,
        retry_policy: LoadRetryPolicy,
    ) -> Self {
        Self {
            repository,
            analysis_gateway,
            confirmation,
            retry_policy,
            state: Mutex::new(SyncState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_epoch(&self) -> u64 {
        self.state().epoch
    }

    /// Locks the state only if the session that issued a request is still open
    fn state_for(&self, epoch: u64) -> Option<MutexGuard<'_, SyncState>> {
        let state = self.state();
        if state.epoch == epoch {
            Some(state)
        } else {
            debug!(epoch, current = state.epoch, "discarding response from closed session");
            None
        }
    }

    fn find_project(&self, id: &str) -> AppResult<Project> {
        self.state()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ArkitectoError::ProjectNotFound { id: id.to_string() })
    }

    /// Records a remote failure as surfaced and converts it for the caller
    fn surface_api_error(&self, epoch: u64, operation: SyncOperation, err: ApiError) -> ArkitectoError {
        if let Some(mut state) = self.state_for(epoch) {
            state.surface(operation, err.user_message());
        }
        ArkitectoError::Api(err)
    }

    /// Converts a successful analysis response into a stored result
    fn accept_analysis(payload: AnalysisPayload) -> AppResult<AnalysisResult> {
        if !payload.success {
            let message = payload
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_ANALYSIS_ERROR.to_string());
            return Err(ArkitectoError::AnalysisRejected { message });
        }

        let budget = match payload.presupuesto {
            Some(budget) if !budget.items.is_empty() => budget,
            _ => return Err(ArkitectoError::NoBudgetGenerated),
        };

        let total = BudgetCalculator::analysis_total(budget.total_estimado, &budget.items);
        let breakdown = Some(budget.breakdown).filter(|b| !b.is_empty());

        Ok(AnalysisResult {
            narrative: payload.analisis,
            items: budget.items,
            total,
            breakdown,
            currency: budget.moneda.unwrap_or_else(|| "CLP".to_string()),
            category: payload.metadata.and_then(|m| m.categoria),
        })
    }

    fn validate_patch(patch: &ProjectPatch) -> AppResult<()> {
        if patch.is_empty() {
            return Err(ArkitectoError::validation("update", "nothing to update"));
        }
        if let Some(title) = patch.metadata.as_ref().and_then(|m| m.title.as_deref()) {
            if title.trim().is_empty() {
                return Err(ArkitectoError::validation("title", "must not be empty"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R, A, C> ProjectSyncPort for ProjectSyncController<R, A, C>
where
    R: ProjectRepository,
    A: AnalysisGateway,
    C: ConfirmationPrompt,
{
    async fn initialize(&self) -> AppResult<()> {
        info!("initializing project session");
        self.load_projects().await
    }

    fn teardown(&self) {
        let mut state = self.state();
        let epoch = state.epoch.wrapping_add(1);
        *state = SyncState {
            epoch,
            ..SyncState::default()
        };
        info!(epoch, "project session torn down");
    }

    async fn load_projects(&self) -> AppResult<()> {
        let epoch = {
            let mut state = self.state();
            if state.has_fetched {
                debug!("projects already fetched this session");
                return Ok(());
            }
            state.has_fetched = true;
            state.loading = true;
            state.epoch
        };

        let mut attempt = 1;
        loop {
            debug!(attempt, "loading projects");
            let result = self.repository.list_projects().await;

            let delay = {
                let Some(mut state) = self.state_for(epoch) else {
                    return Ok(());
                };
                state.loading = false;

                let err = match result {
                    Ok(projects) => {
                        info!(count = projects.len(), attempt, "projects loaded");
                        state.projects = projects;
                        return Ok(());
                    }
                    Err(err) => err,
                };

                match self.retry_policy.decide(attempt, err.is_transient()) {
                    RetryDecision::RetryAfter(delay) => {
                        warn!(attempt, error = %err, "project load failed, retrying silently");
                        delay
                    }
                    RetryDecision::GiveUpSilently => {
                        warn!(attempt, error = %err, "project load retries exhausted, continuing empty");
                        state.projects.clear();
                        return Ok(());
                    }
                    RetryDecision::Surface => {
                        state.surface(SyncOperation::LoadProjects, err.user_message());
                        return Err(ArkitectoError::Api(err));
                    }
                }
            };

            tokio::time::sleep(delay).await;
            if self.current_epoch() != epoch {
                return Ok(());
            }
            attempt += 1;
        }
    }

    async fn refresh_project(&self, id: &str) -> AppResult<Project> {
        let epoch = self.current_epoch();
        match self.repository.get_project(id).await {
            Ok(project) => {
                if let Some(mut state) = self.state_for(epoch) {
                    if !state.replace_project(&project) {
                        state.projects.push(project.clone());
                    }
                }
                Ok(project)
            }
            Err(err) => Err(self.surface_api_error(epoch, SyncOperation::RefreshProject, err)),
        }
    }

    async fn create_project(&self, mut draft: ProjectDraft) -> AppResult<Project> {
        draft.title = draft.title.trim().to_string();
        if draft.title.is_empty() {
            return Err(ArkitectoError::validation("title", "must not be empty"));
        }

        let epoch = self.current_epoch();
        match self.repository.create_project(&draft).await {
            Ok(project) => {
                info!(id = %project.id, "project created");
                if let Some(mut state) = self.state_for(epoch) {
                    state.projects.push(project.clone());
                }
                Ok(project)
            }
            Err(err) => Err(self.surface_api_error(epoch, SyncOperation::CreateProject, err)),
        }
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> AppResult<Project> {
        Self::validate_patch(&patch)?;

        let epoch = self.current_epoch();
        let current = match self.find_project(id) {
            Ok(project) => project,
            Err(_) => {
                debug!(id, "project not loaded, fetching it before the update");
                self.repository
                    .get_project(id)
                    .await
                    .map_err(|err| self.surface_api_error(epoch, SyncOperation::UpdateProject, err))?
            }
        };

        let update = patch.apply_to(&current);
        match self.repository.update_project(id, &update).await {
            Ok(project) => {
                info!(id = %project.id, "project updated");
                if let Some(mut state) = self.state_for(epoch) {
                    state.replace_project(&project);
                }
                Ok(project)
            }
            Err(err) => Err(self.surface_api_error(epoch, SyncOperation::UpdateProject, err)),
        }
    }

    async fn delete_project(&self, id: &str) -> AppResult<bool> {
        let title = self
            .find_project(id)
            .map(|p| p.metadata.title)
            .unwrap_or_else(|_| id.to_string());
        let prompt = format!("Delete project \"{}\"? This cannot be undone.", title);
        if !self.confirmation.confirm(&prompt) {
            info!(id, "project deletion declined");
            return Ok(false);
        }

        let epoch = self.current_epoch();
        match self.repository.delete_project(id).await {
            Ok(()) => {
                info!(id, "project deleted");
                if let Some(mut state) = self.state_for(epoch) {
                    state.projects.retain(|p| p.id != id);
                    if state.selected.as_ref().is_some_and(|s| s.id == id) {
                        state.selected = None;
                    }
                }
                Ok(true)
            }
            Err(err) => Err(self.surface_api_error(epoch, SyncOperation::DeleteProject, err)),
        }
    }

    async fn add_item(&self, project_id: &str, item: NewBudgetItem) -> AppResult<Project> {
        let project = self.find_project(project_id)?;
        let item = item.build()?;
        let budget = BudgetCalculator::with_item_added(project.budget, item);
        self.update_project(project_id, ProjectPatch::budget(budget))
            .await
    }

    async fn remove_item(&self, project_id: &str, index: usize) -> AppResult<Project> {
        let project = self.find_project(project_id)?;
        let budget = BudgetCalculator::with_item_removed(project.budget, index)?;
        self.update_project(project_id, ProjectPatch::budget(budget))
            .await
    }

    async fn run_analysis(&self, input: AnalysisInput) -> AppResult<AnalysisResult> {
        let instruction = input.instruction.trim();
        if instruction.is_empty() {
            return Err(ArkitectoError::validation("instruction", "must not be empty"));
        }

        let epoch = {
            let mut state = self.state();
            state.analyzing = true;
            state.analysis = None;
            state.epoch
        };

        let image = input.image.unwrap_or_else(ImageUpload::placeholder);
        debug!(file = %image.file_name, bytes = image.bytes.len(), "requesting budget analysis");
        let response = self
            .analysis_gateway
            .analyze_budget(&image, instruction)
            .await;

        let Some(mut state) = self.state_for(epoch) else {
            return response
                .map_err(ArkitectoError::Api)
                .and_then(Self::accept_analysis);
        };
        state.analyzing = false;

        let outcome = response
            .map_err(ArkitectoError::Api)
            .and_then(Self::accept_analysis);
        match outcome {
            Ok(result) => {
                info!(items = result.item_count(), total = result.total, "analysis stored");
                state.analysis = Some(result.clone());
                Ok(result)
            }
            Err(err) => {
                let message = match &err {
                    ArkitectoError::Api(api) => api.user_message(),
                    other => other.to_string(),
                };
                state.surface(SyncOperation::Analyze, message);
                Err(err)
            }
        }
    }

    fn clear_analysis(&self) {
        self.state().analysis = None;
    }

    fn select_project(&self, id: &str) -> AppResult<Project> {
        let project = self.find_project(id)?;
        self.state().selected = Some(project.clone());
        Ok(project)
    }

    fn clear_selection(&self) {
        self.state().selected = None;
    }

    fn dismiss_error(&self, id: Uuid) -> bool {
        let mut state = self.state();
        let before = state.errors.len();
        state.errors.retain(|e| e.id != id);
        state.errors.len() != before
    }

    fn snapshot(&self) -> SyncSnapshot {
        let state = self.state();
        SyncSnapshot {
            projects: state.projects.clone(),
            selected: state.selected.clone(),
            analysis: state.analysis.clone(),
            errors: state.errors.clone(),
            loading: state.loading,
            analyzing: state.analyzing,
            has_fetched: state.has_fetched,
        }
    }
}
