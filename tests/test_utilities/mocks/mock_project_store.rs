use arkitecto::budgeting::domain::ProjectMetadata;
use arkitecto::prelude::*;
use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

const TIMESTAMP: &str = "2024-06-03T14:05:00Z";

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    list_failures: VecDeque<ApiError>,
    list_calls: usize,
    deleted: Vec<String>,
    next_id: usize,
}

/// In-memory ProjectRepository behaving like the project API
///
/// Clones share the same store so tests can inspect it after handing a
/// copy to the controller.
#[derive(Clone, Default)]
pub struct MockProjectStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(self, id: &str, title: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.projects.push(Self::build_project(id, title, None));
        }
        self
    }

    /// The next list calls fail with these errors, in order
    pub fn failing_list_with(self, errors: Vec<ApiError>) -> Self {
        self.state.lock().unwrap().list_failures = errors.into();
        self
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn stored(&self, id: &str) -> Option<Project> {
        let state = self.state.lock().unwrap();
        state.projects.iter().find(|p| p.id == id).cloned()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    fn build_project(id: &str, title: &str, description: Option<String>) -> Project {
        Project {
            id: id.to_string(),
            metadata: ProjectMetadata {
                title: title.to_string(),
                description,
                location: None,
                status: ProjectStatus::Draft,
                created_at: TIMESTAMP.to_string(),
                updated_at: TIMESTAMP.to_string(),
            },
            budget: Budget::default(),
            collaborators: BTreeMap::new(),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Application {
            status: 404,
            message: "404 Not Found".to_string(),
            detail: Some("Project not found".to_string()),
        }
    }
}

#[async_trait]
impl ProjectRepository for MockProjectStore {
    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if let Some(err) = state.list_failures.pop_front() {
            return Err(err);
        }
        Ok(state.projects.clone())
    }

    async fn get_project(&self, id: &str) -> ApiResult<Project> {
        self.stored(id).ok_or_else(Self::not_found)
    }

    async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<Project> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("proj-{}", state.next_id);
        let mut project = Self::build_project(&id, &draft.title, draft.description.clone());
        project.metadata.status = draft.status;
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &str, update: &ProjectUpdate) -> ApiResult<Project> {
        if update.metadata.title.trim().is_empty() {
            return Err(ApiError::Application {
                status: 422,
                message: "422 Unprocessable Entity".to_string(),
                detail: Some("metadata.title: field required".to_string()),
            });
        }

        let mut state = self.state.lock().unwrap();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;

        // The stored metadata map and budget are replaced, not merged
        project.metadata = update.metadata.clone();
        project.budget = update.budget.clone();
        project.metadata.updated_at = "2024-06-04T09:00:00Z".to_string();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            return Err(Self::not_found());
        }
        state.deleted.push(id.to_string());
        Ok(())
    }
}
