use crate::budgeting::domain::{Project, ProjectStatus};
use crate::budgeting::policies::TaxPolicy;
use crate::budgeting::services::CurrencyFormatter;
use crate::ports::outbound::{BudgetDocument, BudgetFormatter};
use owo_colors::OwoColorize;

fn status_badge(status: ProjectStatus) -> String {
    let label = status.label();
    match status {
        ProjectStatus::Draft => label.dimmed().to_string(),
        ProjectStatus::Budgeted => label.cyan().to_string(),
        ProjectStatus::Approved => label.green().to_string(),
        ProjectStatus::InProgress => label.yellow().to_string(),
        ProjectStatus::Completed => label.blue().to_string(),
    }
}

/// One line per project: id, title, status and budget total
pub fn render_project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet. Create one with `arkitecto projects create --title ...`"
            .to_string();
    }

    projects
        .iter()
        .map(|project| {
            format!(
                "{}  {}  [{}]  {} ({} items)",
                project.id.dimmed(),
                project.title().bold(),
                status_badge(project.status()),
                CurrencyFormatter::format(project.budget.total_final),
                project.budget.items.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Project header followed by its budget rendered with `formatter`
pub fn render_project<F: BudgetFormatter>(project: &Project, formatter: &F) -> String {
    let mut out = format!(
        "{} [{}]\nid: {}\n",
        project.title().bold(),
        status_badge(project.status()),
        project.id
    );
    if let Some(description) = project.metadata.description.as_deref() {
        out.push_str(description);
        out.push('\n');
    }
    if let Some(location) = &project.metadata.location {
        if !location.address.is_empty() {
            out.push_str(&format!("📍 {}\n", location.address));
        }
    }
    out.push('\n');

    let document = BudgetDocument {
        title: Some(project.title()),
        category: None,
        items: &project.budget.items,
        tax: TaxPolicy::summarize(project.budget.total_final, None),
    };
    out.push_str(&formatter.format(&document));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgeting::domain::{Budget, ProjectMetadata};

    struct ItemCountFormatter;

    impl BudgetFormatter for ItemCountFormatter {
        fn format(&self, document: &BudgetDocument<'_>) -> String {
            format!("items={} net={}", document.items.len(), document.tax.net)
        }
    }

    fn project(id: &str, title: &str, total: f64) -> Project {
        Project {
            id: id.to_string(),
            metadata: ProjectMetadata {
                title: title.to_string(),
                description: Some("Ampliación segundo piso".to_string()),
                location: None,
                status: ProjectStatus::Budgeted,
                created_at: String::new(),
                updated_at: String::new(),
            },
            budget: Budget {
                total_final: total,
                ..Budget::default()
            },
            collaborators: Default::default(),
        }
    }

    #[test]
    fn test_empty_list_hint() {
        assert!(render_project_list(&[]).contains("projects create"));
    }

    #[test]
    fn test_list_has_one_line_per_project() {
        let text = render_project_list(&[project("p1", "Casa", 1_500_000.0), project("p2", "Quincho", 0.0)]);

        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("p1"));
        assert!(text.contains("$1.500.000 (0 items)"));
        assert!(text.contains("Quincho"));
    }

    #[test]
    fn test_project_detail_uses_formatter() {
        let text = render_project(&project("p1", "Casa", 200.0), &ItemCountFormatter);

        assert!(text.contains("id: p1"));
        assert!(text.contains("Ampliación segundo piso"));
        assert!(text.ends_with("items=0 net=200"));
    }
}
