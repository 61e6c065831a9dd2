use super::BudgetItem;
use crate::shared::error::ArkitectoError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a project.
///
/// Variants are declared in progression order so `Ord` follows it, but no
/// transition graph is enforced on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Budgeted,
    Approved,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Borrador",
            ProjectStatus::Budgeted => "Presupuestado",
            ProjectStatus::Approved => "Aprobado",
            ProjectStatus::InProgress => "En Progreso",
            ProjectStatus::Completed => "Completado",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Budgeted => "budgeted",
            ProjectStatus::Approved => "approved",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(ProjectStatus::Draft),
            "budgeted" => Ok(ProjectStatus::Budgeted),
            "approved" => Ok(ProjectStatus::Approved),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(format!(
                "Invalid status: {}. Please specify one of draft, budgeted, approved, in_progress, completed",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// ISO-8601, server-assigned
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// ISO-8601, server-assigned
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

impl ProjectMetadata {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Parses a server timestamp. The backend emits both RFC 3339 values and
/// naive UTC values without an offset.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "CLP")]
    Clp,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Clp => "CLP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl FromStr for Currency {
    type Err = ArkitectoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CLP" => Ok(Currency::Clp),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(ArkitectoError::validation(
                "currency",
                format!("unsupported currency code '{}'", other),
            )),
        }
    }
}

/// Persisted budget of a project
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub items: Vec<BudgetItem>,
    #[serde(default)]
    pub total_materials: f64,
    #[serde(default)]
    pub total_labor: f64,
    #[serde(default)]
    pub total_contingency: f64,
    #[serde(default)]
    pub total_final: f64,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorRole {
    Owner,
    Editor,
    #[default]
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    #[serde(default)]
    pub role: CollaboratorRole,
    #[serde(default)]
    pub invited_at: String,
}

/// A construction project as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Server-assigned, immutable
    #[serde(default)]
    pub id: String,
    pub metadata: ProjectMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: Budget,
    /// Keyed by user id
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaborators: BTreeMap<String, Collaborator>,
}

impl Project {
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn status(&self) -> ProjectStatus {
        self.metadata.status
    }

    /// Role of the given user on this project, if they collaborate on it
    pub fn role_of(&self, user_id: &str) -> Option<CollaboratorRole> {
        self.collaborators.get(user_id).map(|c| c.role)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
