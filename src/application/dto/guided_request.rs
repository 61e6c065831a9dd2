/// Kind of work a guided request describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Casa,
    Quincho,
    Piscina,
    Remodelacion,
}

impl ProjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Casa => "Casa",
            ProjectKind::Quincho => "Quincho",
            ProjectKind::Piscina => "Piscina",
            ProjectKind::Remodelacion => "Remodelación",
        }
    }
}

impl std::str::FromStr for ProjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casa" => Ok(ProjectKind::Casa),
            "quincho" => Ok(ProjectKind::Quincho),
            "piscina" => Ok(ProjectKind::Piscina),
            "remodelacion" | "remodelación" => Ok(ProjectKind::Remodelacion),
            _ => Err(format!(
                "Invalid project type: {}. Please specify casa, quincho, piscina or remodelacion",
                s
            )),
        }
    }
}

/// Finish level of a guided request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishQuality {
    Economico,
    Estandar,
    Premium,
}

impl FinishQuality {
    pub fn label(&self) -> &'static str {
        match self {
            FinishQuality::Economico => "económicas",
            FinishQuality::Estandar => "estándar",
            FinishQuality::Premium => "premium",
        }
    }
}

impl std::str::FromStr for FinishQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economico" | "económico" => Ok(FinishQuality::Economico),
            "estandar" | "estándar" => Ok(FinishQuality::Estandar),
            "premium" => Ok(FinishQuality::Premium),
            _ => Err(format!(
                "Invalid quality: {}. Please specify economico, estandar or premium",
                s
            )),
        }
    }
}

/// Answers of the guided text-only flow, composed into one analysis instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedRequest {
    pub kind: ProjectKind,
    pub dimensions: Option<String>,
    pub quality: Option<FinishQuality>,
    pub details: Option<String>,
    pub location: Option<String>,
}

impl GuidedRequest {
    pub fn new(kind: ProjectKind) -> Self {
        Self {
            kind,
            dimensions: None,
            quality: None,
            details: None,
            location: None,
        }
    }

    /// e.g. `Quincho de 30 m2, terminaciones estándar, incluyendo piso de madera, en Ñuñoa`
    pub fn to_instruction(&self) -> String {
        let mut instruction = self.kind.label().to_string();
        if let Some(dimensions) = non_blank(&self.dimensions) {
            instruction.push_str(&format!(" de {}", dimensions));
        }
        if let Some(quality) = self.quality {
            instruction.push_str(&format!(", terminaciones {}", quality.label()));
        }
        if let Some(details) = non_blank(&self.details) {
            instruction.push_str(&format!(", incluyendo {}", details));
        }
        if let Some(location) = non_blank(&self.location) {
            instruction.push_str(&format!(", en {}", location));
        }
        instruction
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
