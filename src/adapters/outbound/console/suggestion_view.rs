use crate::ports::outbound::SuggestionPayload;
use owo_colors::OwoColorize;

fn icon(name: &str) -> &'static str {
    match name {
        "bath" => "🛁",
        "kitchen" => "🍳",
        "bed" => "🛏️",
        "grill" => "🔥",
        "home" => "🏠",
        "pool" => "🏊",
        "fence" => "🚧",
        "car" => "🚗",
        "warehouse" => "🏭",
        "bolt" => "⚡",
        _ => "•",
    }
}

/// Numbered catalog, numbers as accepted by `analyze --suggestion`
pub fn render_suggestions(suggestions: &[SuggestionPayload]) -> String {
    if suggestions.is_empty() {
        return "No quick suggestions available.".to_string();
    }

    suggestions
        .iter()
        .enumerate()
        .map(|(index, suggestion)| {
            let mut line = format!(
                "{:>2}. {} {}",
                index + 1,
                icon(&suggestion.icono),
                suggestion.titulo.bold()
            );
            if !suggestion.descripcion.trim().is_empty() {
                line.push_str(&format!(" - {}", suggestion.descripcion.trim()));
            }
            line.push_str(&format!("\n    {}", suggestion.instruction().dimmed()));
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
