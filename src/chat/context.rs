use crate::models::Place;

/// At most this many places are described to the assistant.
pub const MAX_CONTEXT_PLACES: usize = 20;

const CONTEXT_HEADING: &str = "\n\nAvailable places in Lebanon:\n";

/// Summary of known places sent along with every question; empty when none are known.
pub fn places_context(places: &[Place]) -> String {
    if places.is_empty() {
        return String::new();
    }

    let lines: Vec<String> =
        places.iter().take(MAX_CONTEXT_PLACES).map(Place::context_line).collect();
    format!("{}{}", CONTEXT_HEADING, lines.join("\n"))
}
