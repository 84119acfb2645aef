use crate::models::Cruise;

/// Title-cases a display name: the whole string is lowercased, then the first
/// letter of every whitespace-separated word is capitalized. Whitespace runs
/// are preserved as-is.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;

    for ch in name.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

/// Reduces an itinerary stop such as `"Cozumel, Quintana Roo, Mexico"` to the
/// port name before the first comma.
pub fn port_name(stop: &str) -> String {
    stop.split(',').next().unwrap_or_default().trim().to_string()
}

pub fn normalize_cruise(cruise: &Cruise) -> Cruise {
    Cruise {
        name: title_case(&cruise.name),
        itinerary: cruise.itinerary.iter().map(|stop| port_name(stop)).collect(),
        ..cruise.clone()
    }
}

/// Post-fetch display normalization. Returns new records; the payload is left untouched.
pub fn normalize_cruises(cruises: &[Cruise]) -> Vec<Cruise> {
    cruises.iter().map(normalize_cruise).collect()
}
