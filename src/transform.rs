//! Pure field transformers used by the migration stages.
//!
//! Everything here is side-effect free and total: bad input degrades to an
//! absent value or a fallback, never an error.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::company;

/// Generate a URL-friendly slug.
///
/// Lowercases, keeps alphanumerics, and collapses runs of whitespace and
/// hyphens into a single hyphen. Idempotent: slugging a slug is a no-op.
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_whitespace() || c == '-' {
            // Leading separators are dropped, inner runs collapse to one.
            if !slug.is_empty() {
                pending_separator = true;
            }
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if pending_separator {
            slug.push('-');
            pending_separator = false;
        }
        for lower in c.to_lowercase() {
            slug.push(lower);
        }
    }

    slug
}

/// Map an old category display name to its canonical slug.
///
/// The historical data contains a double-space variant of
/// "Container Architecture"; both spellings map to the same slug.
/// Unknown names fall back to plain lowercasing.
pub fn map_category_name(name: &str) -> String {
    match name {
        "Commercial" => "commercial".to_string(),
        "Residential" => "residential".to_string(),
        "Education" => "education".to_string(),
        "Container  Architecture" | "Container Architecture" => {
            "container-architecture".to_string()
        }
        _ => name.to_lowercase(),
    }
}

/// Parse a MySQL datetime string ("YYYY-MM-DD HH:MM:SS", assumed UTC).
///
/// Empty input and parse failures (including MySQL zero-dates) yield `None`.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Extract a numeric area from a free-text size field.
///
/// Whitespace is stripped first, then every contiguous digit run is
/// collected and the numerically largest one wins. Stripping whitespace
/// merges grouped digits ("10 000" becomes 10000), which is the intended
/// reading of the old data. Returns `None` when the text has no digits.
pub fn extract_area(text: &str) -> Option<f64> {
    fn flush(run: &mut String, best: &mut Option<f64>) {
        if run.is_empty() {
            return;
        }
        if let Ok(value) = run.parse::<f64>() {
            if best.map_or(true, |b| value > b) {
                *best = Some(value);
            }
        }
        run.clear();
    }

    let mut best: Option<f64> = None;
    let mut run = String::new();

    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_digit() {
            run.push(c);
        } else {
            flush(&mut run, &mut best);
        }
    }
    flush(&mut run, &mut best);

    best
}

/// Split a display name into (first, last). A single-word name leaves the
/// last name empty.
pub fn split_display_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (name.to_string(), String::new()),
    }
}

/// Role assigned to a migrated staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    Admin,
    Architect,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Architect => "architect",
        }
    }
}

/// Tagged classification decision for a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffProfile {
    pub role: StaffRole,
    pub years_experience: i32,
}

/// Classify a staff member from the old roster.
///
/// The company address is the admin account; the seniority figures come
/// from the old staff roster, keyed on the principal's first name.
pub fn classify_staff(name: &str, email: &str) -> StaffProfile {
    let role = if email == company::EMAIL {
        StaffRole::Admin
    } else {
        StaffRole::Architect
    };

    let years_experience = if name.contains("Martin") { 25 } else { 10 };

    StaffProfile {
        role,
        years_experience,
    }
}

/// Icon tag for a category, looked up by exact display name.
pub fn category_icon(name: &str) -> &'static str {
    match name {
        "Commercial" => "building2",
        "Residential" => "home",
        "Education" => "graduation-cap",
        "Container  Architecture" | "Container Architecture" => "container",
        _ => "building",
    }
}

/// Image classification derived from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Exterior,
    Interior,
    Plan,
    Elevation,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Exterior => "exterior",
            ImageKind::Interior => "interior",
            ImageKind::Plan => "plan",
            ImageKind::Elevation => "elevation",
        }
    }
}

/// Classify an image by case-insensitive substring match on its filename.
/// Exterior is the default when nothing matches.
pub fn classify_image(filename: &str) -> ImageKind {
    let lower = filename.to_lowercase();

    if lower.contains("interior") {
        ImageKind::Interior
    } else if lower.contains("plan") {
        ImageKind::Plan
    } else if lower.contains("elevation") {
        ImageKind::Elevation
    } else {
        ImageKind::Exterior
    }
}

/// Synthesize a project description from the old type/client/info columns.
///
/// Empty parts are skipped; when everything is empty the title carries a
/// generic fallback.
pub fn compose_project_description(
    kind: Option<&str>,
    client: Option<&str>,
    info: Option<&str>,
    title: &str,
) -> String {
    let mut parts = Vec::new();

    if let Some(kind) = kind.filter(|s| !s.is_empty()) {
        parts.push(format!("Type: {}", kind));
    }
    if let Some(client) = client.filter(|s| !s.is_empty()) {
        parts.push(format!("Client: {}", client));
    }
    if let Some(info) = info.filter(|s| !s.is_empty()) {
        parts.push(info.to_string());
    }

    if parts.is_empty() {
        format!("Architectural project: {}", title)
    } else {
        parts.join(". ")
    }
}

/// Pull a client name back out of a synthesized project description:
/// the text after "Client: " up to the next period (or end of string).
pub fn extract_client_name(description: &str) -> Option<String> {
    let (_, rest) = description.split_once("Client: ")?;

    let name = match rest.find('.') {
        Some(end) => &rest[..end],
        None => rest,
    }
    .trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_generate_slug_basic() {
        assert_eq!(generate_slug("House Jele"), "house-jele");
        assert_eq!(generate_slug("Umhlanga Ridge, Phase 2!"), "umhlanga-ridge-phase-2");
    }

    #[test]
    fn test_generate_slug_collapses_runs() {
        assert_eq!(generate_slug("Container  Architecture"), "container-architecture");
        assert_eq!(generate_slug(" -- spaced -- out -- "), "spaced-out");
    }

    #[test]
    fn test_generate_slug_empty() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_generate_slug_idempotent() {
        for input in ["House Jele", "a  b--c", "Ümläut Straße", ""] {
            let once = generate_slug(input);
            assert_eq!(generate_slug(&once), once);
        }
    }

    #[test]
    fn test_map_category_name_known() {
        assert_eq!(map_category_name("Residential"), "residential");
        assert_eq!(map_category_name("Commercial"), "commercial");
        assert_eq!(map_category_name("Education"), "education");
    }

    #[test]
    fn test_map_category_name_double_space_variant() {
        assert_eq!(map_category_name("Container  Architecture"), "container-architecture");
        assert_eq!(map_category_name("Container Architecture"), "container-architecture");
    }

    #[test]
    fn test_map_category_name_fallback_lowercases() {
        assert_eq!(map_category_name("Hospitality"), "hospitality");
    }

    #[test]
    fn test_parse_datetime_valid() {
        let dt = parse_datetime("2021-03-15 10:00:00").unwrap();
        assert_eq!(dt.year(), 2021);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.day(), 15);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("0000-00-00 00:00:00"), None);
    }

    #[test]
    fn test_extract_area_takes_largest_number() {
        assert_eq!(extract_area("8 x 250 sqm"), Some(250.0));
        assert_eq!(extract_area("350 sqm"), Some(350.0));
    }

    #[test]
    fn test_extract_area_merges_grouped_digits() {
        // Whitespace stripping joins "10" and "000" into one token.
        assert_eq!(extract_area("10 000 sqm"), Some(10000.0));
    }

    #[test]
    fn test_extract_area_no_digits() {
        assert_eq!(extract_area(""), None);
        assert_eq!(extract_area("unknown"), None);
    }

    #[test]
    fn test_split_display_name() {
        assert_eq!(
            split_display_name("Martin Lewison"),
            ("Martin".to_string(), "Lewison".to_string())
        );
        assert_eq!(split_display_name("Cher"), ("Cher".to_string(), String::new()));
        assert_eq!(
            split_display_name("Anna van der Merwe"),
            ("Anna".to_string(), "van der Merwe".to_string())
        );
    }

    #[test]
    fn test_classify_staff_admin_by_company_email() {
        let profile = classify_staff("Martin Lewison", "hla@hla.co.za");
        assert_eq!(profile.role, StaffRole::Admin);
        assert_eq!(profile.years_experience, 25);
    }

    #[test]
    fn test_classify_staff_default_architect() {
        let profile = classify_staff("Thabo Nkosi", "thabo@example.co.za");
        assert_eq!(profile.role, StaffRole::Architect);
        assert_eq!(profile.years_experience, 10);
    }

    #[test]
    fn test_category_icon_lookup() {
        assert_eq!(category_icon("Residential"), "home");
        assert_eq!(category_icon("Container  Architecture"), "container");
        assert_eq!(category_icon("Hospitality"), "building");
    }

    #[test]
    fn test_classify_image() {
        assert_eq!(classify_image("jele-INTERIOR-01.jpg"), ImageKind::Interior);
        assert_eq!(classify_image("floor-plan.png"), ImageKind::Plan);
        assert_eq!(classify_image("north-elevation.jpg"), ImageKind::Elevation);
        assert_eq!(classify_image("front.jpg"), ImageKind::Exterior);
    }

    #[test]
    fn test_compose_project_description_joins_parts() {
        let description = compose_project_description(
            Some("New Build"),
            Some("Jele Family"),
            Some("Completed 2019"),
            "House Jele",
        );
        assert_eq!(
            description,
            "Type: New Build. Client: Jele Family. Completed 2019"
        );
    }

    #[test]
    fn test_compose_project_description_skips_empty_parts() {
        let description =
            compose_project_description(Some(""), Some("Jele Family"), None, "House Jele");
        assert_eq!(description, "Client: Jele Family");
    }

    #[test]
    fn test_compose_project_description_fallback() {
        let description = compose_project_description(None, Some(""), None, "House Jele");
        assert_eq!(description, "Architectural project: House Jele");
    }

    #[test]
    fn test_extract_client_name() {
        assert_eq!(
            extract_client_name("Type: New Build. Client: Jele Family. Completed 2019"),
            Some("Jele Family".to_string())
        );
        assert_eq!(
            extract_client_name("Client: Dept of Education"),
            Some("Dept of Education".to_string())
        );
    }

    #[test]
    fn test_extract_client_name_absent() {
        assert_eq!(extract_client_name("Architectural project: House Jele"), None);
        assert_eq!(extract_client_name("Client: ."), None);
    }
}
