//! Tech-stack chips for project cards.

use tracing::debug;

use crate::dictionary::Dictionary;

pub const SOURCE_ATTR: &str = "data-project-tech";

const DEVICON: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons";

struct TechMeta {
    token: &'static str,
    label: &'static str,
    /// Path under the devicon CDN, if the technology has an icon there.
    icon: Option<&'static str>,
}

const TECH: &[TechMeta] = &[
    TechMeta { token: "flutter", label: "Flutter", icon: Some("flutter/flutter-original.svg") },
    TechMeta { token: "dart", label: "Dart", icon: Some("dart/dart-original.svg") },
    TechMeta { token: "sqlite", label: "SQLite", icon: Some("sqlite/sqlite-original.svg") },
    TechMeta { token: "easylocalization", label: "EasyLocalization", icon: None },
    TechMeta { token: "fastapi", label: "FastAPI", icon: Some("fastapi/fastapi-original.svg") },
    TechMeta { token: "docker", label: "Docker", icon: Some("docker/docker-original.svg") },
    // No Cloud Run icon; Google Cloud stands in.
    TechMeta { token: "gcloudrun", label: "Cloud Run", icon: Some("googlecloud/googlecloud-original.svg") },
    // No Firestore icon; Firebase stands in.
    TechMeta { token: "firestore", label: "Firestore", icon: Some("firebase/firebase-plain.svg") },
    TechMeta { token: "supabase", label: "Supabase", icon: Some("supabase/supabase-original.svg") },
    TechMeta { token: "postgresql", label: "PostgreSQL", icon: Some("postgresql/postgresql-original.svg") },
    TechMeta { token: "stripe", label: "Stripe", icon: Some("stripe/stripe-original.svg") },
    TechMeta { token: "firebase", label: "Firebase", icon: Some("firebase/firebase-plain.svg") },
    TechMeta { token: "mapbox", label: "Mapbox", icon: Some("mapbox/mapbox-original.svg") },
    TechMeta { token: "git", label: "Git", icon: Some("git/git-original.svg") },
    TechMeta { token: "github", label: "GitHub", icon: Some("github/github-original.svg") },
];

fn meta(token: &str) -> Option<&'static TechMeta> {
    TECH.iter().find(|m| m.token == token)
}

/// Split a `|`-delimited list into lowercase tokens. Order and duplicates kept.
pub fn parse_tokens(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn title_case_token(token: &str) -> String {
    match token {
        "api" => "API".to_string(),
        "ci/cd" => "CI/CD".to_string(),
        _ => token
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" "),
    }
}

/// Locale override (`techLabels.<token>`), then the static table, then a generated label.
pub fn resolve_label(dict: Option<&Dictionary>, token: &str) -> String {
    let localized = dict
        .and_then(|d| d.text(&format!("techLabels.{token}")))
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(label) = localized {
        return label.to_string();
    }
    match meta(token) {
        Some(m) => m.label.to_string(),
        None => title_case_token(token),
    }
}

pub fn resolve_icon(token: &str) -> Option<String> {
    meta(token)
        .and_then(|m| m.icon)
        .map(|path| format!("{DEVICON}/{path}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechChip {
    pub token: String,
    pub label: String,
    pub icon: Option<String>,
}

impl TechChip {
    pub fn new(dict: Option<&Dictionary>, token: &str) -> Self {
        Self {
            token: token.to_string(),
            label: resolve_label(dict, token),
            icon: resolve_icon(token),
        }
    }

    pub fn is_text_only(&self) -> bool {
        self.icon.is_none()
    }

    pub fn class_name(&self) -> &'static str {
        if self.is_text_only() {
            "tech-chip is-text-only"
        } else {
            "tech-chip"
        }
    }
}

/// Chips for one tagged container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipSet {
    chips: Vec<TechChip>,
}

impl ChipSet {
    pub fn render(dict: Option<&Dictionary>, source_key: &str) -> Self {
        let raw = dict.and_then(|d| d.text(source_key)).unwrap_or_default();
        let chips: Vec<TechChip> = parse_tokens(raw)
            .iter()
            .map(|token| TechChip::new(dict, token))
            .collect();
        debug!("projects.chips[{source_key}]: {} chips", chips.len());
        Self { chips }
    }

    pub fn chips(&self) -> &[TechChip] {
        &self.chips
    }

    /// An empty container is hidden rather than left blank.
    pub fn is_hidden(&self) -> bool {
        self.chips.is_empty()
    }

    /// The icon could not be displayed: fall back to the label alone.
    pub fn mark_icon_failed(&mut self, index: usize) {
        if let Some(chip) = self.chips.get_mut(index) {
            debug!("projects.chips: icon for {} failed to load", chip.token);
            chip.icon = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(json: &str) -> Dictionary {
        Dictionary::from_json(json).expect("parses")
    }

    #[test]
    fn known_and_unknown_tokens_in_order() {
        let d = dict(r#"{"p":{"tech":"flutter|dart|unknownTech"}}"#);
        let set = ChipSet::render(Some(&d), "p.tech");
        let chips = set.chips();

        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0].label, "Flutter");
        assert_eq!(
            chips[0].icon.as_deref(),
            Some("https://cdn.jsdelivr.net/gh/devicons/devicon@latest/icons/flutter/flutter-original.svg")
        );
        assert_eq!(chips[1].label, "Dart");
        assert!(chips[1].icon.is_some());
        assert_eq!(chips[2].token, "unknowntech");
        assert_eq!(chips[2].label, "Unknowntech");
        assert!(chips[2].is_text_only());
        assert_eq!(chips[2].class_name(), "tech-chip is-text-only");
        assert!(!set.is_hidden());
    }

    #[test]
    fn duplicates_are_kept_and_blanks_dropped() {
        assert_eq!(parse_tokens(" Git || git |"), vec!["git", "git"]);
    }

    #[test]
    fn empty_or_missing_source_hides_container() {
        let d = dict(r#"{"p":{"tech":"  | "}}"#);
        assert!(ChipSet::render(Some(&d), "p.tech").is_hidden());
        assert!(ChipSet::render(Some(&d), "p.none").is_hidden());
        assert!(ChipSet::render(None, "p.tech").is_hidden());
    }

    #[test]
    fn locale_label_overrides_table() {
        let d = dict(r#"{"t":"gcloudrun|easylocalization","techLabels":{"gcloudrun":" Google Cloud Run "}}"#);
        let set = ChipSet::render(Some(&d), "t");
        assert_eq!(set.chips()[0].label, "Google Cloud Run");
        assert_eq!(set.chips()[1].label, "EasyLocalization");
        assert!(set.chips()[1].is_text_only());
    }

    #[test]
    fn generated_labels() {
        assert_eq!(title_case_token("api"), "API");
        assert_eq!(title_case_token("ci/cd"), "CI/CD");
        assert_eq!(title_case_token("rest-api_design"), "Rest Api Design");
        assert_eq!(title_case_token("unit testing"), "Unit Testing");
    }

    #[test]
    fn failed_icon_degrades_single_chip() {
        let d = dict(r#"{"t":"docker|git"}"#);
        let mut set = ChipSet::render(Some(&d), "t");
        set.mark_icon_failed(0);
        set.mark_icon_failed(9);
        assert!(set.chips()[0].is_text_only());
        assert!(!set.chips()[1].is_text_only());
        assert_eq!(set.chips()[0].label, "Docker");
    }
}
