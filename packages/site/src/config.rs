//! Deployment settings baked in at build time.

use crate::contact::DEFAULT_FORM_NAME;

pub const DEFAULT_CONTACT_ENDPOINT: &str = "/";
pub const DEFAULT_CONTACT_EMAIL: &str = "hola@example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Where the contact form posts, relative to the page or absolute.
    pub contact_endpoint: String,
    pub contact_form_name: String,
    pub contact_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
            contact_form_name: DEFAULT_FORM_NAME.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let defaults = Self::default();
        Self {
            contact_endpoint: read("SITE_CONTACT_ENDPOINT", defaults.contact_endpoint),
            contact_form_name: read("SITE_CONTACT_FORM_NAME", defaults.contact_form_name),
            contact_email: read("SITE_CONTACT_EMAIL", defaults.contact_email),
        }
    }

    /// Values captured from the environment of the build, since the browser has none.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "SITE_CONTACT_ENDPOINT" => option_env!("SITE_CONTACT_ENDPOINT"),
                "SITE_CONTACT_FORM_NAME" => option_env!("SITE_CONTACT_FORM_NAME"),
                "SITE_CONTACT_EMAIL" => option_env!("SITE_CONTACT_EMAIL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }
}
