use std::cell::RefCell;
use std::collections::HashMap;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Es, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Lang::Es),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Unsupported codes resolve to the default language.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Text shown on the language toggle.
    pub fn label(self) -> &'static str {
        match self {
            Lang::Es => "ES",
            Lang::En => "EN",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Lang::Es => Lang::En,
            Lang::En => Lang::Es,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph rendered inside the theme toggle.
    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Light => "☀",
            Theme::Dark => "☾",
        }
    }

    /// Dictionary key and Spanish fallback for the toggle's accessible label,
    /// which names the theme the button switches *to*.
    pub fn toggle_label(self) -> (&'static str, &'static str) {
        match self {
            Theme::Light => ("theme.toDark", "Cambiar a modo oscuro"),
            Theme::Dark => ("theme.toLight", "Cambiar a modo claro"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Lang,
    Theme,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::Lang => "lang",
            PreferenceKey::Theme => "theme",
        }
    }
}

/// Key-value storage the preferences persist into.
///
/// Implementations swallow their own failures: a broken storage must never
/// take the page down, it just stops remembering.
pub trait PreferenceBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory backend for tests and for targets without browser storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend.set(key, value);
        backend
    }
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl<B: PreferenceBackend + ?Sized> PreferenceBackend for std::rc::Rc<B> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// The two persisted preferences with their default-fallback policy.
pub struct Preferences<B> {
    backend: B,
}

impl<B: PreferenceBackend> Preferences<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn lang(&self) -> Lang {
        self.backend
            .get(PreferenceKey::Lang.as_str())
            .and_then(|code| Lang::from_code(&code))
            .unwrap_or_default()
    }

    pub fn set_lang(&self, lang: Lang) {
        tracing::debug!("prefs.set_lang: {lang}");
        self.backend.set(PreferenceKey::Lang.as_str(), lang.code());
    }

    pub fn theme(&self) -> Theme {
        self.backend
            .get(PreferenceKey::Theme.as_str())
            .and_then(|name| Theme::from_name(&name))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        tracing::debug!("prefs.set_theme: {}", theme.as_str());
        self.backend.set(PreferenceKey::Theme.as_str(), theme.as_str());
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
