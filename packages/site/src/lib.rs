//! This crate contains the page behaviour shared by every renderer.
//!
//! Nothing in here touches the DOM. Each feature exposes a small port trait
//! (translation surface, typing slot, scroll port, storage backend, HTTP
//! source) and the `ui` crate plugs browser adapters into them.

pub mod config;
pub mod contact;
pub mod dictionary;
pub mod error;
pub mod http;
pub mod language;
pub mod nav;
pub mod prefs;
pub mod scroll;
pub mod tech;
pub mod timer;
pub mod translate;
pub mod typing;

#[cfg(test)]
mod test_support;

pub use config::SiteConfig;
pub use contact::{
    Blocked, ContactDraft, ContactForm, Field, Finished, FormBackend, StatusBanner, StatusKind,
    Submission,
};
pub use dictionary::{Dictionary, DictionaryLoader, DictionarySource, Entry};
pub use error::LoadError;
pub use http::{HttpDictionarySource, HttpFormBackend};
pub use language::{
    LanguageChanged, LanguageController, LanguageEvents, LanguageState, LanguageSurface,
    Subscription, Switch,
};
pub use nav::MobileMenu;
pub use prefs::{Lang, MemoryBackend, PreferenceBackend, Preferences, Theme};
pub use scroll::{AnchorClick, ContactArrivalWatcher, ScrollPlan, ScrollPort};
pub use tech::{ChipSet, TechChip};
pub use timer::{Timer, TimerId, TimerSlot};
pub use translate::{apply_translations, Paragraph, Tagged, TranslationSurface};
pub use typing::{CursorState, Motion, PhraseSet, TypingRotator, TypingSlot, TypingTiming};
