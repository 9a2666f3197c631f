//! This crate contains all shared UI for the workspace.

pub mod dom;

mod i18n;
pub use i18n::{use_apply_translations, use_i18n, I18n, I18nProvider, LangToggle};

mod theme;
pub use theme::{SiteTheme, ThemeToggle};

mod navbar;
pub use navbar::{Footer, Navbar, ScrollLink};

mod hero;
pub use hero::{About, Hero, TypingText};

mod projects;
pub use projects::{Projects, TechChips};

mod contact;
pub use contact::{ContactForm, ContactSection};

mod links;
pub use links::LinksPage;
