use std::rc::Rc;

use dioxus::prelude::*;
use site::{Preferences, Theme};

use crate::dom::{self, BrowserStorage};
use crate::use_i18n;

const THEME_CSS: Asset = asset!("/assets/styling/theme.css");

pub const THEME_TOGGLE_ID: &str = "themeToggle";

fn saved_theme() -> Theme {
    Preferences::new(BrowserStorage::new()).theme()
}

/// Theme stylesheet; applies the saved theme on mount.
#[component]
pub fn SiteTheme() -> Element {
    use_effect(|| dom::apply_theme(saved_theme()));

    rsx! { document::Link { rel: "stylesheet", href: THEME_CSS } }
}

/// Light/dark switch.
#[component]
pub fn ThemeToggle() -> Element {
    let i18n = use_i18n();
    let prefs = use_hook(|| Rc::new(Preferences::new(BrowserStorage::new())));
    let mut theme = use_signal(|| prefs.theme());

    let current = theme();
    let (key, fallback) = current.toggle_label();
    let label = i18n.t(key, fallback);

    rsx! {
        button {
            id: THEME_TOGGLE_ID,
            class: "nav__btn",
            r#type: "button",
            "aria-label": "{label}",
            title: "{label}",
            onclick: move |_| {
                let next = theme().toggled();
                prefs.set_theme(next);
                dom::apply_theme(next);
                theme.set(next);
            },
            {current.glyph()}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_theme_defaults_to_dark() {
        assert_eq!(saved_theme(), Theme::Dark);
    }
}
