use std::rc::Rc;

use dioxus::prelude::*;
use site::dictionary::t;
use site::{Dictionary, DictionaryLoader, HttpDictionarySource, Lang, LanguageController, Preferences};
use tracing::debug;

use crate::dom::{self, BrowserStorage, DomSurface};

pub const LANG_TOGGLE_ID: &str = "langToggle";

type Controller = LanguageController<HttpDictionarySource, BrowserStorage>;

/// Language context: the controller plus signals fed by its events.
#[derive(Clone)]
pub struct I18n {
    controller: Rc<Controller>,
    pub dictionary: Signal<Option<Rc<Dictionary>>>,
    pub ready: Signal<bool>,
    pub toggle_label: Signal<String>,
}

impl I18n {
    fn surface(&self) -> DomSurface {
        DomSurface::new(self.toggle_label)
    }

    /// Localized string; subscribes the caller to language changes.
    pub fn t(&self, key: &str, fallback: &str) -> String {
        t(self.dictionary.read().as_deref(), key, fallback)
    }

    /// Same as [`I18n::t`] without subscribing, for event handlers and tasks.
    pub fn t_untracked(&self, key: &str, fallback: &str) -> String {
        t(self.dictionary.peek().as_deref(), key, fallback)
    }

    pub fn toggle(&self) {
        let i18n = self.clone();
        spawn(async move {
            let mut surface = i18n.surface();
            i18n.controller.toggle(&mut surface).await;
            debug!("i18n.toggle: now {}", i18n.controller.current());
        });
    }

    /// Re-apply the active dictionary to nodes mounted since the last switch.
    pub fn reapply(&self) {
        self.controller.reapply(&mut self.surface());
    }
}

/// Owns the language controller and provides [`I18n`] to the tree.
#[component]
pub fn I18nProvider(children: Element) -> Element {
    let mut dictionary = use_signal(|| None::<Rc<Dictionary>>);
    let mut ready = use_signal(|| false);
    let toggle_label = use_signal(|| Lang::default().label().to_string());

    let i18n = use_context_provider(move || {
        let controller = Rc::new(LanguageController::new(
            DictionaryLoader::new(HttpDictionarySource::default(), dom::page_url()),
            Preferences::new(BrowserStorage::new()),
        ));
        controller.events().on_changed(move |change| {
            dictionary.set(Some(change.dictionary.clone()));
        });
        controller.events().on_ready(move |_| ready.set(true));
        I18n {
            controller,
            dictionary,
            ready,
            toggle_label,
        }
    });

    use_effect(move || {
        let i18n = i18n.clone();
        spawn(async move {
            let mut surface = i18n.surface();
            i18n.controller.init(&mut surface).await;
        });
    });

    rsx! { {children} }
}

pub fn use_i18n() -> I18n {
    use_context::<I18n>()
}

/// Translate the calling page's tagged nodes once it has mounted.
pub fn use_apply_translations() {
    let i18n = use_i18n();
    use_effect(move || i18n.reapply());
}

#[component]
pub fn LangToggle() -> Element {
    let i18n = use_i18n();
    let label = i18n.toggle_label;
    let aria = i18n.t("nav.lang", "Cambiar idioma");

    rsx! {
        button {
            id: LANG_TOGGLE_ID,
            class: "nav__btn",
            r#type: "button",
            "aria-label": "{aria}",
            title: "{aria}",
            onclick: move |_| i18n.toggle(),
            "{label}"
        }
    }
}
