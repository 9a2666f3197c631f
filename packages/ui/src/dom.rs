//! Browser adapters for the `site` ports.
//!
//! Everything touching `web_sys` lives here. Other targets get inert
//! versions so the workspace still builds and the components still render.

use std::time::Duration;

use dioxus::prelude::*;
use site::{Lang, LanguageSurface, MobileMenu, Motion, ScrollPort, Theme};

pub use browser::*;

pub const NAV_SELECTOR: &str = ".nav";
const FRAME: Duration = Duration::from_millis(16);
const FALLBACK_PAGE_URL: &str = "http://localhost/";

/// Writes translations into the live document and the toggle label into its signal.
#[derive(Clone, Copy)]
pub struct DomSurface {
    toggle_label: Signal<String>,
}

impl DomSurface {
    pub fn new(toggle_label: Signal<String>) -> Self {
        Self { toggle_label }
    }
}

impl LanguageSurface for DomSurface {
    fn set_document_lang(&mut self, lang: Lang) {
        set_root_attribute("lang", lang.code());
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label.set(label.to_string());
    }
}

pub fn apply_theme(theme: Theme) {
    set_root_attribute("data-theme", theme.as_str());
}

pub struct DomScrollPort {
    menu: Option<Signal<MobileMenu>>,
}

impl DomScrollPort {
    pub fn new(menu: Option<Signal<MobileMenu>>) -> Self {
        Self { menu }
    }
}

impl ScrollPort for DomScrollPort {
    fn element_top(&self, selector: &str) -> Option<f64> {
        element_rect(selector).map(|(top, _)| top)
    }

    fn nav_height(&self) -> f64 {
        nav_height()
    }

    fn scroll_y(&self) -> f64 {
        scroll_y()
    }

    fn scroll_to(&mut self, y: f64) {
        scroll_to(y);
    }

    fn motion(&self) -> Motion {
        motion()
    }

    fn close_menu(&mut self) {
        if let Some(mut menu) = self.menu {
            if menu.peek().is_open() {
                menu.write().close();
            }
        }
    }

    fn highlight_contact(&mut self) {
        highlight_contact();
    }

    fn now(&self) -> f64 {
        now()
    }
}

/// Resolves with the timestamp of (roughly) the next frame.
pub async fn next_frame() -> f64 {
    gloo_timers::future::sleep(FRAME).await;
    now()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use dioxus::prelude::*;
    use site::scroll::{ARRIVAL_FIRST_CHECK_MS, CONTACT_CARD_ID, CONTACT_SECTION_ID, HIGHLIGHT_CLASS};
    use site::translate::{PLACEHOLDER_ATTR, TEXT_ATTR};
    use site::{ContactArrivalWatcher, MemoryBackend, Motion, Paragraph, PreferenceBackend, Tagged};
    use tracing::{debug, warn};
    use url::Url;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, HtmlElement, KeyboardEvent};

    use super::{DomSurface, FALLBACK_PAGE_URL, NAV_SELECTOR};

    fn window() -> Option<web_sys::Window> {
        web_sys::window()
    }

    fn document() -> Option<web_sys::Document> {
        window()?.document()
    }

    fn query(selector: &str) -> Option<Element> {
        document()?.query_selector(selector).ok().flatten()
    }

    fn query_all(selector: &str) -> Vec<Element> {
        let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn tagged(attr: &str) -> Vec<Tagged<Element>> {
        query_all(&format!("[{attr}]"))
            .into_iter()
            .filter_map(|node| {
                let key = node.get_attribute(attr)?;
                Some(Tagged { node, key })
            })
            .collect()
    }

    pub fn set_root_attribute(name: &str, value: &str) {
        if let Some(root) = document().and_then(|d| d.document_element()) {
            let _ = root.set_attribute(name, value);
        }
    }

    impl site::TranslationSurface for DomSurface {
        type Node = Element;

        fn text_nodes(&self) -> Vec<Tagged<Element>> {
            tagged(TEXT_ATTR)
        }

        fn placeholder_nodes(&self) -> Vec<Tagged<Element>> {
            tagged(PLACEHOLDER_ATTR)
        }

        fn set_text(&mut self, node: &Element, text: &str) {
            node.set_text_content(Some(text));
        }

        fn set_paragraphs(&mut self, node: &Element, paragraphs: &[Paragraph<'_>]) {
            let Some(doc) = document() else { return };
            node.set_text_content(None);
            for paragraph in paragraphs {
                let Ok(p) = doc.create_element("p") else { continue };
                p.set_text_content(Some(paragraph.text));
                let _ = p.set_attribute("style", &format!("margin: {}", paragraph.margin()));
                let _ = node.append_child(&p);
            }
        }

        fn set_placeholder(&mut self, node: &Element, text: &str) {
            let _ = node.set_attribute("placeholder", text);
        }
    }

    /// `localStorage`, falling back to memory when storage is unavailable
    /// (private browsing, disabled cookies).
    #[derive(Default)]
    pub struct BrowserStorage {
        fallback: MemoryBackend,
    }

    impl BrowserStorage {
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn local_storage() -> Option<web_sys::Storage> {
        window()?.local_storage().ok().flatten()
    }

    impl PreferenceBackend for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            match local_storage() {
                Some(storage) => storage.get_item(key).ok().flatten(),
                None => self.fallback.get(key),
            }
        }

        fn set(&self, key: &str, value: &str) {
            let stored = local_storage().is_some_and(|s| s.set_item(key, value).is_ok());
            if !stored {
                warn!("prefs.storage: could not persist {key}, keeping it in memory");
                self.fallback.set(key, value);
            }
        }
    }

    pub fn page_url() -> Url {
        let href = window().and_then(|w| w.location().href().ok());
        match href.and_then(|h| Url::parse(&h).ok()) {
            Some(url) => url,
            None => Url::parse(FALLBACK_PAGE_URL).expect("fallback url parses"),
        }
    }

    pub fn motion() -> Motion {
        let reduced = window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
            .is_some_and(|mq| mq.matches());
        if reduced {
            Motion::Reduced
        } else {
            Motion::Full
        }
    }

    pub fn now() -> f64 {
        window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_default()
    }

    pub fn element_rect(selector: &str) -> Option<(f64, f64)> {
        let rect = query(selector)?.get_bounding_client_rect();
        Some((rect.top(), rect.bottom()))
    }

    pub fn nav_height() -> f64 {
        query(NAV_SELECTOR)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| f64::from(el.offset_height()))
            .unwrap_or_default()
    }

    pub fn scroll_y() -> f64 {
        window().and_then(|w| w.scroll_y().ok()).unwrap_or_default()
    }

    pub fn scroll_to(y: f64) {
        if let Some(w) = window() {
            w.scroll_to_with_x_and_y(0.0, y);
        }
    }

    /// Remove, reflow, re-add: the animation replays on every arrival.
    pub fn highlight_contact() {
        let Some(card) = document().and_then(|d| d.get_element_by_id(CONTACT_CARD_ID)) else {
            return;
        };
        let classes = card.class_list();
        let _ = classes.remove_1(HIGHLIGHT_CLASS);
        if let Some(el) = card.dyn_ref::<HtmlElement>() {
            let _ = el.offset_width();
        }
        let _ = classes.add_1(HIGHLIGHT_CLASS);
    }

    struct ScrollListener {
        closure: Closure<dyn FnMut()>,
    }

    impl ScrollListener {
        fn detach(&self) {
            if let Some(w) = window() {
                let _ = w.remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref());
            }
        }
    }

    impl Drop for ScrollListener {
        fn drop(&mut self) {
            self.detach();
        }
    }

    thread_local! {
        static ARRIVAL: RefCell<Option<ScrollListener>> = const { RefCell::new(None) };
    }

    /// Highlight the contact card the first time the section scrolls under
    /// the nav bar. Re-arming replaces any previous watcher.
    pub fn watch_contact_arrival() {
        let Some(win) = window() else { return };
        let watcher = Rc::new(Cell::new(ContactArrivalWatcher::new()));
        let check = Rc::new(move || {
            let mut current = watcher.get();
            if !current.is_armed() {
                return;
            }
            let Some((top, bottom)) = element_rect(&format!("#{CONTACT_SECTION_ID}")) else {
                return;
            };
            if current.observe(top, bottom, nav_height()) {
                debug!("scroll.arrival: contact reached");
                highlight_contact();
                ARRIVAL.with(|slot| {
                    if let Some(listener) = slot.borrow().as_ref() {
                        listener.detach();
                    }
                });
            }
            watcher.set(current);
        });

        let on_scroll = check.clone();
        let closure = Closure::<dyn FnMut()>::new(move || on_scroll());
        if win
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .is_err()
        {
            return;
        }
        ARRIVAL.with(|slot| *slot.borrow_mut() = Some(ScrollListener { closure }));

        spawn(async move {
            gloo_timers::future::sleep(Duration::from_millis(ARRIVAL_FIRST_CHECK_MS)).await;
            check();
        });
    }

    /// Document-level listeners that close the mobile menu; removed on drop.
    pub struct MenuDismissListeners {
        click: Closure<dyn FnMut(Event)>,
        key: Closure<dyn FnMut(KeyboardEvent)>,
    }

    impl Drop for MenuDismissListeners {
        fn drop(&mut self) {
            if let Some(doc) = document() {
                let _ = doc.remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
                let _ = doc.remove_event_listener_with_callback("keydown", self.key.as_ref().unchecked_ref());
            }
        }
    }

    /// Calls `close` on clicks outside `inside` (a selector) and on Escape.
    pub fn on_menu_dismiss(inside: &'static str, close: impl Fn() + Clone + 'static) -> Option<MenuDismissListeners> {
        let doc = document()?;

        let on_click = close.clone();
        let click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let inside_menu = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(inside).ok().flatten())
                .is_some();
            if !inside_menu {
                on_click();
            }
        });
        let key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                close();
            }
        });

        doc.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .ok()?;
        doc.add_event_listener_with_callback("keydown", key.as_ref().unchecked_ref())
            .ok()?;
        Some(MenuDismissListeners { click, key })
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod browser {
    use site::{MemoryBackend, Motion, Paragraph, PreferenceBackend, Tagged};
    use url::Url;

    use super::{DomSurface, FALLBACK_PAGE_URL};

    pub fn set_root_attribute(_name: &str, _value: &str) {}

    impl site::TranslationSurface for DomSurface {
        type Node = ();

        fn text_nodes(&self) -> Vec<Tagged<()>> {
            Vec::new()
        }

        fn placeholder_nodes(&self) -> Vec<Tagged<()>> {
            Vec::new()
        }

        fn set_text(&mut self, _node: &(), _text: &str) {}

        fn set_paragraphs(&mut self, _node: &(), _paragraphs: &[Paragraph<'_>]) {}

        fn set_placeholder(&mut self, _node: &(), _text: &str) {}
    }

    #[derive(Default)]
    pub struct BrowserStorage {
        inner: MemoryBackend,
    }

    impl BrowserStorage {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl PreferenceBackend for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) {
            self.inner.set(key, value);
        }
    }

    pub fn page_url() -> Url {
        Url::parse(FALLBACK_PAGE_URL).expect("fallback url parses")
    }

    pub fn motion() -> Motion {
        Motion::Full
    }

    pub fn now() -> f64 {
        0.0
    }

    pub fn element_rect(_selector: &str) -> Option<(f64, f64)> {
        None
    }

    pub fn nav_height() -> f64 {
        0.0
    }

    pub fn scroll_y() -> f64 {
        0.0
    }

    pub fn scroll_to(_y: f64) {}

    pub fn highlight_contact() {}

    pub fn watch_contact_arrival() {}

    pub struct MenuDismissListeners;

    pub fn on_menu_dismiss(_inside: &'static str, _close: impl Fn() + Clone + 'static) -> Option<MenuDismissListeners> {
        None
    }
}
