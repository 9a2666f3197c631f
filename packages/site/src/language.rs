//! Active-locale orchestration: load, apply, persist, notify.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::dictionary::{Dictionary, DictionaryLoader, DictionarySource};
use crate::prefs::{Lang, PreferenceBackend, Preferences};
use crate::translate::{apply_translations, TranslationSurface};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguageState {
    #[default]
    Uninitialized,
    Loading(Lang),
    Ready(Lang),
}

/// Payload of the `changed` and `ready` events.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageChanged {
    pub lang: Lang,
    pub dictionary: Rc<Dictionary>,
}

/// Translation surface plus the page chrome the controller owns.
pub trait LanguageSurface: TranslationSurface {
    /// `<html lang>`.
    fn set_document_lang(&mut self, lang: Lang);
    fn set_toggle_label(&mut self, label: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type ChangedListener = Box<dyn FnMut(&LanguageChanged)>;
type ReadyCallback = Box<dyn FnOnce(&LanguageChanged)>;

/// Listener registry. Listeners may subscribe or unsubscribe from inside a
/// callback; changes take effect from the next emission.
#[derive(Default)]
pub struct LanguageEvents {
    next_id: Cell<u64>,
    changed: RefCell<Vec<(Subscription, ChangedListener)>>,
    dropped: RefCell<Vec<Subscription>>,
    ready_queue: RefCell<Vec<ReadyCallback>>,
    ready: RefCell<Option<LanguageChanged>>,
}

impl LanguageEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_changed(&self, listener: impl FnMut(&LanguageChanged) + 'static) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.changed.borrow_mut().push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut changed = self.changed.borrow_mut();
        let before = changed.len();
        changed.retain(|(id, _)| *id != subscription);
        if changed.len() == before {
            // Possibly mid-emission: the listener is checked out.
            self.dropped.borrow_mut().push(subscription);
        }
    }

    /// Runs `callback` once with the first successful locale. If that already
    /// happened it runs right away.
    pub fn on_ready(&self, callback: impl FnOnce(&LanguageChanged) + 'static) {
        let fired = self.ready.borrow().clone();
        match fired {
            Some(payload) => callback(&payload),
            None => self.ready_queue.borrow_mut().push(Box::new(callback)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.borrow().is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.changed.borrow().len()
    }

    fn emit_changed(&self, payload: &LanguageChanged) {
        let mut listeners = std::mem::take(&mut *self.changed.borrow_mut());
        for (_, listener) in listeners.iter_mut() {
            listener(payload);
        }

        let dropped = std::mem::take(&mut *self.dropped.borrow_mut());
        listeners.retain(|(id, _)| !dropped.contains(id));
        let mut changed = self.changed.borrow_mut();
        let added = std::mem::replace(&mut *changed, listeners);
        changed.extend(added);
    }

    fn fire_ready(&self, payload: &LanguageChanged) {
        if self.ready.borrow().is_some() {
            return;
        }
        *self.ready.borrow_mut() = Some(payload.clone());
        let queue = std::mem::take(&mut *self.ready_queue.borrow_mut());
        debug!("i18n.ready: draining {} callbacks", queue.len());
        for callback in queue {
            callback(payload);
        }
    }
}

/// How a `set_lang` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Switch {
    Applied(LanguageChanged),
    /// No dictionary could be loaded; the page keeps its current text.
    Unavailable(Lang),
    /// A newer `set_lang` started while this one was loading.
    Superseded(Lang),
}

pub struct LanguageController<S, B> {
    loader: DictionaryLoader<S>,
    prefs: Preferences<B>,
    state: Cell<LanguageState>,
    ticket: Cell<u64>,
    dictionary: RefCell<Option<Rc<Dictionary>>>,
    events: LanguageEvents,
}

impl<S: DictionarySource, B: PreferenceBackend> LanguageController<S, B> {
    pub fn new(loader: DictionaryLoader<S>, prefs: Preferences<B>) -> Self {
        Self {
            loader,
            prefs,
            state: Cell::new(LanguageState::Uninitialized),
            ticket: Cell::new(0),
            dictionary: RefCell::new(None),
            events: LanguageEvents::new(),
        }
    }

    pub fn state(&self) -> LanguageState {
        self.state.get()
    }

    /// Locale shown (or being loaded); the saved preference before `init`.
    pub fn current(&self) -> Lang {
        match self.state.get() {
            LanguageState::Loading(lang) | LanguageState::Ready(lang) => lang,
            LanguageState::Uninitialized => self.prefs.lang(),
        }
    }

    pub fn dictionary(&self) -> Option<Rc<Dictionary>> {
        self.dictionary.borrow().clone()
    }

    pub fn events(&self) -> &LanguageEvents {
        &self.events
    }

    pub fn loader(&self) -> &DictionaryLoader<S> {
        &self.loader
    }

    pub fn preferences(&self) -> &Preferences<B> {
        &self.prefs
    }

    pub async fn init<T: LanguageSurface>(&self, surface: &mut T) -> Switch {
        let lang = self.prefs.lang();
        debug!("i18n.init: starting with {lang}");
        self.set_lang(lang, surface).await
    }

    pub async fn set_lang_code<T: LanguageSurface>(&self, code: &str, surface: &mut T) -> Switch {
        let lang = Lang::from_code(code).unwrap_or_else(|| {
            warn!("i18n.set_lang: unsupported \"{code}\", using {}", Lang::default());
            Lang::default()
        });
        self.set_lang(lang, surface).await
    }

    pub async fn toggle<T: LanguageSurface>(&self, surface: &mut T) -> Switch {
        self.set_lang(self.current().toggled(), surface).await
    }

    pub async fn set_lang<T: LanguageSurface>(&self, lang: Lang, surface: &mut T) -> Switch {
        let ticket = self.ticket.get() + 1;
        self.ticket.set(ticket);
        self.state.set(LanguageState::Loading(lang));

        let loaded = self.loader.load(lang).await.ok();
        if self.ticket.get() != ticket {
            debug!("i18n.set_lang: {lang} superseded");
            return Switch::Superseded(lang);
        }

        if let Some(dict) = &loaded {
            apply_translations(Some(dict), surface);
        }
        self.prefs.set_lang(lang);
        surface.set_document_lang(lang);
        surface.set_toggle_label(lang.label());
        self.state.set(LanguageState::Ready(lang));

        // The page keeps the last applied text, so late mounts must too.
        let Some(dictionary) = loaded else {
            warn!("i18n.set_lang: {lang} active without translations");
            return Switch::Unavailable(lang);
        };
        *self.dictionary.borrow_mut() = Some(dictionary.clone());

        info!("i18n.set_lang: {lang} ready");
        let payload = LanguageChanged { lang, dictionary };
        self.events.emit_changed(&payload);
        self.events.fire_ready(&payload);
        Switch::Applied(payload)
    }

    /// Re-apply the active dictionary, for content mounted after the last switch.
    pub fn reapply<T: TranslationSurface>(&self, surface: &mut T) {
        let dict = self.dictionary();
        apply_translations(dict.as_deref(), surface);
    }
}
