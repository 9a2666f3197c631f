//! In-memory fakes for every port.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use anyhow::bail;
use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::contact::{FormBackend, Submission};
use crate::dictionary::{Dictionary, DictionarySource};
use crate::language::LanguageSurface;
use crate::prefs::Lang;
use crate::scroll::ScrollPort;
use crate::translate::{Paragraph, Tagged, TranslationSurface};
use crate::typing::{CursorState, Motion, TypingSlot};

pub fn sample_dictionary(lang: Lang) -> Dictionary {
    let value = match lang {
        Lang::Es => json!({
            "nav": { "home": "Inicio", "projects": "Proyectos" },
            "hero": { "title": "Hola, soy Juan", "roles": "Desarrollador|QA" },
            "about": { "body": ["Primer párrafo.", "Segundo párrafo."] },
            "contact": {
                "form": { "send": "Enviar mensaje", "subjectPh": "¿De qué se trata?" },
                "sending": "Enviando…",
                "successTitle": "Mensaje enviado",
                "errorTitle": "No se pudo enviar",
                "validation": {
                    "subjectRequired": "El asunto es obligatorio.",
                    "messageRequired": "El mensaje es obligatorio."
                }
            }
        }),
        Lang::En => json!({
            "nav": { "home": "Home", "projects": "Projects" },
            "hero": { "title": "Hi, I'm Juan", "roles": "Developer|QA" },
            "about": { "body": ["First paragraph.", "Second paragraph."] },
            "contact": {
                "form": { "send": "Send message", "subjectPh": "What is it about?" },
                "sending": "Sending…",
                "successTitle": "Message sent",
                "errorTitle": "Could not send",
                "validation": {
                    "subjectRequired": "Subject is required.",
                    "messageRequired": "Message is required."
                }
            }
        }),
    };
    serde_json::from_value(value).expect("sample dictionary")
}

/// Serves dictionaries by exact URL; everything else is a 404.
#[derive(Default)]
pub struct FakeSource {
    served: HashMap<String, Dictionary>,
    failing: HashSet<String>,
    delayed: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, dict: Dictionary) -> Self {
        self.served.insert(url.to_string(), dict);
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Answer `url` only after yielding to the executor a few times.
    pub fn delay(mut self, url: &str) -> Self {
        self.delayed.insert(url.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DictionarySource for FakeSource {
    async fn fetch(&self, url: &Url) -> anyhow::Result<Dictionary> {
        let url = url.as_str();
        self.requests.borrow_mut().push(url.to_string());
        if self.delayed.contains(url) {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
        }
        if self.failing.contains(url) {
            bail!("HTTP 500 for {url}");
        }
        match self.served.get(url) {
            Some(dict) => Ok(dict.clone()),
            None => bail!("HTTP 404 for {url}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeNode {
    Text(String),
    /// Paragraph text and its bottom margin.
    Paragraphs(Vec<(String, &'static str)>),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FakeElement {
    key: String,
    placeholder: bool,
    node: FakeNode,
}

/// A flat document of tagged elements. Node handles are indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeDocument {
    elements: Vec<FakeElement>,
    document_lang: Option<Lang>,
    toggle_label: Option<String>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, initial: &str) -> Self {
        self.elements.push(FakeElement {
            key: key.to_string(),
            placeholder: false,
            node: FakeNode::Text(initial.to_string()),
        });
        self
    }

    pub fn placeholder(mut self, key: &str, initial: &str) -> Self {
        self.elements.push(FakeElement {
            key: key.to_string(),
            placeholder: true,
            node: FakeNode::Placeholder(initial.to_string()),
        });
        self
    }

    pub fn node(&self, index: usize) -> &FakeNode {
        &self.elements[index].node
    }

    pub fn nodes(&self) -> Vec<&FakeNode> {
        self.elements.iter().map(|e| &e.node).collect()
    }

    pub fn document_lang(&self) -> Option<Lang> {
        self.document_lang
    }

    pub fn toggle_label(&self) -> Option<&str> {
        self.toggle_label.as_deref()
    }

    fn tagged(&self, placeholder: bool) -> Vec<Tagged<usize>> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.placeholder == placeholder)
            .map(|(node, e)| Tagged {
                node,
                key: e.key.clone(),
            })
            .collect()
    }
}

impl TranslationSurface for FakeDocument {
    type Node = usize;

    fn text_nodes(&self) -> Vec<Tagged<usize>> {
        self.tagged(false)
    }

    fn placeholder_nodes(&self) -> Vec<Tagged<usize>> {
        self.tagged(true)
    }

    fn set_text(&mut self, node: &usize, text: &str) {
        self.elements[*node].node = FakeNode::Text(text.to_string());
    }

    fn set_paragraphs(&mut self, node: &usize, paragraphs: &[Paragraph<'_>]) {
        self.elements[*node].node = FakeNode::Paragraphs(
            paragraphs
                .iter()
                .map(|p| (p.text.to_string(), p.margin()))
                .collect(),
        );
    }

    fn set_placeholder(&mut self, node: &usize, text: &str) {
        self.elements[*node].node = FakeNode::Placeholder(text.to_string());
    }
}

impl LanguageSurface for FakeDocument {
    fn set_document_lang(&mut self, lang: Lang) {
        self.document_lang = Some(lang);
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label = Some(label.to_string());
    }
}

/// Records every write to the typing slot.
#[derive(Debug, Default)]
pub struct RecordingSlot {
    pub texts: Vec<String>,
    pub cursor: Option<CursorState>,
}

impl TypingSlot for RecordingSlot {
    fn set_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }

    fn set_cursor(&mut self, cursor: CursorState) {
        self.cursor = Some(cursor);
    }
}

#[derive(Debug)]
pub struct FakeScrollPort {
    targets: HashMap<String, f64>,
    scroll_y: f64,
    nav_height: f64,
    motion: Motion,
    pub menu_open: bool,
    pub scrolls: Vec<f64>,
    pub highlights: usize,
}

impl FakeScrollPort {
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
            scroll_y: 0.0,
            nav_height: 0.0,
            motion: Motion::Full,
            menu_open: false,
            scrolls: Vec::new(),
            highlights: 0,
        }
    }

    /// `top` is viewport-relative, as `getBoundingClientRect` reports it.
    pub fn target(mut self, selector: &str, top: f64) -> Self {
        self.targets.insert(selector.to_string(), top);
        self
    }

    pub fn scrolled(mut self, y: f64) -> Self {
        self.scroll_y = y;
        self
    }

    pub fn nav(mut self, height: f64) -> Self {
        self.nav_height = height;
        self
    }

    pub fn menu_open(mut self) -> Self {
        self.menu_open = true;
        self
    }

    pub fn reduced_motion(mut self) -> Self {
        self.motion = Motion::Reduced;
        self
    }
}

impl ScrollPort for FakeScrollPort {
    fn element_top(&self, selector: &str) -> Option<f64> {
        self.targets.get(selector).copied()
    }

    fn nav_height(&self) -> f64 {
        self.nav_height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.scrolls.push(y);
    }

    fn motion(&self) -> Motion {
        self.motion
    }

    fn close_menu(&mut self) {
        self.menu_open = false;
    }

    fn highlight_contact(&mut self) {
        self.highlights += 1;
    }

    fn now(&self) -> f64 {
        0.0
    }
}

pub struct FakeFormBackend {
    fail: bool,
    sent: RefCell<Vec<Submission>>,
}

impl FakeFormBackend {
    pub fn ok() -> Self {
        Self {
            fail: false,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn last(&self) -> Option<Submission> {
        self.sent.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl FormBackend for FakeFormBackend {
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()> {
        self.sent.borrow_mut().push(submission.clone());
        if self.fail {
            bail!("HTTP 500 Internal Server Error");
        }
        Ok(())
    }
}
