//! Per-locale translation dictionaries and the loader that fetches them.
//!
//! A dictionary is a tree of sections whose leaves are strings or arrays of
//! strings, addressed with dotted paths (`contact.form.send`). Anything else
//! found in the JSON resolves to "not found".

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::LoadError;
use crate::prefs::Lang;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    List(Vec<String>),
    Section(BTreeMap<String, Node>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    root: BTreeMap<String, Node>,
}

/// A resolved leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl Dictionary {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn lookup(&self, path: &str) -> Option<Entry<'_>> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                Node::Section(children) => node = children.get(segment)?,
                _ => return None,
            }
        }
        match node {
            Node::Text(text) => Some(Entry::Text(text)),
            Node::List(items) => Some(Entry::List(items)),
            Node::Section(_) | Node::Other(_) => None,
        }
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        match self.lookup(path)? {
            Entry::Text(text) => Some(text),
            Entry::List(_) => None,
        }
    }

    /// Localized string for UI chrome: a non-blank string value, else `fallback`.
    pub fn text_or(&self, path: &str, fallback: &str) -> String {
        match self.text(path) {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// `text_or` against an optional dictionary.
pub fn t(dict: Option<&Dictionary>, path: &str, fallback: &str) -> String {
    match dict {
        Some(dict) => dict.text_or(path, fallback),
        None => fallback.to_string(),
    }
}

/// Where dictionaries come from.
#[async_trait(?Send)]
pub trait DictionarySource {
    /// Fetch and parse one candidate; non-success statuses are errors.
    async fn fetch(&self, url: &Url) -> anyhow::Result<Dictionary>;
}

const CANDIDATES: [&str; 5] = [
    "./assets/i18n/{lang}.json",
    "/assets/i18n/{lang}.json",
    "../assets/i18n/{lang}.json",
    "./{lang}.json",
    "../{lang}.json",
];

/// Candidate locations for `lang`, resolved against the page URL so the
/// site works from the root, from sub-pages and from a sub-path deployment.
pub fn candidate_urls(base: &Url, lang: Lang) -> Vec<Url> {
    CANDIDATES
        .iter()
        .map(|pattern| pattern.replace("{lang}", lang.code()))
        .filter_map(|relative| match base.join(&relative) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!("i18n.candidate_urls: skipping {relative}: {err}");
                None
            }
        })
        .fold(Vec::new(), |mut urls, url| {
            if !urls.contains(&url) {
                urls.push(url);
            }
            urls
        })
}

/// Fetches dictionaries in candidate order and caches them per locale.
pub struct DictionaryLoader<S> {
    source: S,
    base: Url,
    cache: RefCell<HashMap<Lang, Rc<Dictionary>>>,
}

impl<S: DictionarySource> DictionaryLoader<S> {
    pub fn new(source: S, base: Url) -> Self {
        Self {
            source,
            base,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn cached(&self, lang: Lang) -> Option<Rc<Dictionary>> {
        self.cache.borrow().get(&lang).cloned()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self, lang: Lang) -> Result<Rc<Dictionary>, LoadError> {
        if let Some(dict) = self.cached(lang) {
            debug!("i18n.load: cache hit for {lang}");
            return Ok(dict);
        }

        let candidates = candidate_urls(&self.base, lang);
        match self.fetch_first_ok(lang, &candidates).await {
            Ok(dict) => {
                let dict = Rc::new(dict);
                self.cache.borrow_mut().insert(lang, dict.clone());
                Ok(dict)
            }
            Err(err) => {
                let tried: Vec<&str> = candidates.iter().map(Url::as_str).collect();
                error!("i18n.load: could not load \"{lang}\"; tried {tried:?}: {err}");
                Err(err)
            }
        }
    }

    async fn fetch_first_ok(&self, lang: Lang, candidates: &[Url]) -> Result<Dictionary, LoadError> {
        let mut last = None;
        for url in candidates {
            match self.source.fetch(url).await {
                Ok(dict) => {
                    debug!("i18n.load: {lang} from {url}");
                    return Ok(dict);
                }
                Err(err) => {
                    debug!("i18n.load: {url} failed: {err}");
                    last = Some(err);
                }
            }
        }
        match last {
            Some(last) => Err(LoadError::Exhausted {
                lang,
                tried: candidates.len(),
                last,
            }),
            None => Err(LoadError::NoCandidates(lang)),
        }
    }
}
