use thiserror::Error;

use crate::prefs::Lang;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Every candidate location failed; carries the last failure.
    #[error("no dictionary for \"{lang}\" after trying {tried} locations: {last}")]
    Exhausted {
        lang: Lang,
        tried: usize,
        last: anyhow::Error,
    },
    /// No candidate location could be built from the page URL.
    #[error("no candidate locations for \"{0}\"")]
    NoCandidates(Lang),
}
