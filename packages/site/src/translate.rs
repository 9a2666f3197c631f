use tracing::debug;

use crate::dictionary::{Dictionary, Entry};

pub const TEXT_ATTR: &str = "data-i18n";
pub const PLACEHOLDER_ATTR: &str = "data-i18n-placeholder";

/// A node carrying a translation key.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<N> {
    pub node: N,
    pub key: String,
}

/// One block of an array-valued translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph<'a> {
    pub text: &'a str,
    /// Every paragraph but the last keeps spacing below it.
    pub spaced: bool,
}

impl Paragraph<'_> {
    pub fn margin(&self) -> &'static str {
        if self.spaced {
            "0 0 12px"
        } else {
            "0"
        }
    }
}

/// Rendering port for the translation pass.
pub trait TranslationSurface {
    type Node;

    fn text_nodes(&self) -> Vec<Tagged<Self::Node>>;
    fn placeholder_nodes(&self) -> Vec<Tagged<Self::Node>>;
    fn set_text(&mut self, node: &Self::Node, text: &str);
    /// Replace all children of `node` with the given paragraphs.
    fn set_paragraphs(&mut self, node: &Self::Node, paragraphs: &[Paragraph<'_>]);
    fn set_placeholder(&mut self, node: &Self::Node, text: &str);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub texts: usize,
    pub paragraphs: usize,
    pub placeholders: usize,
    pub unresolved: usize,
}

pub fn paragraphs(items: &[String]) -> Vec<Paragraph<'_>> {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, text)| Paragraph {
            text,
            spaced: i != last,
        })
        .collect()
}

/// Fill every tagged node from `dict`. Without a dictionary nothing is touched.
pub fn apply_translations<S: TranslationSurface>(dict: Option<&Dictionary>, surface: &mut S) -> Applied {
    let mut applied = Applied::default();
    let Some(dict) = dict else {
        return applied;
    };

    for Tagged { node, key } in surface.text_nodes() {
        match dict.lookup(&key) {
            Some(Entry::Text(text)) => {
                surface.set_text(&node, text);
                applied.texts += 1;
            }
            Some(Entry::List(items)) => {
                surface.set_paragraphs(&node, &paragraphs(items));
                applied.paragraphs += 1;
            }
            None => applied.unresolved += 1,
        }
    }

    for Tagged { node, key } in surface.placeholder_nodes() {
        match dict.lookup(&key) {
            Some(Entry::Text(text)) => {
                surface.set_placeholder(&node, text);
                applied.placeholders += 1;
            }
            _ => applied.unresolved += 1,
        }
    }

    debug!("i18n.apply: {applied:?}");
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Lang;
    use crate::test_support::{sample_dictionary, FakeDocument, FakeNode};

    #[test]
    fn strings_replace_text_and_misses_leave_nodes_alone() {
        let dict = sample_dictionary(Lang::En);
        let mut doc = FakeDocument::new()
            .text("nav.home", "Inicio")
            .text("nav.nowhere", "Original");

        let applied = apply_translations(Some(&dict), &mut doc);

        assert_eq!(doc.node(0), &FakeNode::Text("Home".into()));
        assert_eq!(doc.node(1), &FakeNode::Text("Original".into()));
        assert_eq!(applied.texts, 1);
        assert_eq!(applied.unresolved, 1);
    }

    #[test]
    fn arrays_become_paragraphs_with_last_unspaced() {
        let dict = sample_dictionary(Lang::Es);
        let mut doc = FakeDocument::new().text("about.body", "old");

        apply_translations(Some(&dict), &mut doc);

        assert_eq!(
            doc.node(0),
            &FakeNode::Paragraphs(vec![
                ("Primer párrafo.".into(), "0 0 12px"),
                ("Segundo párrafo.".into(), "0"),
            ])
        );
    }

    #[test]
    fn placeholders_only_take_strings() {
        let dict = sample_dictionary(Lang::Es);
        let mut doc = FakeDocument::new()
            .placeholder("contact.form.subjectPh", "")
            .placeholder("about.body", "keep");

        apply_translations(Some(&dict), &mut doc);

        assert_eq!(doc.node(0), &FakeNode::Placeholder("¿De qué se trata?".into()));
        assert_eq!(doc.node(1), &FakeNode::Placeholder("keep".into()));
    }

    #[test]
    fn missing_dictionary_is_a_no_op() {
        let mut doc = FakeDocument::new().text("nav.home", "Inicio");
        let before = doc.clone();
        assert_eq!(apply_translations(None, &mut doc), Applied::default());
        assert_eq!(doc, before);
    }

    #[test]
    fn every_tagged_node_matches_its_resolved_value() {
        for lang in Lang::ALL {
            let dict = sample_dictionary(lang);
            let mut doc = FakeDocument::new()
                .text("nav.home", "x")
                .text("nav.projects", "x")
                .text("hero.title", "x");
            apply_translations(Some(&dict), &mut doc);
            for (i, key) in ["nav.home", "nav.projects", "hero.title"].iter().enumerate() {
                let expected = dict.text(key).expect("sample has key");
                assert_eq!(doc.node(i), &FakeNode::Text(expected.into()));
            }
        }
    }
}
