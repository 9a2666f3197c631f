use std::collections::BTreeSet;

use site::{Dictionary, DictionaryLoader, DictionarySource, HttpDictionarySource, Lang};

use crate::support::{TestServer, EN_JSON, ES_JSON};

fn leaf_paths(value: &serde_json::Value, prefix: &str, out: &mut BTreeSet<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                leaf_paths(child, &path, out);
            }
        }
        _ => {
            out.insert(prefix.to_string());
        }
    }
}

#[test]
fn shipped_locales_define_the_same_keys() {
    let mut es = BTreeSet::new();
    let mut en = BTreeSet::new();
    leaf_paths(&serde_json::from_str(ES_JSON).expect("es parses"), "", &mut es);
    leaf_paths(&serde_json::from_str(EN_JSON).expect("en parses"), "", &mut en);
    assert_eq!(es, en);

    let dict = Dictionary::from_json(ES_JSON).expect("es is a dictionary");
    for key in [
        "contact.form.send",
        "contact.sending",
        "contact.validation.subjectRequired",
        "contact.validation.emailInvalid",
        "contact.validation.messageRequired",
        "hero.roles",
        "projects.p1.tech",
    ] {
        assert!(dict.text(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn loads_from_site_root_when_served_from_sub_page() {
    let server = TestServer::spawn().await;
    let loader = DictionaryLoader::new(HttpDictionarySource::default(), server.url("/links/"));

    let dict = loader.load(Lang::Es).await.expect("Should load es");

    assert_eq!(dict.text("nav.home"), Some("Inicio"));
    assert!(loader.cached(Lang::Es).is_some());
}

#[tokio::test]
async fn falls_back_to_flat_layout() {
    let server = TestServer::spawn().await;
    let loader = DictionaryLoader::new(HttpDictionarySource::default(), server.url("/"));

    let dict = loader.load(Lang::En).await.expect("Should load en");
    assert_eq!(dict.text("nav.home"), Some("Home"));
}

#[tokio::test]
async fn unparseable_success_falls_through_to_next_candidate() {
    let server = TestServer::spawn().await;
    let loader = DictionaryLoader::new(HttpDictionarySource::default(), server.url("/broken/"));

    let dict = loader.load(Lang::En).await.expect("Should reach /en.json");
    assert_eq!(dict.text("contact.form.send"), Some("Send message"));
}

#[tokio::test]
async fn error_status_is_a_failure() {
    let server = TestServer::spawn().await;
    let source = HttpDictionarySource::default();

    let err = source
        .fetch(&server.url("/missing.json"))
        .await
        .expect_err("404 should fail");
    assert!(err.to_string().contains("404"), "{err}");
}
