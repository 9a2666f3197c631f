use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use url::Url;

pub const ES_JSON: &str = include_str!("../../../web/public/assets/i18n/es.json");
pub const EN_JSON: &str = include_str!("../../../web/public/assets/i18n/en.json");

#[derive(Debug, Clone, Default)]
pub struct Received {
    pub accept: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl Received {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Inbox = Arc<Mutex<Vec<Received>>>;

pub struct TestServer {
    base: Url,
    inbox: Inbox,
}

impl TestServer {
    /// Static site on a random local port:
    /// - `/assets/i18n/es.json` and `/en.json` serve the shipped dictionaries
    /// - `/broken/assets/i18n/en.json` answers 200 with HTML
    /// - `/forms` records multipart posts, `/forms/broken` always fails
    pub async fn spawn() -> Self {
        let inbox: Inbox = Arc::default();
        let app = Router::new()
            .route(
                "/assets/i18n/es.json",
                get(|| async { ([(CONTENT_TYPE, "application/json")], ES_JSON) }),
            )
            .route(
                "/en.json",
                get(|| async { ([(CONTENT_TYPE, "application/json")], EN_JSON) }),
            )
            .route(
                "/broken/assets/i18n/en.json",
                get(|| async { ([(CONTENT_TYPE, "text/html")], "<!doctype html><p>nope</p>") }),
            )
            .route("/forms", post(record_form))
            .route(
                "/forms/broken",
                post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .with_state(inbox.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind test listener");
        let addr = listener.local_addr().expect("Should have local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server should run");
        });

        Self {
            base: Url::parse(&format!("http://{addr}/")).expect("Should parse base url"),
            inbox,
        }
    }

    pub fn url(&self, path: &str) -> Url {
        self.base.join(path).expect("Should join test url")
    }

    pub fn received(&self) -> Vec<Received> {
        self.inbox.lock().expect("inbox lock").clone()
    }
}

async fn record_form(
    State(inbox): State<Inbox>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> StatusCode {
    let mut received = Received {
        accept: headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        fields: Vec::new(),
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        received.fields.push((name, value));
    }
    inbox.lock().expect("inbox lock").push(received);
    StatusCode::OK
}
