//! reqwest adapters for the dictionary source and the form endpoint.

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::multipart;
use tracing::debug;
use url::Url;

use crate::contact::{FormBackend, Submission};
use crate::dictionary::{Dictionary, DictionarySource};

#[derive(Debug, Clone, Default)]
pub struct HttpDictionarySource {
    client: reqwest::Client,
}

impl HttpDictionarySource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl DictionarySource for HttpDictionarySource {
    async fn fetch(&self, url: &Url) -> anyhow::Result<Dictionary> {
        debug!("http.dictionary: GET {url}");
        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} for {url}");
        }

        response
            .json::<Dictionary>()
            .await
            .with_context(|| format!("invalid dictionary at {url}"))
    }
}

/// Posts the contact form as multipart data.
#[derive(Debug, Clone)]
pub struct HttpFormBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpFormBackend {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// `endpoint` may be relative to the page the form lives on.
    pub fn from_page(page: &Url, endpoint: &str) -> anyhow::Result<Self> {
        let endpoint = page
            .join(endpoint)
            .with_context(|| format!("invalid contact endpoint {endpoint:?}"))?;
        Ok(Self::new(reqwest::Client::new(), endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl FormBackend for HttpFormBackend {
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()> {
        let form = submission
            .fields
            .iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });

        debug!("http.form: POST {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "text/html")
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} from {}", self.endpoint);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_resolves_against_page() {
        let page = Url::parse("https://site.dev/links/index.html").expect("valid url");
        let root = HttpFormBackend::from_page(&page, "/").expect("resolves");
        assert_eq!(root.endpoint().as_str(), "https://site.dev/");
        let hook = HttpFormBackend::from_page(&page, "https://forms.example/f/abc").expect("resolves");
        assert_eq!(hook.endpoint().as_str(), "https://forms.example/f/abc");
    }
}
