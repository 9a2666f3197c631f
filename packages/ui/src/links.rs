use dioxus::prelude::*;
use site::{SiteConfig, TimerSlot};
use tracing::warn;

use crate::use_i18n;

const LINKS_CSS: Asset = asset!("/assets/styling/links.css");

pub const GITHUB_URL: &str = "https://github.com/alexrivera-dev";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/alexrivera-dev";
pub const COPY_HINT_MS: u64 = 2200;

const JS_COPY_TEXT: &str = r#"
const text = await dioxus.recv();
try {
  await navigator.clipboard.writeText(text);
  dioxus.send(true);
} catch (e) {
  dioxus.send(false);
}
"#;

/// `mailto:` link with a prefilled, percent-encoded subject.
pub fn mailto_href(email: &str, subject: &str) -> String {
    format!("mailto:{email}?subject={}", urlencoding::encode(subject))
}

async fn copy_to_clipboard(text: &str) -> bool {
    let mut eval = document::eval(JS_COPY_TEXT);
    if let Err(err) = eval.send(text) {
        warn!("links.copy: {err:?}");
        return false;
    }
    match eval.recv::<bool>().await {
        Ok(copied) => copied,
        Err(err) => {
            warn!("links.copy: {err:?}");
            false
        }
    }
}

/// Stable landing page printed as a QR code on the CV.
#[component]
pub fn LinksPage() -> Element {
    let i18n = use_i18n();
    let config = use_context::<SiteConfig>();
    let mut hint = use_signal(String::new);
    let mut slot = use_signal(TimerSlot::new);

    let subject = i18n.t("contact.title", "Contacto");
    let mailto = mailto_href(&config.contact_email, &subject);
    let email = config.contact_email.clone();

    let on_copy = move |_| {
        let i18n = i18n.clone();
        let email = email.clone();
        spawn(async move {
            if !copy_to_clipboard(&email).await {
                slot.write().cancel();
                hint.set(i18n.t_untracked("links.copyFail", "No se pudo copiar"));
                return;
            }
            hint.set(i18n.t_untracked("links.copied", "Correo copiado"));
            let timer = slot.write().arm_ms(COPY_HINT_MS);
            gloo_timers::future::sleep(timer.delay).await;
            if slot.write().take(timer.id) {
                hint.set(String::new());
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: LINKS_CSS }

        section { class: "section links",
            div { class: "container links__inner",
                h1 { class: "section__title", "data-i18n": "links.title", "Enlaces" }
                p { class: "section__lead", "data-i18n": "links.subtitle", "Dónde encontrarme." }
                ul { class: "links__list",
                    li {
                        Link { class: "links__item", to: "/",
                            span { "data-i18n": "links.portfolio", "Portafolio" }
                        }
                    }
                    li {
                        a {
                            class: "links__item",
                            href: GITHUB_URL,
                            target: "_blank",
                            rel: "noopener noreferrer",
                            span { "data-i18n": "links.github", "GitHub" }
                        }
                    }
                    li {
                        a {
                            class: "links__item",
                            href: LINKEDIN_URL,
                            target: "_blank",
                            rel: "noopener noreferrer",
                            span { "data-i18n": "links.linkedin", "LinkedIn" }
                        }
                    }
                    li {
                        a { class: "links__item", href: "{mailto}",
                            span { "data-i18n": "links.email", "Correo" }
                        }
                    }
                }
                div { class: "links__copy",
                    code { class: "links__address", "{config.contact_email}" }
                    button {
                        id: "copyEmail",
                        class: "btn",
                        r#type: "button",
                        onclick: on_copy,
                        span { "data-i18n": "links.copy", "Copiar correo" }
                    }
                    p { class: "links__hint", role: "status", "aria-live": "polite", "{hint}" }
                }
            }
        }
    }
}
