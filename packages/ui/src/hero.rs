use dioxus::core::Task;
use dioxus::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use site::{CursorState, PhraseSet, TypingRotator, TypingSlot};

use crate::dom;
use crate::{use_i18n, ScrollLink};

const HERO_CSS: Asset = asset!("/assets/styling/hero.css");

#[component]
pub fn Hero() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: HERO_CSS }

        section { class: "hero",
            div { class: "hero__inner container",
                p { class: "hero__kicker", "data-i18n": "hero.kicker", "Hola, soy" }
                h1 { class: "hero__title", "data-i18n": "hero.title", "Alex Rivera" }
                p { class: "hero__roles", TypingText { source: "hero.roles" } }
                p { class: "hero__lead", "data-i18n": "hero.lead",
                    "Construyo apps móviles y backends que se mantienen simples a medida que crecen."
                }
                div { class: "hero__cta",
                    ScrollLink { href: "#projects", class: "btn btn--primary",
                        span { "data-i18n": "hero.ctaProjects", "Ver proyectos" }
                    }
                    ScrollLink { href: "#contact", class: "btn",
                        span { "data-i18n": "hero.ctaContact", "Hablemos" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn About() -> Element {
    rsx! {
        section { id: "about", class: "section",
            div { class: "container",
                h2 { class: "section__title", "data-i18n": "about.title", "Sobre mí" }
                div { class: "about__body", "data-i18n": "about.body",
                    p { "Llevo varios años creando productos de punta a punta." }
                }
            }
        }
    }
}

/// Writes rotator output into two signals.
struct SignalSlot {
    text: Signal<String>,
    cursor: Signal<CursorState>,
}

impl TypingSlot for SignalSlot {
    fn set_text(&mut self, text: &str) {
        self.text.set(text.to_string());
    }

    fn set_cursor(&mut self, cursor: CursorState) {
        self.cursor.set(cursor);
    }
}

/// Cycles through the `|`-separated phrases under `source`, restarting on
/// every language change.
#[component]
pub fn TypingText(source: String) -> Element {
    let i18n = use_i18n();
    let dictionary = i18n.dictionary;
    let ready = i18n.ready;
    let text = use_signal(String::new);
    let cursor = use_signal(|| CursorState::Visible);
    let mut rotator = use_signal(|| TypingRotator::new(source.clone(), SignalSlot { text, cursor }));
    let mut task = use_signal(|| None::<Task>);

    use_effect(move || {
        let dict = dictionary.read().clone();
        if !ready() {
            return;
        }
        let phrases = PhraseSet::from_dictionary(dict.as_deref(), rotator.peek().key());

        if let Some(previous) = task.write().take() {
            previous.cancel();
        }
        let mut rng = StdRng::from_entropy();
        let first = rotator.write().start(phrases, dom::motion(), &mut rng);
        let Some(mut timer) = first else {
            return;
        };

        let driver = spawn(async move {
            loop {
                gloo_timers::future::sleep(timer.delay).await;
                let next = rotator.write().fire(timer.id, &mut rng);
                match next {
                    Some(following) => timer = following,
                    None => break,
                }
            }
        });
        task.set(Some(driver));
    });

    let hidden = cursor() == CursorState::Hidden;

    rsx! {
        span { class: "typing-wrap", "data-typing-key": "{source}",
            span { class: "typing", "{text}" }
            span {
                class: "typing__cursor",
                "aria-hidden": "true",
                hidden: hidden,
                "|"
            }
        }
    }
}
