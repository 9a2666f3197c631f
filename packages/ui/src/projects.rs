use dioxus::prelude::*;
use site::ChipSet;

use crate::use_i18n;

const PROJECTS_CSS: Asset = asset!("/assets/styling/projects.css");

/// Dictionary id, Spanish title and description shown before translations load.
const PROJECTS: [(&str, &str, &str); 3] = [
    (
        "p1",
        "Agenda offline",
        "App de citas que funciona sin conexión y sincroniza al volver la red.",
    ),
    (
        "p2",
        "API de reservas",
        "Servicio de reservas con pagos y notificaciones, desplegado en contenedores.",
    ),
    (
        "p3",
        "Mapa de comercios",
        "Directorio de comercios locales con búsqueda geográfica y panel de administración.",
    ),
];

#[component]
pub fn Projects() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: PROJECTS_CSS }

        section { id: "projects", class: "section",
            div { class: "container",
                h2 { class: "section__title", "data-i18n": "projects.title", "Proyectos" }
                p { class: "section__lead", "data-i18n": "projects.subtitle",
                    "Una selección de trabajos recientes."
                }
                div { class: "projects__grid",
                    for (id, title, desc) in PROJECTS {
                        article { key: "{id}", class: "project-card",
                            h3 { class: "project-card__title", "data-i18n": "projects.{id}.title", "{title}" }
                            p { class: "project-card__desc", "data-i18n": "projects.{id}.desc", "{desc}" }
                            TechChips { source: format!("projects.{id}.tech") }
                        }
                    }
                }
            }
        }
    }
}

/// Chip list for the `|`-separated technologies under `source`.
#[component]
pub fn TechChips(source: String) -> Element {
    let i18n = use_i18n();
    let (dictionary, ready) = (i18n.dictionary, i18n.ready);
    let mut chips = use_signal(ChipSet::default);

    let key = source.clone();
    use_effect(move || {
        let dict = dictionary.read().clone();
        if !ready() {
            return;
        }
        chips.set(ChipSet::render(dict.as_deref(), &key));
    });

    let set = chips.read();

    rsx! {
        div {
            class: "tech-list",
            role: "list",
            "data-project-tech": "{source}",
            hidden: set.is_hidden(),
            for (index, chip) in set.chips().iter().enumerate() {
                span {
                    key: "{index}-{chip.token}",
                    class: chip.class_name(),
                    role: "listitem",
                    tabindex: "0",
                    title: "{chip.label}",
                    "aria-label": "{chip.label}",
                    if let Some(icon) = &chip.icon {
                        img {
                            class: "tech-chip__icon",
                            src: "{icon}",
                            alt: "",
                            loading: "lazy",
                            decoding: "async",
                            onerror: move |_| chips.write().mark_icon_failed(index),
                        }
                    }
                    span { class: "tech-chip__label", "{chip.label}" }
                }
            }
        }
    }
}
