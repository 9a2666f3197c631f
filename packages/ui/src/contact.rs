use std::rc::Rc;

use dioxus::prelude::*;
use site::contact::ContactForm as FormState;
use site::scroll::CONTACT_CARD_ID;
use site::{ContactDraft, Field, FormBackend, HttpFormBackend, SiteConfig};
use tracing::error;

use crate::dom;
use crate::use_i18n;

const CONTACT_CSS: Asset = asset!("/assets/styling/contact.css");

#[component]
pub fn ContactSection() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: CONTACT_CSS }

        section { id: "contact", class: "section",
            div { class: "container",
                h2 { class: "section__title", "data-i18n": "contact.title", "Contacto" }
                p { class: "section__lead", "data-i18n": "contact.subtitle",
                    "¿Tienes un proyecto en mente? Escríbeme."
                }
                div { id: CONTACT_CARD_ID, class: "contact-card", ContactForm {} }
            }
        }
    }
}

#[component]
pub fn ContactForm() -> Element {
    let i18n = use_i18n();
    let dictionary = i18n.dictionary;
    let config = use_context::<SiteConfig>();
    let backend = use_hook(|| {
        let backend = HttpFormBackend::from_page(&dom::page_url(), &config.contact_endpoint);
        if let Err(err) = &backend {
            error!("contact.backend: {err:#}");
        }
        Rc::new(backend)
    });
    let mut form = use_signal(|| FormState::new(config.contact_form_name.clone()));
    let mut draft = use_signal(ContactDraft::default);

    use_effect(move || {
        let dict = dictionary.read().clone();
        form.write().on_language_changed(dict.as_deref());
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let dict = dictionary.peek().clone();
        let current = draft.peek().clone();
        let Ok(submission) = form.write().begin_submit(&current, dict.as_deref()) else {
            return;
        };
        dom::highlight_contact();

        let backend = backend.clone();
        spawn(async move {
            let result = match &*backend {
                Ok(backend) => backend.submit(&submission).await,
                Err(err) => Err(anyhow::anyhow!("contact endpoint unavailable: {err:#}")),
            };
            let dict = dictionary.peek().clone();
            let finished = form.write().finish_submit(result, dict.as_deref());
            if finished.sent {
                draft.set(ContactDraft::default());
            }
            gloo_timers::future::sleep(finished.dismiss.delay).await;
            form.write().dismiss_status(finished.dismiss.id);
        });
    };

    let state = form.read();

    rsx! {
        form {
            id: "contactForm",
            class: "contact-form",
            name: "{config.contact_form_name}",
            novalidate: true,
            onsubmit: on_submit,
            FormField {
                field: Field::Subject,
                label_key: "contact.form.subject",
                label: "Asunto",
                placeholder_key: "contact.form.subjectPh",
                placeholder: "¿De qué se trata?",
                form,
                draft,
            }
            FormField {
                field: Field::Email,
                label_key: "contact.form.email",
                label: "Correo (opcional)",
                placeholder_key: "contact.form.emailPh",
                placeholder: "tu@correo.com",
                form,
                draft,
            }
            FormField {
                field: Field::Message,
                label_key: "contact.form.message",
                label: "Mensaje",
                placeholder_key: "contact.form.messagePh",
                placeholder: "Cuéntame un poco más…",
                form,
                draft,
            }
            if let Some(status) = state.status() {
                div { id: "contactStatus", class: status.kind.class_name(), role: "status",
                    strong { "{status.title}" }
                    span { " {status.message}" }
                }
            }
            button {
                id: "contactSubmit",
                class: "btn btn--primary",
                r#type: "submit",
                disabled: state.is_sending(),
                "aria-busy": if state.is_sending() { "true" } else { "false" },
                "{state.submit_label()}"
            }
        }
    }
}

#[component]
fn FormField(
    field: Field,
    label_key: &'static str,
    label: &'static str,
    placeholder_key: &'static str,
    placeholder: &'static str,
    form: Signal<FormState>,
    draft: Signal<ContactDraft>,
) -> Element {
    let dictionary = use_i18n().dictionary;
    let error = form.read().error(field).map(str::to_string);
    let value = draft.read().get(field).to_string();
    let class = if error.is_some() {
        "field__input is-invalid"
    } else {
        "field__input"
    };

    let oninput = move |evt: FormEvent| {
        draft.write().set(field, evt.value());
        form.write().on_input(field);
    };
    let onblur = move |_| {
        let dict = dictionary.peek().clone();
        let value = draft.peek().get(field).to_string();
        form.write().on_blur(field, &value, dict.as_deref());
    };

    rsx! {
        div { class: "field",
            label { class: "field__label", r#for: field.input_id(), "data-i18n": label_key, "{label}" }
            if field == Field::Message {
                textarea {
                    id: field.input_id(),
                    class,
                    name: field.name(),
                    rows: "5",
                    placeholder,
                    "data-i18n-placeholder": placeholder_key,
                    "aria-invalid": if error.is_some() { "true" } else { "false" },
                    "aria-describedby": field.error_id(),
                    value: "{value}",
                    oninput,
                    onblur,
                }
            } else {
                input {
                    id: field.input_id(),
                    class,
                    name: field.name(),
                    r#type: if field == Field::Email { "email" } else { "text" },
                    placeholder,
                    "data-i18n-placeholder": placeholder_key,
                    "aria-invalid": if error.is_some() { "true" } else { "false" },
                    "aria-describedby": field.error_id(),
                    value: "{value}",
                    oninput,
                    onblur,
                }
            }
            p { id: field.error_id(), class: "field__error", role: "alert", {error.unwrap_or_default()} }
        }
    }
}
