use dioxus::prelude::*;
use ui::{About, ContactSection, Hero, Projects};

#[component]
pub fn Home() -> Element {
    ui::use_apply_translations();

    rsx! {
        Hero {}
        About {}
        Projects {}
        ContactSection {}
    }
}
