use dioxus::prelude::*;
use ui::LinksPage;

#[component]
pub fn Links() -> Element {
    ui::use_apply_translations();

    rsx! { LinksPage {} }
}
