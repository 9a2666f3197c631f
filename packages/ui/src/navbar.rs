use chrono::Datelike;
use dioxus::prelude::*;
use site::scroll::{on_anchor_click, perform};
use site::{AnchorClick, MobileMenu};

use crate::dom::{self, DomScrollPort};
use crate::{use_i18n, LangToggle, ThemeToggle};

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_MENU_ID: &str = "navMenu";

/// Fixed top bar. `children` are the menu entries; the mobile menu state is
/// provided to them so in-page links can close it.
#[component]
pub fn Navbar(brand_href: String, children: Element) -> Element {
    let i18n = use_i18n();
    let mut menu = use_signal(MobileMenu::default);
    use_context_provider(|| menu);

    let _dismiss = use_hook(|| {
        std::rc::Rc::new(dom::on_menu_dismiss("#navMenu, #navToggle", move || {
            if menu.peek().is_open() {
                let mut menu = menu;
                menu.write().close();
            }
        }))
    });

    let state = menu();
    let menu_label = i18n.t("nav.menu", "Abrir menú");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header { class: "nav",
            div { class: "nav__inner container",
                a { class: "nav__brand", href: "{brand_href}",
                    span { class: "nav__mark", "AR" }
                    span { class: "nav__name", "Alex Rivera" }
                }
                nav { id: NAV_MENU_ID, class: state.class_name(), {children} }
                div { class: "nav__actions",
                    LangToggle {}
                    ThemeToggle {}
                    button {
                        id: NAV_TOGGLE_ID,
                        class: "nav__toggle",
                        r#type: "button",
                        "aria-controls": NAV_MENU_ID,
                        "aria-expanded": state.aria_expanded(),
                        "aria-label": "{menu_label}",
                        onclick: move |_| {
                            menu.write().toggle();
                        },
                        span {}
                        span {}
                        span {}
                    }
                }
            }
        }
    }
}

/// Same-page anchor with the nav-offset smooth scroll. Anything the
/// controller does not handle falls through to the browser.
#[component]
pub fn ScrollLink(href: String, #[props(default)] class: String, children: Element) -> Element {
    let menu = try_use_context::<Signal<MobileMenu>>();
    let target = href.clone();

    rsx! {
        a {
            class: "{class}",
            href: "{href}",
            onclick: move |evt: MouseEvent| {
                let mut port = DomScrollPort::new(menu);
                let AnchorClick::Scroll(plan) = on_anchor_click(&target, &mut port) else {
                    return;
                };
                evt.prevent_default();
                if plan.highlight_on_arrival {
                    dom::watch_contact_arrival();
                }
                spawn(async move {
                    perform(&plan, &mut port, dom::next_frame).await;
                });
            },
            {children}
        }
    }
}

#[component]
pub fn Footer() -> Element {
    let year = chrono::Local::now().year();

    rsx! {
        footer { class: "footer",
            div { class: "footer__inner container",
                p { class: "footer__copy",
                    "© {year} Alex Rivera. "
                    span { "data-i18n": "footer.rights", "Todos los derechos reservados." }
                }
                ScrollLink { href: "#home", class: "footer__top",
                    span { "data-i18n": "footer.top", "Volver arriba" }
                }
            }
        }
    }
}
