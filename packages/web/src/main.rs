use dioxus::prelude::*;
use site::SiteConfig;
use ui::{Footer, Navbar, ScrollLink};

use views::{Home, Links};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SiteLayout)]
    #[route("/")]
    Home {},
    #[route("/links")]
    Links {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// In-page sections listed in the nav, with their Spanish fallback labels.
const SECTIONS: [(&str, &str, &str); 3] = [
    ("#about", "nav.about", "Sobre mí"),
    ("#projects", "nav.projects", "Proyectos"),
    ("#contact", "nav.contact", "Contacto"),
];

fn main() {
    install_panic_hook();
    init_tracing();
    dioxus::launch(App);
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

// The web launcher forwards tracing events to the browser console.
#[cfg(target_arch = "wasm32")]
fn init_tracing() {}

#[component]
fn App() -> Element {
    use_context_provider(SiteConfig::from_build_env);

    rsx! {
        document::Link { rel: "icon", href: FAVICON, r#type: "image/svg+xml" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ui::SiteTheme {}
        ui::I18nProvider {
            Router::<Route> {}
        }
    }
}

/// Shared chrome. Section links scroll in place on the home page and
/// navigate back to it from anywhere else.
#[component]
fn SiteLayout() -> Element {
    let i18n = ui::use_i18n();
    let on_home = matches!(use_route::<Route>(), Route::Home {});
    let title = i18n.t("meta.title", "Alex Rivera · Desarrollador de software");

    rsx! {
        document::Title { "{title}" }

        Navbar { brand_href: "/",
            for (anchor, label_key, fallback) in SECTIONS {
                if on_home {
                    ScrollLink { key: "{anchor}", href: "{anchor}",
                        span { "data-i18n": label_key, "{fallback}" }
                    }
                } else {
                    Link { key: "{anchor}", to: format!("/{anchor}"),
                        span { "data-i18n": label_key, "{fallback}" }
                    }
                }
            }
            Link { to: Route::Links {},
                span { "data-i18n": "nav.links", "Enlaces" }
            }
        }
        main { id: "home", Outlet::<Route> {} }
        Footer {}
    }
}
