use dioxus::prelude::*;

use crate::features::auth;
use crate::features::header::{is_condensed, nav_items, NavItem};
use crate::services::client::{PortalApi, PortalClient, PublicSiteInfo};
use crate::services::config::use_portal_config;
use crate::services::session::use_session;
use crate::utils::redirect_to;
use crate::{console_error, console_warn};

pub const DEFAULT_SITE_NAME: &str = "News Portal";

/// Reports `window.scrollY` on every scroll event, plus once on attach.
const SCROLL_BRIDGE_JS: &str = r#"(function() {
    var report = function() { dioxus.send(window.scrollY || 0); };
    window.addEventListener('scroll', report, { passive: true });
    report();
})();"#;

#[component]
pub fn SiteHeader() -> Element {
    let session = use_session();
    let config = use_portal_config();
    let mut site_info = use_signal(|| None::<PublicSiteInfo>);
    let mut condensed = use_signal(|| false);
    let mut menu_open = use_signal(|| false);

    let api = config.api.clone();
    use_hook(move || {
        spawn(async move {
            let client = PortalClient::new(&api);
            let info = match client.fetch_public_info().await {
                Ok(envelope) => envelope.into_data(),
                Err(e) => Err(e),
            };
            match info {
                Ok(info) => site_info.set(Some(info)),
                Err(e) => console_warn!("[Header] Public site info unavailable: {}", e),
            }
        });
    });

    use_hook(move || {
        let threshold = config.ui.scroll_threshold_px;
        spawn(async move {
            let mut eval = document::eval(SCROLL_BRIDGE_JS);
            while let Ok(scroll_y) = eval.recv::<f64>().await {
                let next = is_condensed(scroll_y, threshold);
                if *condensed.peek() != next {
                    condensed.set(next);
                }
            }
        });
    });

    let logout_session = session.clone();
    let on_logout = move |_| {
        if let Err(e) = auth::logout(&logout_session) {
            console_error!("[Header] Logout failed: {}", e);
        }
        menu_open.set(false);
        redirect_to("/");
    };

    let info = site_info();
    let site_name = info
        .as_ref()
        .map(|info| info.site_name.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_SITE_NAME)
        .to_string();
    let tagline = info.as_ref().map(|info| info.tagline.clone()).unwrap_or_default();
    let logo_url = info.as_ref().and_then(|info| info.logo_url.clone());
    let items = nav_items(session.current().as_ref());

    rsx! {
        header {
            class: if condensed() { "site-header condensed" } else { "site-header" },

            div {
                class: "header-brand",
                a {
                    href: "/",
                    class: "brand-link",
                    if let Some(logo) = logo_url {
                        img { class: "brand-logo", src: "{logo}", alt: "{site_name}" }
                    }
                    span { class: "brand-name", "{site_name}" }
                }
                if !tagline.is_empty() && !condensed() {
                    p { class: "brand-tagline", "{tagline}" }
                }
            }

            button {
                class: "menu-toggle",
                r#type: "button",
                "aria-label": "Toggle navigation",
                "aria-expanded": menu_open(),
                onclick: move |_| menu_open.toggle(),
                if menu_open() { "✕" } else { "☰" }
            }

            nav {
                class: if menu_open() { "site-nav open" } else { "site-nav" },
                ul {
                    for item in items {
                        li {
                            key: "{item.label()}",
                            class: "nav-item",
                            match &item {
                                NavItem::Account(_) => rsx! {
                                    span { class: "nav-greeting", "{item.label()}" }
                                },
                                NavItem::Logout => rsx! {
                                    button {
                                        class: "nav-link nav-logout",
                                        r#type: "button",
                                        onclick: on_logout.clone(),
                                        "{item.label()}"
                                    }
                                },
                                _ => rsx! {
                                    a {
                                        class: "nav-link",
                                        href: item.href().unwrap_or("/"),
                                        "{item.label()}"
                                    }
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
