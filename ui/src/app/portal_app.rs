use dioxus::prelude::*;

use crate::components::layout::SiteHeader;
use crate::console_info;
use crate::services::config::get_global_config;
use crate::services::session::SessionProvider;

const PORTAL_CSS: Asset = asset!("/assets/styling/portal.css");
const EDITOR_CSS: Asset = asset!("/assets/styling/editor.css");

/// Application shell: session context, header and page body.
#[component]
pub fn PortalApp(children: Element) -> Element {
    let config = use_context_provider(get_global_config);
    use_hook(move || {
        console_info!("[Portal] Using API at {}", config.api.base_url);
    });

    rsx! {
        document::Link { rel: "stylesheet", href: PORTAL_CSS }
        document::Link { rel: "stylesheet", href: EDITOR_CSS }

        SessionProvider {
            div {
                class: "portal-app",
                SiteHeader {}
                main {
                    class: "portal-main",
                    {children}
                }
            }
        }
    }
}
