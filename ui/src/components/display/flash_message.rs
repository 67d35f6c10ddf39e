use dioxus::prelude::*;

use crate::features::settings::Flash;

#[derive(Props, PartialEq, Clone)]
pub struct FlashMessageProps {
    pub flash: Option<Flash>,
    #[props(default)]
    pub on_dismiss: Option<EventHandler<()>>,
}

/// Success or error banner; dismissal timing is owned by the caller.
#[component]
pub fn FlashMessage(props: FlashMessageProps) -> Element {
    let Some(flash) = props.flash else {
        return rsx! {};
    };

    let (class, icon) = if flash.is_success() {
        ("flash-message flash-success", "✓")
    } else {
        ("flash-message flash-error", "⚠")
    };

    rsx! {
        div {
            class: "{class}",
            role: if flash.is_success() { "status" } else { "alert" },
            span { class: "flash-icon", "{icon}" }
            span { class: "flash-text", "{flash.message()}" }
            if let Some(on_dismiss) = props.on_dismiss {
                button {
                    class: "flash-dismiss",
                    r#type: "button",
                    "aria-label": "Dismiss",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}
