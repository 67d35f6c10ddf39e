use dioxus::prelude::*;

use super::bridge::{install_js, next_editor_id, region_out_of_step, set_content_js, BridgeEvent};
use super::toolbar::EditorToolbar;
use crate::features::editor::{EditCommand, EditorState, History};
use crate::services::config::use_portal_config;
use crate::{console_error, console_warn};

/// Rich-text field bound to an HTML string.
///
/// `on_change` receives the serialized markup after every edit. A `value`
/// that differs from the last emitted markup replaces the content and
/// restarts the undo history.
#[component]
pub fn RichTextEditor(
    value: String,
    on_change: EventHandler<String>,
    #[props(default = "Start writing...".to_string())] placeholder: String,
    #[props(default)] disabled: bool,
) -> Element {
    let editor_id = use_hook(next_editor_id);
    let history_limit = use_portal_config().editor.history_limit;
    let initial = value.clone();
    let mut editor =
        use_signal(move || EditorState::from_html(&initial, History::new(history_limit)));
    let mut last_emitted = use_signal(|| value.clone());
    let mut error = use_signal(|| None::<String>);

    let push_id = editor_id.clone();
    // `true` restores the caret, which also moves focus into the region
    let push = use_callback(move |restore_caret: bool| {
        let state = editor.peek();
        let selection = restore_caret.then(|| state.selection());
        document::eval(&set_content_js(&push_id, &state.editable_html(), selection));
    });

    let emit = use_callback(move |_: ()| {
        let html = editor.peek().html();
        last_emitted.set(html.clone());
        on_change.call(html);
    });

    // Event bridge, installed once the region is mounted
    let bridge_id = editor_id.clone();
    use_effect(move || {
        let js = install_js(&bridge_id, &editor.peek().editable_html());
        spawn(async move {
            let mut eval = document::eval(&js);
            loop {
                match eval.recv::<BridgeEvent>().await {
                    Ok(BridgeEvent::Input {
                        html,
                        selection,
                        blocks,
                    }) => {
                        let changed = editor
                            .with_mut(|state| state.sync_from_markup(&html, selection.map(Into::into)));
                        if region_out_of_step(blocks, editor.peek().document()) {
                            push.call(true);
                        }
                        if changed {
                            emit.call(());
                        }
                    }
                    Ok(BridgeEvent::Paste { html, text, selection }) => {
                        let result = editor.with_mut(|state| {
                            if let Some(selection) = selection {
                                state.set_selection(selection.into());
                            }
                            state.paste(html.as_deref(), &text)
                        });
                        match result {
                            Ok(true) => {
                                push.call(true);
                                emit.call(());
                            }
                            Ok(false) => {}
                            Err(e) => console_warn!("[Editor] Paste rejected: {}", e),
                        }
                    }
                    Ok(BridgeEvent::Selection { selection }) => {
                        if let Some(selection) = selection {
                            editor.with_mut(|state| state.set_selection(selection.into()));
                        }
                    }
                    Err(e) => {
                        console_error!("[Editor] Bridge closed: {:?}", e);
                        break;
                    }
                }
            }
        });
    });

    // Values set from outside, e.g. settings loaded after mount
    use_effect(use_reactive((&value,), move |(value,)| {
        if value == *last_emitted.peek() {
            return;
        }
        editor.with_mut(|state| state.replace_html(&value));
        last_emitted.set(value);
        push.call(false);
    }));

    let on_command = move |command: EditCommand| {
        let result = editor.with_mut(|state| state.execute(&command));
        match result {
            Ok(changed) => {
                error.set(None);
                if changed {
                    push.call(true);
                    emit.call(());
                }
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let (marks, block, can_undo, can_redo, stats, is_empty) = {
        let state = editor.read();
        (
            state.active_marks(),
            state.active_block().cloned(),
            state.can_undo(),
            state.can_redo(),
            state.stats(),
            state.document().is_empty(),
        )
    };

    rsx! {
        div {
            class: if disabled { "rte rte-disabled" } else { "rte" },

            EditorToolbar {
                marks,
                block,
                can_undo,
                can_redo,
                disabled,
                on_command
            }

            if let Some(message) = error() {
                p { class: "rte-inline-error", role: "alert", "{message}" }
            }

            div {
                id: "{editor_id}",
                class: if is_empty { "rte-content is-empty" } else { "rte-content" },
                contenteditable: if disabled { "false" } else { "true" },
                spellcheck: "true",
                role: "textbox",
                "aria-multiline": "true",
                "data-placeholder": "{placeholder}",
            }

            div {
                class: "rte-counts",
                span { "{stats.words} words" }
                span { "{stats.chars} characters" }
            }
        }
    }
}
