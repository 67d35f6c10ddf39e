use dioxus::prelude::*;

use crate::console_warn;
use crate::features::editor::{
    image_data_url, normalize_link, Align, BlockKind, BlockStyle, EditCommand, FontSize, MarkKind,
    Marks, COLOR_SWATCHES, EMOJI, MAX_TABLE_SIZE,
};
use crate::services::config::use_portal_config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Popover {
    Color,
    Highlight,
    Link,
    Table,
    Emoji,
}

fn block_value(kind: Option<&BlockKind>) -> &'static str {
    match kind {
        Some(BlockKind::Heading(1)) => "h1",
        Some(BlockKind::Heading(2)) => "h2",
        Some(BlockKind::Heading(_)) => "h3",
        Some(BlockKind::Quote) => "quote",
        Some(BlockKind::CodeBlock) => "code",
        _ => "p",
    }
}

fn block_style(value: &str) -> BlockStyle {
    match value {
        "h1" => BlockStyle::Heading(1),
        "h2" => BlockStyle::Heading(2),
        "h3" => BlockStyle::Heading(3),
        "quote" => BlockStyle::Quote,
        "code" => BlockStyle::CodeBlock,
        _ => BlockStyle::Paragraph,
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct EditorToolbarProps {
    pub marks: Marks,
    pub block: Option<BlockKind>,
    pub can_undo: bool,
    pub can_redo: bool,
    #[props(default)]
    pub disabled: bool,
    pub on_command: EventHandler<EditCommand>,
}

#[component]
pub fn EditorToolbar(props: EditorToolbarProps) -> Element {
    let on_command = props.on_command;
    let disabled = props.disabled;
    let mut popover = use_signal(|| None::<Popover>);
    let mut link_url = use_signal(String::new);
    let mut link_text = use_signal(String::new);
    let mut link_error = use_signal(|| None::<String>);
    let mut image_error = use_signal(|| None::<String>);
    let mut table_rows = use_signal(|| 2usize);
    let mut table_cols = use_signal(|| 2usize);

    let mut toggle = move |which: Popover| {
        let next = if popover() == Some(which) { None } else { Some(which) };
        popover.set(next);
        link_error.set(None);
    };

    let run = use_callback(move |command: EditCommand| {
        popover.set(None);
        on_command.call(command);
    });

    let mark_button = move |kind: MarkKind, active: bool, label: &'static str, title: &'static str| {
        rsx! {
            button {
                r#type: "button",
                class: if active { "rte-btn active" } else { "rte-btn" },
                title: "{title}",
                "aria-pressed": active,
                disabled,
                onmousedown: move |evt| evt.prevent_default(),
                onclick: move |_| run.call(EditCommand::ToggleMark(kind)),
                "{label}"
            }
        }
    };

    let command_button = move |command: EditCommand, label: &'static str, title: &'static str, enabled: bool| {
        rsx! {
            button {
                r#type: "button",
                class: "rte-btn",
                title: "{title}",
                disabled: disabled || !enabled,
                onmousedown: move |evt| evt.prevent_default(),
                onclick: move |_| run.call(command.clone()),
                "{label}"
            }
        }
    };

    let submit_link = move |_: MouseEvent| {
        match normalize_link(&link_url()) {
            Ok(url) => {
                run.call(EditCommand::InsertLink {
                    url,
                    text: link_text().trim().to_string(),
                });
                link_url.set(String::new());
                link_text.set(String::new());
                link_error.set(None);
            }
            Err(e) => link_error.set(Some(e.to_string())),
        }
    };

    let config = use_portal_config();
    let on_image = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        let config = config.clone();
        spawn(async move {
            let Some(bytes) = engine.read_file(&name).await else {
                console_warn!("[Editor] Could not read {}", name);
                return;
            };
            match image_data_url(
                &name,
                &bytes,
                |mime| config.uploads.allows(mime),
                config.editor.max_image_bytes,
            ) {
                Ok(src) => {
                    image_error.set(None);
                    run.call(EditCommand::InsertImage { src, alt: name });
                }
                Err(e) => image_error.set(Some(e.to_string())),
            }
        });
    };

    let marks = props.marks.clone();
    let current_block = block_value(props.block.as_ref());
    let current_size = marks.font_size.unwrap_or(FontSize::Normal);
    let color_bar = marks.color.clone().unwrap_or_else(|| "#000000".to_string());
    let in_list = |ordered: bool| matches!(props.block, Some(BlockKind::ListItem { ordered: o }) if o == ordered);

    rsx! {
        div {
            class: "rte-toolbar",
            role: "toolbar",

            div {
                class: "rte-group",
                {command_button(EditCommand::Undo, "↶", "Undo", props.can_undo)}
                {command_button(EditCommand::Redo, "↷", "Redo", props.can_redo)}
            }

            div {
                class: "rte-group",
                select {
                    class: "rte-select",
                    title: "Block style",
                    value: "{current_block}",
                    disabled,
                    onchange: move |evt: FormEvent| run.call(EditCommand::SetBlock(block_style(&evt.value()))),
                    option { value: "p", "Paragraph" }
                    option { value: "h1", "Heading 1" }
                    option { value: "h2", "Heading 2" }
                    option { value: "h3", "Heading 3" }
                    option { value: "quote", "Quote" }
                    option { value: "code", "Code block" }
                }
                select {
                    class: "rte-select",
                    title: "Font size",
                    value: "{current_size.label()}",
                    disabled,
                    onchange: move |evt: FormEvent| {
                        let size = FontSize::ALL
                            .into_iter()
                            .find(|size| size.label() == evt.value())
                            .unwrap_or(FontSize::Normal);
                        run.call(EditCommand::SetFontSize(size));
                    },
                    for size in FontSize::ALL {
                        option { key: "{size.label()}", value: "{size.label()}", "{size.label()}" }
                    }
                }
            }

            div {
                class: "rte-group",
                {mark_button(MarkKind::Bold, marks.bold, "B", "Bold")}
                {mark_button(MarkKind::Italic, marks.italic, "I", "Italic")}
                {mark_button(MarkKind::Underline, marks.underline, "U", "Underline")}
                {mark_button(MarkKind::Strike, marks.strike, "S", "Strikethrough")}
                {mark_button(MarkKind::Code, marks.code, "</>", "Inline code")}
            }

            div {
                class: "rte-group rte-popover-host",
                button {
                    r#type: "button",
                    class: "rte-btn",
                    title: "Text colour",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| toggle(Popover::Color),
                    span {
                        class: "rte-color-indicator",
                        style: "border-bottom: 3px solid {color_bar}",
                        "A"
                    }
                }
                button {
                    r#type: "button",
                    class: "rte-btn",
                    title: "Highlight",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| toggle(Popover::Highlight),
                    "🖍"
                }
                if let Some(which @ (Popover::Color | Popover::Highlight)) = popover() {
                    div {
                        class: "rte-popover rte-swatches",
                        for swatch in COLOR_SWATCHES {
                            button {
                                key: "{swatch}",
                                r#type: "button",
                                class: "rte-swatch",
                                title: "{swatch}",
                                style: "background-color: {swatch}",
                                onmousedown: move |evt| evt.prevent_default(),
                                onclick: move |_| {
                                    let value = swatch.to_string();
                                    run.call(if which == Popover::Color {
                                        EditCommand::SetColor(value)
                                    } else {
                                        EditCommand::SetHighlight(value)
                                    })
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "rte-btn rte-swatch-clear",
                            onmousedown: move |evt| evt.prevent_default(),
                            onclick: move |_| {
                                run.call(if which == Popover::Color {
                                    EditCommand::SetColor(String::new())
                                } else {
                                    EditCommand::SetHighlight(String::new())
                                })
                            },
                            "None"
                        }
                    }
                }
            }

            div {
                class: "rte-group",
                button {
                    r#type: "button",
                    class: if in_list(false) { "rte-btn active" } else { "rte-btn" },
                    title: "Bulleted list",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| run.call(EditCommand::ToggleList { ordered: false }),
                    "•≡"
                }
                button {
                    r#type: "button",
                    class: if in_list(true) { "rte-btn active" } else { "rte-btn" },
                    title: "Numbered list",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| run.call(EditCommand::ToggleList { ordered: true }),
                    "1≡"
                }
                {command_button(EditCommand::Outdent, "⇤", "Decrease indent", true)}
                {command_button(EditCommand::Indent, "⇥", "Increase indent", true)}
            }

            div {
                class: "rte-group",
                {command_button(EditCommand::SetAlign(Align::Left), "⯇", "Align left", true)}
                {command_button(EditCommand::SetAlign(Align::Center), "≡", "Align centre", true)}
                {command_button(EditCommand::SetAlign(Align::Right), "⯈", "Align right", true)}
                {command_button(EditCommand::SetAlign(Align::Justify), "☰", "Justify", true)}
            }

            div {
                class: "rte-group rte-popover-host",
                button {
                    r#type: "button",
                    class: if marks.link.is_some() { "rte-btn active" } else { "rte-btn" },
                    title: "Insert link",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| toggle(Popover::Link),
                    "🔗"
                }
                if popover() == Some(Popover::Link) {
                    div {
                        class: "rte-popover rte-link-prompt",
                        input {
                            r#type: "url",
                            class: "input-field",
                            placeholder: "https://example.com",
                            value: "{link_url}",
                            oninput: move |evt| link_url.set(evt.value())
                        }
                        input {
                            r#type: "text",
                            class: "input-field",
                            placeholder: "Link text (optional)",
                            value: "{link_text}",
                            oninput: move |evt| link_text.set(evt.value())
                        }
                        if let Some(message) = link_error() {
                            p { class: "rte-inline-error", role: "alert", "{message}" }
                        }
                        div {
                            class: "rte-popover-actions",
                            button {
                                r#type: "button",
                                class: "rte-btn",
                                onclick: move |_| popover.set(None),
                                "Cancel"
                            }
                            button {
                                r#type: "button",
                                class: "rte-btn primary",
                                onclick: submit_link,
                                "Insert"
                            }
                        }
                    }
                }

                label {
                    class: "rte-btn rte-file-button",
                    title: "Insert image",
                    "🖼"
                    input {
                        r#type: "file",
                        accept: "image/*",
                        class: "rte-file-input",
                        disabled,
                        onchange: on_image
                    }
                }

                button {
                    r#type: "button",
                    class: "rte-btn",
                    title: "Insert table",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| toggle(Popover::Table),
                    "▦"
                }
                if popover() == Some(Popover::Table) {
                    div {
                        class: "rte-popover rte-table-prompt",
                        label {
                            "Rows "
                            input {
                                r#type: "number",
                                min: "1",
                                max: "{MAX_TABLE_SIZE}",
                                value: "{table_rows}",
                                oninput: move |evt| {
                                    if let Ok(rows) = evt.value().parse::<usize>() {
                                        table_rows.set(rows.clamp(1, MAX_TABLE_SIZE));
                                    }
                                }
                            }
                        }
                        label {
                            "Columns "
                            input {
                                r#type: "number",
                                min: "1",
                                max: "{MAX_TABLE_SIZE}",
                                value: "{table_cols}",
                                oninput: move |evt| {
                                    if let Ok(cols) = evt.value().parse::<usize>() {
                                        table_cols.set(cols.clamp(1, MAX_TABLE_SIZE));
                                    }
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "rte-btn primary",
                            onclick: move |_| run.call(EditCommand::InsertTable {
                                rows: table_rows(),
                                cols: table_cols(),
                            }),
                            "Insert table"
                        }
                    }
                }

                {command_button(EditCommand::InsertRule, "―", "Horizontal rule", true)}

                button {
                    r#type: "button",
                    class: "rte-btn",
                    title: "Insert emoji",
                    disabled,
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| toggle(Popover::Emoji),
                    "😊"
                }
                if popover() == Some(Popover::Emoji) {
                    div {
                        class: "rte-popover rte-emoji-grid",
                        for emoji in EMOJI {
                            button {
                                key: "{emoji}",
                                r#type: "button",
                                class: "rte-emoji",
                                onmousedown: move |evt| evt.prevent_default(),
                                onclick: move |_| run.call(EditCommand::InsertText(emoji.to_string())),
                                "{emoji}"
                            }
                        }
                    }
                }
            }

            div {
                class: "rte-group",
                {command_button(EditCommand::ClearFormatting, "⌫", "Clear formatting", true)}
            }

            if let Some(message) = image_error() {
                p { class: "rte-inline-error", role: "alert", "{message}" }
            }
        }
    }
}
