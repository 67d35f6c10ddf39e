use dioxus::prelude::*;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputType {
    Text,
    Password,
    Email,
    Url,
    Tel,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
            InputType::Url => "url",
            InputType::Tel => "tel",
        }
    }

    pub fn from_html(value: &str) -> Self {
        match value {
            "password" => InputType::Password,
            "email" => InputType::Email,
            "url" => InputType::Url,
            "tel" => InputType::Tel,
            _ => InputType::Text,
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ValidatedInputProps {
    pub id: String,
    pub value: String,
    pub placeholder: String,
    pub input_type: InputType,
    #[props(default = "input-field".to_string())]
    pub input_class: String,
    #[props(default)]
    pub input_style: String,
    #[props(default)]
    pub disabled: bool,
    #[props(default)]
    pub autocomplete: Option<String>,
    pub on_change: EventHandler<String>,
}

#[component]
pub fn ValidatedInput(props: ValidatedInputProps) -> Element {
    rsx! {
        input {
            id: "{props.id}",
            name: "{props.id}",
            class: "{props.input_class}",
            style: "{props.input_style}",
            r#type: "{props.input_type.as_str()}",
            value: "{props.value}",
            placeholder: "{props.placeholder}",
            autocomplete: props.autocomplete.clone(),
            disabled: props.disabled,
            oninput: move |event| props.on_change.call(event.value())
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ValidatedTextAreaProps {
    pub id: String,
    pub value: String,
    pub placeholder: String,
    #[props(default = 3)]
    pub rows: u32,
    #[props(default)]
    pub disabled: bool,
    pub on_change: EventHandler<String>,
}

#[component]
pub fn ValidatedTextArea(props: ValidatedTextAreaProps) -> Element {
    rsx! {
        textarea {
            id: "{props.id}",
            name: "{props.id}",
            class: "input-field textarea-field",
            rows: "{props.rows}",
            value: "{props.value}",
            placeholder: "{props.placeholder}",
            disabled: props.disabled,
            oninput: move |event| props.on_change.call(event.value())
        }
    }
}
