//! Minimal HTML tokenizer shared by the paste sanitizer and the markup
//! parser. It is lenient: anything that does not look like a tag is text.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    End {
        name: String,
    },
    Text(String),
    Comment,
    /// Doctype and processing instructions
    Declaration,
}

impl Token {
    pub fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
        attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title", "xmp"];

pub const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub fn is_void(name: &str) -> bool {
    VOID.contains(&name)
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            tokens.push(Token::Comment);
            continue;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            tokens.push(Token::Declaration);
            continue;
        }

        if let Some(after) = rest.strip_prefix("</") {
            if after.starts_with(|c: char| c.is_ascii_alphabetic()) {
                let name = tag_name(after);
                rest = after.find('>').map_or("", |end| &after[end + 1..]);
                tokens.push(Token::End { name });
                continue;
            }
        }

        if let Some(after) = rest.strip_prefix('<') {
            if after.starts_with(|c: char| c.is_ascii_alphabetic()) {
                let (token, remaining) = start_tag(after);
                rest = remaining;
                if let Token::Start {
                    name,
                    self_closing: false,
                    ..
                } = &token
                {
                    if RAW_TEXT.contains(&name.as_str()) {
                        let name = name.clone();
                        tokens.push(token);
                        rest = raw_text(rest, &name, &mut tokens);
                        continue;
                    }
                }
                tokens.push(token);
                continue;
            }
        }

        // Plain text up to the next '<' that is not the current character.
        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first..]
            .find('<')
            .map_or(rest.len(), |index| index + first);
        tokens.push(Token::Text(decode_entities(&rest[..end])));
        rest = &rest[end..];
    }

    tokens
}

fn tag_name(input: &str) -> String {
    input
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == ':')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn start_tag(input: &str) -> (Token, &str) {
    let name = tag_name(input);
    let mut rest = &input[name.len()..];
    let mut attrs = Vec::new();
    let mut self_closing = false;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if let Some(after) = rest.strip_prefix("/>") {
            self_closing = true;
            rest = after;
            break;
        }
        if let Some(after) = rest.strip_prefix('>') {
            rest = after;
            break;
        }
        if let Some(after) = rest.strip_prefix('/') {
            rest = after;
            continue;
        }

        let key_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let key = rest[..key_end].to_ascii_lowercase();
        if key.is_empty() {
            // a bare '=' with no attribute name
            rest = &rest[1..];
            continue;
        }
        rest = rest[key_end..].trim_start();

        let mut value = String::new();
        if let Some(after) = rest.strip_prefix('=') {
            let after = after.trim_start();
            if let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') {
                let body = &after[1..];
                let close = body.find(quote).unwrap_or(body.len());
                value = decode_entities(&body[..close]);
                rest = body.get(close + 1..).unwrap_or("");
            } else {
                let close = after
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(after.len());
                value = decode_entities(&after[..close]);
                rest = &after[close..];
            }
        }

        attrs.push((key, value));
    }

    (
        Token::Start {
            name,
            attrs,
            self_closing,
        },
        rest,
    )
}

/// Consume raw text until `</name`, emitting it undecoded.
fn raw_text<'a>(input: &'a str, name: &str, tokens: &mut Vec<Token>) -> &'a str {
    let needle = format!("</{}", name);
    let lowered = input.to_ascii_lowercase();
    match lowered.find(&needle) {
        Some(end) => {
            if end > 0 {
                tokens.push(Token::Text(input[..end].to_string()));
            }
            let after = &input[end + needle.len()..];
            tokens.push(Token::End {
                name: name.to_string(),
            });
            after.find('>').map_or("", |close| &after[close + 1..])
        }
        None => {
            if !input.is_empty() {
                tokens.push(Token::Text(input.to_string()));
            }
            ""
        }
    }
}

pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        let decoded = candidate
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| entity(&candidate[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).filter(|c| *c != '\0');
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "copy" => Some('©'),
        "reg" => Some('®'),
        "trade" => Some('™'),
        "hellip" => Some('…'),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        "lsquo" => Some('‘'),
        "rsquo" => Some('’'),
        "ldquo" => Some('“'),
        "rdquo" => Some('”'),
        _ => None,
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
