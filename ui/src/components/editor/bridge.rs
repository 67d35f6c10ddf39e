//! JavaScript side of the editable region.
//!
//! The region's markup is owned by the model. The script installed here
//! reports typing, paste and caret movement as JSON, and exposes
//! `_rteSet(html, selection)` so the model can replace the markup and put
//! the caret back. Positions are `(block, offset)` pairs over the leaf
//! block elements of the region, with offsets in code points and one unit
//! per `<br>` or `<img>`; the document model counts the same way.

use serde::Deserialize;

use crate::features::editor::{Document, Position, Selection};

static EDITOR_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

pub fn next_editor_id() -> String {
    let n = EDITOR_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    format!("rte-{n}")
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgePosition {
    pub block: usize,
    pub offset: usize,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSelection {
    pub anchor: BridgePosition,
    pub focus: BridgePosition,
}

impl From<BridgeSelection> for Selection {
    fn from(selection: BridgeSelection) -> Self {
        Selection::new(
            Position::new(selection.anchor.block, selection.anchor.offset),
            Position::new(selection.focus.block, selection.focus.offset),
        )
    }
}

/// Messages sent by the region script
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BridgeEvent {
    Input {
        html: String,
        selection: Option<BridgeSelection>,
        /// Leaf blocks the region held when the event fired
        #[serde(default)]
        blocks: Option<usize>,
    },
    Paste {
        html: Option<String>,
        #[serde(default)]
        text: String,
        selection: Option<BridgeSelection>,
    },
    Selection {
        selection: Option<BridgeSelection>,
    },
}

/// Escape a string so it's safe to embed inside a JS string literal (double-quoted).
pub fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Would end an inline <script> or a JS line
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Browser-made markup such as `<li>text<div>more</div></li>` can hold
/// fewer leaf elements than the parser makes blocks from it. Positions read
/// from such a region are off, so the model's markup must be rendered back.
pub fn region_out_of_step(region_blocks: Option<usize>, document: &Document) -> bool {
    region_blocks.is_some_and(|count| count != document.blocks.len())
}

fn selection_js(selection: Selection) -> String {
    format!(
        "{{anchor:{{block:{},offset:{}}},focus:{{block:{},offset:{}}}}}",
        selection.anchor.block, selection.anchor.offset, selection.focus.block, selection.focus.offset
    )
}

/// Long-lived script: installs the helpers on the region, renders the
/// initial markup and forwards events through `dioxus.send`.
pub fn install_js(editor_id: &str, initial_html: &str) -> String {
    format!(
        r#"(function() {{
    var el = document.getElementById({id});
    if (!el) return;
    var SEL = 'p,div,h1,h2,h3,h4,h5,h6,blockquote,pre,li,hr,table';

    function leafBlocks() {{
        var out = [];
        el.querySelectorAll(SEL).forEach(function(b) {{
            var host = b.parentElement && b.parentElement.closest('table');
            if (host && el.contains(host)) return;
            if (b.tagName !== 'TABLE' && b.tagName !== 'HR' && b.querySelector(SEL)) return;
            out.push(b);
        }});
        return out;
    }}

    function units(node) {{
        if (node.nodeType === 3) return Array.from(node.data).length;
        if (node.nodeName === 'BR' || node.nodeName === 'IMG') return 1;
        var n = 0;
        node.childNodes.forEach(function(c) {{ n += units(c); }});
        return n;
    }}

    function toPos(blocks, node, offset) {{
        for (var i = 0; i < blocks.length; i++) {{
            var b = blocks[i];
            if (b === node || b.contains(node)) {{
                if (b.tagName === 'TABLE' || b.tagName === 'HR') return {{ block: i, offset: 0 }};
                var r = document.createRange();
                r.selectNodeContents(b);
                r.setEnd(node, offset);
                return {{ block: i, offset: units(r.cloneContents()) }};
            }}
        }}
        return null;
    }}

    function readSelection() {{
        var s = window.getSelection();
        if (!s || s.rangeCount === 0 || !el.contains(s.anchorNode) || !el.contains(s.focusNode)) return null;
        var blocks = leafBlocks();
        var anchor = toPos(blocks, s.anchorNode, s.anchorOffset);
        var focus = toPos(blocks, s.focusNode, s.focusOffset);
        if (!anchor || !focus) return null;
        return {{ anchor: anchor, focus: focus }};
    }}

    function toPoint(blocks, pos) {{
        var b = blocks[Math.min(pos.block, blocks.length - 1)];
        if (!b) return {{ node: el, offset: 0 }};
        if (b.tagName === 'TABLE' || b.tagName === 'HR') {{
            var parent = b.parentNode;
            return {{ node: parent, offset: Array.prototype.indexOf.call(parent.childNodes, b) }};
        }}
        var left = pos.offset;
        var walker = document.createTreeWalker(b, NodeFilter.SHOW_TEXT | NodeFilter.SHOW_ELEMENT);
        var node;
        while ((node = walker.nextNode())) {{
            if (node.nodeType === 3) {{
                var chars = Array.from(node.data);
                if (left <= chars.length) {{
                    return {{ node: node, offset: chars.slice(0, left).join('').length }};
                }}
                left -= chars.length;
            }} else if (node.nodeName === 'BR' || node.nodeName === 'IMG') {{
                if (left === 0) {{
                    return {{ node: node.parentNode, offset: Array.prototype.indexOf.call(node.parentNode.childNodes, node) }};
                }}
                left -= 1;
                if (left === 0 && node.nodeName === 'IMG') {{
                    return {{ node: node.parentNode, offset: Array.prototype.indexOf.call(node.parentNode.childNodes, node) + 1 }};
                }}
            }}
        }}
        return {{ node: b, offset: b.childNodes.length }};
    }}

    el._rteSet = function(html, sel) {{
        el.innerHTML = html;
        if (!sel || document.activeElement !== el) return;
        var blocks = leafBlocks();
        var a = toPoint(blocks, sel.anchor);
        var f = toPoint(blocks, sel.focus);
        var s = window.getSelection();
        s.setBaseAndExtent(a.node, a.offset, f.node, f.offset);
    }};

    el.addEventListener('input', function() {{
        dioxus.send({{
            kind: 'input',
            html: el.innerHTML,
            selection: readSelection(),
            blocks: leafBlocks().length
        }});
    }});

    el.addEventListener('paste', function(e) {{
        var data = e.clipboardData;
        if (!data) return;
        e.preventDefault();
        var html = data.getData('text/html');
        dioxus.send({{
            kind: 'paste',
            html: html ? html : null,
            text: data.getData('text/plain') || '',
            selection: readSelection()
        }});
    }});

    document.addEventListener('selectionchange', function() {{
        var sel = readSelection();
        if (sel) dioxus.send({{ kind: 'selection', selection: sel }});
    }});

    el.innerHTML = {html};
}})();"#,
        id = js_string_escape(editor_id),
        html = js_string_escape(initial_html),
    )
}

/// Replace the region's markup. With a selection the region is focused and
/// the caret restored; without one focus is left where it is.
pub fn set_content_js(editor_id: &str, html: &str, selection: Option<Selection>) -> String {
    let (focus, sel) = match selection {
        Some(selection) => ("true", selection_js(selection)),
        None => ("false", "null".to_string()),
    };
    format!(
        r#"(function() {{
    var el = document.getElementById({id});
    if (!el || !el._rteSet) return;
    if ({focus} && document.activeElement !== el) el.focus();
    el._rteSet({html}, {sel});
}})();"#,
        id = js_string_escape(editor_id),
        html = js_string_escape(html),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::editor::EditorState;

    #[test]
    fn test_input_event_decodes() {
        let event: BridgeEvent = serde_json::from_str(
            r#"{"kind":"input","html":"<p>hi</p>","selection":{"anchor":{"block":0,"offset":2},"focus":{"block":0,"offset":2}}}"#,
        )
        .unwrap();
        let BridgeEvent::Input {
            html,
            selection,
            blocks,
        } = event
        else {
            panic!("expected an input event");
        };
        assert_eq!(html, "<p>hi</p>");
        assert_eq!(blocks, None);
        let selection = Selection::from(selection.unwrap());
        assert!(selection.is_collapsed());
        assert_eq!(selection.focus, Position::new(0, 2));
    }

    #[test]
    fn test_paste_without_html_or_selection() {
        let event: BridgeEvent =
            serde_json::from_str(r#"{"kind":"paste","html":null,"text":"a\nb","selection":null}"#)
                .unwrap();
        assert_eq!(
            event,
            BridgeEvent::Paste {
                html: None,
                text: "a\nb".to_string(),
                selection: None,
            }
        );
    }

    #[test]
    fn test_nested_container_markup_is_rendered_back_flat() {
        let mut state = EditorState::default();
        state.sync_from_markup("<ul><li>text<div>more</div></li></ul>", None);
        // The region sees one leaf element, the parser two list items
        assert_eq!(state.document().blocks.len(), 2);
        assert!(region_out_of_step(Some(1), state.document()));

        let flat = state.editable_html();
        assert_eq!(flat.matches("<li").count(), 2);
        assert!(!flat.contains("<div"));
        assert!(!region_out_of_step(Some(2), state.document()));
        assert!(!region_out_of_step(None, state.document()));
    }

    #[test]
    fn test_input_event_reports_region_blocks() {
        let event: BridgeEvent = serde_json::from_str(
            r#"{"kind":"input","html":"<p>a</p><p>b</p>","selection":null,"blocks":2}"#,
        )
        .unwrap();
        assert!(matches!(event, BridgeEvent::Input { blocks: Some(2), .. }));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(serde_json::from_str::<BridgeEvent>(r#"{"kind":"blur"}"#).is_err());
    }

    #[test]
    fn test_escape_keeps_markup_inert() {
        let escaped = js_string_escape("</script><p class=\"x\">a\nb</p>");
        assert!(!escaped.contains("</script>"));
        assert!(escaped.starts_with('"') && escaped.ends_with('"'));
        assert!(escaped.contains("\\\"x\\\""));
        assert!(escaped.contains("\\n"));
    }

    #[test]
    fn test_set_content_script_carries_selection() {
        let selection = Selection::new(Position::new(1, 0), Position::new(2, 3));
        let js = set_content_js("rte-0", "<p>x</p>", Some(selection));
        assert!(js.contains("{anchor:{block:1,offset:0},focus:{block:2,offset:3}}"));
        assert!(js.contains("\"rte-0\""));

        let quiet = set_content_js("rte-0", "<p>x</p>", None);
        assert!(quiet.contains("if (false &&"));
        assert!(quiet.contains(", null);"));
    }
}
