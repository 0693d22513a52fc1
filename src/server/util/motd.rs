//! Minecraft formatting codes: stripping, HTML rendering and chat component flattening.
//!
//! A formatting code is the section sign `§` followed by one character. Colours are
//! `0-9a-f`, styles are `k-o`, and `r` resets everything.

use serde_json::Value;

use crate::server::model::probe::Motd;

const SECTION: char = '§';

/// `(code, chat component name, html colour)` for the sixteen colours.
const COLOURS: [(char, &str, &str); 16] = [
    ('0', "black", "#000000"),
    ('1', "dark_blue", "#0000AA"),
    ('2', "dark_green", "#00AA00"),
    ('3', "dark_aqua", "#00AAAA"),
    ('4', "dark_red", "#AA0000"),
    ('5', "dark_purple", "#AA00AA"),
    ('6', "gold", "#FFAA00"),
    ('7', "gray", "#AAAAAA"),
    ('8', "dark_gray", "#555555"),
    ('9', "blue", "#5555FF"),
    ('a', "green", "#55FF55"),
    ('b', "aqua", "#55FFFF"),
    ('c', "red", "#FF5555"),
    ('d', "light_purple", "#FF55FF"),
    ('e', "yellow", "#FFFF55"),
    ('f', "white", "#FFFFFF"),
];

/// `(code, chat component flag, css declaration)` for the styles.
const STYLES: [(char, &str, &str); 5] = [
    ('k', "obfuscated", ""),
    ('l', "bold", "font-weight: bold;"),
    ('m', "strikethrough", "text-decoration: line-through;"),
    ('n', "underlined", "text-decoration: underline;"),
    ('o', "italic", "font-style: italic;"),
];

/// Builds all three renderings of a raw MOTD.
pub fn render(raw: impl Into<String>) -> Motd {
    let raw = raw.into();
    Motd {
        clean: strip_codes(&raw),
        html: to_html(&raw),
        raw,
    }
}

/// Removes every formatting code, including a dangling trailing `§`.
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == SECTION {
            chars.next();
        } else {
            out.push(c);
        }
    }

    out
}

/// Renders formatting codes as nested `<span>` elements with escaped text.
pub fn to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut open = 0usize;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != SECTION {
            push_escaped(&mut out, c);
            continue;
        }

        let Some(code) = chars.next().map(|c| c.to_ascii_lowercase()) else {
            break;
        };

        if let Some((_, _, hex)) = COLOURS.iter().find(|(k, _, _)| *k == code) {
            // A colour code also resets active styles.
            close_spans(&mut out, &mut open);
            out.push_str(&format!("<span style=\"color: {};\">", hex));
            open += 1;
        } else if let Some((_, _, css)) = STYLES.iter().find(|(k, _, _)| *k == code) {
            if !css.is_empty() {
                out.push_str(&format!("<span style=\"{}\">", css));
                open += 1;
            }
        } else if code == 'r' {
            close_spans(&mut out, &mut open);
        }
    }

    close_spans(&mut out, &mut open);
    out
}

/// Flattens a JSON chat component (string, object or array) into a `§`-coded string.
pub fn flatten_component(value: &Value) -> String {
    let mut out = String::new();
    append_component(value, &mut out);
    out
}

fn append_component(value: &Value, out: &mut String) {
    match value {
        Value::String(text) => out.push_str(text),
        Value::Array(parts) => parts.iter().for_each(|part| append_component(part, out)),
        Value::Object(component) => {
            if let Some(colour) = component.get("color").and_then(Value::as_str) {
                if let Some((code, _, _)) = COLOURS.iter().find(|(_, name, _)| *name == colour) {
                    out.push(SECTION);
                    out.push(*code);
                }
            }
            for (code, flag, _) in STYLES.iter() {
                if component.get(*flag).and_then(Value::as_bool) == Some(true) {
                    out.push(SECTION);
                    out.push(*code);
                }
            }
            if let Some(text) = component.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
            if let Some(extra) = component.get("extra") {
                append_component(extra, out);
            }
        }
        _ => {}
    }
}

fn close_spans(out: &mut String, open: &mut usize) {
    for _ in 0..*open {
        out.push_str("</span>");
    }
    *open = 0;
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_codes() {
        assert_eq!(strip_codes("§aBuild§lThe§rEarth"), "BuildTheEarth");
        assert_eq!(strip_codes("dangling§"), "dangling");
    }

    #[test]
    fn renders_colours_and_resets() {
        assert_eq!(
            to_html("§aHi §r<you>"),
            "<span style=\"color: #55FF55;\">Hi </span>&lt;you&gt;"
        );
    }

    #[test]
    fn colour_closes_previous_styles() {
        assert_eq!(
            to_html("§lA§cB"),
            "<span style=\"font-weight: bold;\">A</span><span style=\"color: #FF5555;\">B</span>"
        );
    }

    #[test]
    fn flattens_plain_string_component() {
        assert_eq!(flatten_component(&json!("A Minecraft Server")), "A Minecraft Server");
    }

    #[test]
    fn flattens_nested_component() {
        let component = json!({
            "text": "",
            "extra": [
                { "text": "Build", "color": "green", "bold": true },
                { "text": "TheEarth", "color": "white" },
                "\nNews"
            ]
        });

        assert_eq!(flatten_component(&component), "§a§lBuild§fTheEarth\nNews");
    }

    #[test]
    fn render_fills_all_variants() {
        let motd = render("§6Gold");

        assert_eq!(motd.raw, "§6Gold");
        assert_eq!(motd.clean, "Gold");
        assert_eq!(motd.html, "<span style=\"color: #FFAA00;\">Gold</span>");
    }
}
