// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTML escaping and sanitising for text placed into the stamp template.
//
// Subject and body are always escaped. Header and footer may carry basic
// markup, so they are sanitised instead: every tag in the output is rebuilt
// from a validated name and filtered attributes, and any `<` that does not
// start such a tag is escaped.

use tracing::debug;

/// Elements removed together with their content.
const DANGEROUS_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "frame", "frameset", "object", "embed", "applet", "link", "base",
    "meta", "noscript", "template", "svg", "math",
];

/// Elements that usually appear without a closing tag.
const VOID_ELEMENTS: &[&str] = &["embed", "link", "base", "meta", "frame"];

/// Attributes the browser fetches while rendering; only inline `data:` is allowed.
const RESOURCE_ATTRIBUTES: &[&str] = &[
    "src", "srcset", "background", "poster", "lowsrc", "dynsrc", "data", "codebase", "xlink:href",
    "ping",
];

/// Attributes that navigate on user action; `data:` is refused.
const LINK_ATTRIBUTES: &[&str] = &["action", "formaction", "cite", "longdesc"];

/// Fragments that make a `style` attribute load or run something.
const UNSAFE_STYLE_FRAGMENTS: &[&str] = &[
    "expression(", "@import", "behavior:", "-moz-binding", "image-set(", "\\",
];

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Strip active content and external references from user-supplied HTML.
///
/// - `script`, `style`, `iframe`, `object`, `embed`, `link`, `svg` and
///   similar elements are removed with their content; comments are dropped.
/// - `on*` handlers and `javascript:`/`vbscript:` values are removed, after
///   decoding character references.
/// - Resource attributes (`src`, `srcset`, `background`, ...) keep only
///   `data:` values, and `style` may not pull in `url(...)` from elsewhere.
/// - A tag without a closing `>` is dropped together with the rest of the
///   input; any other stray `<` is escaped.
pub fn sanitize_html(html: &str) -> String {
    let sanitized = clean(html);
    if sanitized != html {
        debug!(
            before = html.len(),
            after = sanitized.len(),
            "HTML fragment sanitised"
        );
    }
    sanitized
}

fn clean(input: &str) -> String {
    let bytes = input.as_bytes();
    // ASCII lowercasing keeps byte offsets aligned with `input`.
    let lower = input.to_ascii_lowercase();
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        out.push_str(&input[text_start..pos]);
        pos = match bytes.get(pos + 1).copied() {
            Some(b) if b.is_ascii_alphabetic() => open_tag(input, &lower, pos, &mut out),
            Some(b'/') => close_tag(input, pos, &mut out),
            Some(b'!' | b'?') => skip_declaration(&lower, pos),
            _ => {
                out.push_str("&lt;");
                pos + 1
            }
        };
        text_start = pos;
    }

    out.push_str(&input[text_start..]);
    out
}

/// Handle `<name ...>` starting at `start`; returns where scanning resumes.
fn open_tag(input: &str, lower: &str, start: usize, out: &mut String) -> usize {
    let Some(end) = find_tag_end(input.as_bytes(), start + 1) else {
        // Unterminated: whatever follows would become part of this tag.
        return input.len();
    };
    let inner = &input[start + 1..end];
    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = &inner[..name_end];
    if !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        out.push_str("&lt;");
        return start + 1;
    }

    let name = name.to_ascii_lowercase();
    if let Some(&tag) = DANGEROUS_ELEMENTS.iter().find(|&&tag| tag == name) {
        return skip_element(lower, tag, end + 1);
    }
    out.push_str(&rewrite_tag(&name, &inner[name_end..]));
    end + 1
}

/// Handle `</name>` starting at `start`.
fn close_tag(input: &str, start: usize, out: &mut String) -> usize {
    let Some(offset) = input[start + 2..].find('>') else {
        out.push_str("&lt;");
        return start + 1;
    };
    let end = start + 2 + offset;
    let name = input[start + 2..end].trim_end();
    let valid = name.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
        && name.bytes().all(|b| b.is_ascii_alphanumeric());
    if !valid {
        out.push_str("&lt;");
        return start + 1;
    }

    let name = name.to_ascii_lowercase();
    if !DANGEROUS_ELEMENTS.contains(&name.as_str()) {
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
    }
    end + 1
}

/// Drop comments, doctypes and processing instructions.
fn skip_declaration(lower: &str, start: usize) -> usize {
    if lower[start..].starts_with("<!--") {
        lower[start + 4..]
            .find("-->")
            .map_or(lower.len(), |i| start + 4 + i + 3)
    } else {
        lower[start..].find('>').map_or(lower.len(), |i| start + i + 1)
    }
}

/// Position just past the closing tag of `tag`, searching from `from`.
fn skip_element(lower: &str, tag: &str, from: usize) -> usize {
    let mut search = from;
    while let Some(offset) = lower[search..].find("</") {
        let at = search + offset;
        if let Some(after) = lower[at + 2..].strip_prefix(tag) {
            let boundary = after
                .chars()
                .next()
                .is_none_or(|c| c.is_ascii_whitespace() || c == '>' || c == '/');
            if boundary {
                return lower[at..].find('>').map_or(lower.len(), |i| at + i + 1);
            }
        }
        search = at + 2;
    }
    if VOID_ELEMENTS.contains(&tag) {
        from
    } else {
        // Unterminated element: everything after it is its content.
        lower.len()
    }
}

/// Index of the `>` closing a tag, skipping over quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match (quote, b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Rebuild an opening tag from its name and raw attribute text.
fn rewrite_tag(name: &str, attributes: &str) -> String {
    let bytes = attributes.as_bytes();
    let mut tag = String::with_capacity(name.len() + attributes.len() + 2);
    tag.push('<');
    tag.push_str(name);

    let mut self_closing = false;
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        if bytes[pos] == b'/' {
            self_closing = true;
            pos += 1;
            continue;
        }
        self_closing = false;

        let attr_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && bytes[pos] != b'='
            && bytes[pos] != b'/'
        {
            pos += 1;
        }
        let attr_name = attributes[attr_start..pos].to_ascii_lowercase();

        let mut value = None;
        let mut lookahead = pos;
        while lookahead < bytes.len() && bytes[lookahead].is_ascii_whitespace() {
            lookahead += 1;
        }
        if bytes.get(lookahead) == Some(&b'=') {
            pos = lookahead + 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            let value_start = pos;
            match bytes.get(pos).copied() {
                Some(q @ (b'"' | b'\'')) => {
                    pos += 1;
                    while pos < bytes.len() && bytes[pos] != q {
                        pos += 1;
                    }
                    value = Some(&attributes[value_start + 1..pos]);
                    pos = (pos + 1).min(bytes.len());
                }
                _ => {
                    while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    value = Some(&attributes[value_start..pos]);
                }
            }
        }

        if is_safe_attribute(name, &attr_name, value) {
            tag.push(' ');
            tag.push_str(&attr_name);
            if let Some(value) = value {
                tag.push_str("=\"");
                tag.push_str(&escape_attribute_value(value));
                tag.push('"');
            }
        }
    }

    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'))
}

fn is_safe_attribute(tag: &str, name: &str, value: Option<&str>) -> bool {
    if !is_valid_attribute_name(name) || name.starts_with("on") {
        return false;
    }
    let Some(value) = value else {
        return true;
    };
    let compact = compact_value(value);
    if compact.starts_with("javascript:") || compact.starts_with("vbscript:") {
        return false;
    }
    match name {
        "style" => is_safe_style(&compact),
        "href" if matches!(tag, "a" | "area") => !compact.starts_with("data:"),
        "href" => compact.starts_with("data:"),
        other if RESOURCE_ATTRIBUTES.contains(&other) => compact.starts_with("data:"),
        other if LINK_ATTRIBUTES.contains(&other) => !compact.starts_with("data:"),
        _ => true,
    }
}

/// A `style` value may only reference inline `data:` URLs.
fn is_safe_style(compact: &str) -> bool {
    if UNSAFE_STYLE_FRAGMENTS
        .iter()
        .any(|fragment| compact.contains(*fragment))
    {
        return false;
    }
    let mut rest = compact;
    while let Some(i) = rest.find("url(") {
        rest = &rest[i + 4..];
        if !rest.trim_start_matches(['"', '\'']).starts_with("data:") {
            return false;
        }
    }
    true
}

/// Decoded, lowercased value with whitespace and control characters removed,
/// the way a browser sees a URL scheme.
fn compact_value(value: &str) -> String {
    decode_references(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Resolve numeric and the relevant named character references.
fn decode_references(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(i) = rest.find('&') {
        decoded.push_str(&rest[..i]);
        let after = &rest[i + 1..];
        match decode_reference(after) {
            Some((ch, used)) => {
                decoded.push(ch);
                rest = &after[used..];
            }
            None => {
                decoded.push('&');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

/// Decode the reference at the start of `s` (text after `&`), returning the
/// character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    if let Some(number) = s.strip_prefix('#') {
        let (digits, radix, prefix_len) = match number.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, 2),
            None => (number, 10, 1),
        };
        let len = digits
            .bytes()
            .take_while(|&b| char::from(b).is_digit(radix))
            .count();
        if len == 0 {
            return None;
        }
        let code = digits[..len].chars().fold(0u32, |acc, c| {
            acc.saturating_mul(radix)
                .saturating_add(c.to_digit(radix).unwrap_or(0))
        });
        let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut used = prefix_len + len;
        if s[used..].starts_with(';') {
            used += 1;
        }
        return Some((ch, used));
    }

    let name_len = s.bytes().take_while(u8::is_ascii_alphanumeric).count();
    let name = &s[..name_len];
    let has_semicolon = s[name_len..].starts_with(';');
    let ch = match name {
        "Tab" => '\t',
        "NewLine" => '\n',
        "colon" => ':',
        "lpar" => '(',
        "rpar" => ')',
        "sol" => '/',
        "bsol" => '\\',
        "period" => '.',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "amp" | "AMP" => '&',
        "lt" | "LT" => '<',
        "gt" | "GT" => '>',
        "quot" | "QUOT" => '"',
        _ => return None,
    };
    // Only the legacy references are recognised without a semicolon.
    let legacy = matches!(
        name,
        "amp" | "AMP" | "lt" | "LT" | "gt" | "GT" | "quot" | "QUOT" | "nbsp"
    );
    if !has_semicolon && !legacy {
        return None;
    }
    Some((ch, name_len + usize::from(has_semicolon)))
}

/// Re-quote an attribute value; existing character references are kept.
fn escape_attribute_value(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
