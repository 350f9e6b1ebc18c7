//! Markup dialect conversion
//!
//! Turns raw SVG markup into two forms:
//!
//! - the display form: prolog, doctype and comments stripped, trimmed
//! - the component form: the display form with a `{...props}` spread on the
//!   root element, `class` renamed to `className`, and separator-bearing
//!   attribute names camelCased
//!
//! Both functions are total: any input, including an empty string, produces
//! a string.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Placeholder injected into the root element's opening tag
pub const SPREAD_PROPS: &str = "{...props}";

static XML_DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\?xml[^>]*\?>").unwrap());

static DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").unwrap());

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// First opening tag name and whatever follows it up to the tag end
static ROOT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9:._-]*)([^>]*)>").unwrap());

/// Attribute name preceded by whitespace and followed by a quoted value
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\s)([A-Za-z0-9:_-]+)="([^"]*)""#).unwrap());

/// Strip the XML declaration, DOCTYPE and comments, then trim
pub fn normalize_markup(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let without_prolog = XML_DECLARATION_RE.replacen(markup, 1, "");
    let without_doctype = DOCTYPE_RE.replacen(&without_prolog, 1, "");
    let without_comments = COMMENT_RE.replace_all(&without_doctype, "");

    without_comments.trim().to_string()
}

/// Convert markup into its component-embeddable form
///
/// The input is normalized first, so raw responses can be passed directly.
///
/// ```
/// use libsvgl::convert::markup_to_component_source;
///
/// let source = markup_to_component_source(
///     r#"<svg xmlns="x" stroke-width="2" class="a"><!-- c --></svg>"#,
/// );
/// assert_eq!(
///     source,
///     r#"<svg {...props} xmlns="x" strokeWidth="2" className="a"></svg>"#
/// );
/// ```
pub fn markup_to_component_source(markup: &str) -> String {
    let normalized = normalize_markup(markup);
    if normalized.is_empty() {
        return normalized;
    }

    let with_props = inject_spread_props(&normalized);

    ATTRIBUTE_RE
        .replace_all(&with_props, |caps: &Captures| {
            let name = &caps[2];
            let renamed = rename_attribute(name);
            format!("{}{}=\"{}\"", &caps[1], renamed, &caps[3])
        })
        .into_owned()
}

fn inject_spread_props(markup: &str) -> String {
    let Some(caps) = ROOT_TAG_RE.captures(markup) else {
        return markup.to_string();
    };

    if caps[2].contains(SPREAD_PROPS) {
        return markup.to_string();
    }

    // Insert right after the tag name
    let Some(name) = caps.get(1) else {
        return markup.to_string();
    };
    let mut out = String::with_capacity(markup.len() + SPREAD_PROPS.len() + 1);
    out.push_str(&markup[..name.end()]);
    out.push(' ');
    out.push_str(SPREAD_PROPS);
    out.push_str(&markup[name.end()..]);
    out
}

fn rename_attribute(name: &str) -> String {
    if name == "class" {
        return "className".to_string();
    }
    if name.contains(|c: char| matches!(c, '-' | '_' | ':')) {
        return to_camel_case(name);
    }
    name.to_string()
}

/// Remove `-`, `_` and `:` and upper-case the character after each one
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if matches!(ch, '-' | '_' | ':') {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}
