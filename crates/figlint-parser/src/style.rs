//! Presentation attribute lookup and value parsing.
//!
//! SVG styling can come from a presentation attribute (`font-size="12"`),
//! from the element's `style` attribute (`style="font-size: 12px"`), or be
//! inherited from an ancestor. The `style` declaration wins over the
//! attribute on the same element.

use log::debug;
use roxmltree::Node;

use figlint_core::color::Color;

/// Looks up a property declared on this element only.
pub(crate) fn own_property<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    style_declaration(node, name).or_else(|| node.attribute(name))
}

/// Looks up an inheritable property on the element or its nearest ancestor
/// that declares it. `inherit` defers to the parent.
pub(crate) fn inherited_property<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.ancestors()
        .filter(|ancestor| ancestor.is_element())
        .filter_map(|ancestor| own_property(ancestor, name))
        .map(str::trim)
        .find(|value| *value != "inherit")
}

fn style_declaration<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute("style")?
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| property.trim() == name)
        .map(|(_, value)| value.trim())
        .next_back()
}

/// Parses a plain number with an optional `px` suffix.
pub(crate) fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim_end();
    number.parse::<f32>().ok().filter(|n| n.is_finite())
}

const UNRESOLVED_UNITS: &[&str] = &["%", "em", "rem", "ex", "pt", "pc", "mm", "cm", "in", "vw", "vh"];

/// Returns the unit of a length like `100%` or `2em`, which needs a
/// viewport or font to resolve. Only the first entry of a list is examined.
pub(crate) fn unresolved_unit(value: &str) -> Option<&'static str> {
    let first = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .find(|part| !part.is_empty())?;
    UNRESOLVED_UNITS.iter().copied().find(|unit| {
        first
            .strip_suffix(unit)
            .is_some_and(|number| number.parse::<f32>().is_ok_and(f32::is_finite))
    })
}

/// Parses the first entry of a coordinate list such as the `x` of a `<text>`.
pub(crate) fn parse_first_coordinate(value: &str) -> Option<f32> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .find(|part| !part.is_empty())
        .and_then(parse_length)
}

/// Parses the leading number of a font size, ignoring any unit.
pub(crate) fn parse_font_size(value: &str) -> Option<f32> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    value[..end].parse::<f32>().ok().filter(|n| *n > 0.0)
}

/// Returns the first family of a `font-family` list, unquoted.
pub(crate) fn primary_family(value: &str) -> Option<&str> {
    value
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|family| !family.is_empty())
}

/// Parses a paint value. `none`, references and unknown colors paint nothing.
pub(crate) fn parse_paint(value: &str) -> Option<Color> {
    let value = value.trim();
    if value == "none" || value.starts_with("url(") {
        return None;
    }
    match Color::new(value) {
        Ok(color) => Some(color),
        Err(err) => {
            debug!(value = value, error = err.as_str(); "Ignoring unsupported paint");
            None
        }
    }
}

/// Extracts the id from a `url(#id)` reference.
pub(crate) fn url_reference(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix("url(")?
        .strip_suffix(')')?
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
}
