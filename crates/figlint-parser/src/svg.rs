//! Walks an SVG document and extracts typed shape primitives.
//!
//! Elements are visited in document order. Every element, containers
//! included, takes the next position in the `elem_<n>` numbering so the
//! synthesized names stay stable for a given file. Synthesized and path
//! segment names skip over any id the document states explicitly, so every
//! shape ends up with a distinct id. Everything under
//! `<defs>` is a template: markers are collected from it, but it produces
//! no shapes and no identifier notices.

use indexmap::IndexSet;
use log::{debug, trace, warn};
use roxmltree::{Document, Node};

use figlint_core::{
    document::{Canvas, MarkerDef, Notice, NoticeKind},
    figure::{Element, Figure, TextRun},
    geometry::{Bounds, Point, Segment, Size},
    identifier::Id,
    shape::{BoxOrigin, BoxShape, LineShape, Paint},
    text::{FontSpec, TextAnchor},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    path,
    span::Span,
    style,
};

/// Tags that must carry an `id` to be reported by name.
const IDENTIFIED_TAGS: [&str; 6] = ["rect", "line", "path", "polygon", "polyline", "text"];

/// Parses markup into a [`Figure`].
pub(crate) fn build(source: &str) -> Result<Figure, ParseError> {
    let document = Document::parse(source).map_err(|err| markup_error(source, &err))?;

    let mut builder = FigureBuilder::new(&document);
    builder.collect_canvas();
    builder.collect_markers();
    builder.reserve_ids();
    builder.collect_elements();
    builder.finish()
}

fn markup_error(source: &str, err: &roxmltree::Error) -> ParseError {
    let pos = err.pos();
    let offset = byte_offset(source, pos.row, pos.col);
    let end = source[offset..]
        .chars()
        .next()
        .map_or(offset, |c| offset + c.len_utf8());

    Diagnostic::error(format!("malformed SVG markup: {err}"))
        .with_code(ErrorCode::E001)
        .with_label(Span::new(offset..end), "markup is not well-formed here")
        .into()
}

/// Converts a 1-based row and column (in characters) into a byte offset.
fn byte_offset(source: &str, row: u32, col: u32) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(row.saturating_sub(1) as usize)
        .map(str::len)
        .sum::<usize>()
        .min(source.len());

    source[line_start..]
        .char_indices()
        .nth(col.saturating_sub(1) as usize)
        .map_or(source.len(), |(index, _)| line_start + index)
}

struct FigureBuilder<'a, 'input> {
    document: &'a Document<'input>,
    figure: Figure,
    collector: DiagnosticCollector,
    /// Explicit ids of shape elements, known before any name is synthesized
    reserved: IndexSet<Id>,
    /// Every id handed to a shape so far
    assigned: IndexSet<Id>,
}

impl<'a, 'input> FigureBuilder<'a, 'input> {
    fn new(document: &'a Document<'input>) -> Self {
        Self {
            document,
            figure: Figure::new(),
            collector: DiagnosticCollector::new(),
            reserved: IndexSet::new(),
            assigned: IndexSet::new(),
        }
    }

    fn finish(self) -> Result<Figure, ParseError> {
        self.collector.finish()?;
        debug!(
            elements = self.figure.elements().len(),
            notices = self.figure.notices().len(),
            markers = self.figure.markers().len();
            "Parsed figure"
        );
        Ok(self.figure)
    }

    /// Reads the drawing area from `viewBox`, falling back to `width`/`height`.
    fn collect_canvas(&mut self) {
        let root = self.document.root_element();

        let view_box = root.attribute("viewBox").and_then(|value| {
            let numbers: Vec<f32> = value
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|part| !part.is_empty())
                .map(style::parse_length)
                .collect::<Option<_>>()?;
            match numbers[..] {
                [x, y, w, h] if w > 0.0 && h > 0.0 => Some(Bounds::new_from_top_left(
                    Point::new(x, y),
                    Size::new(w, h),
                )),
                _ => None,
            }
        });

        let sized = || {
            let width = root.attribute("width").and_then(style::parse_length)?;
            let height = root.attribute("height").and_then(style::parse_length)?;
            (width > 0.0 && height > 0.0).then(|| {
                Bounds::new_from_top_left(Point::default(), Size::new(width, height))
            })
        };

        match view_box.or_else(sized) {
            Some(view) => self.figure.set_canvas(Canvas::new(view)),
            None => debug!("Figure has no usable viewBox or size"),
        }
    }

    fn collect_markers(&mut self) {
        let markers: Vec<_> = self
            .document
            .descendants()
            .filter(|node| node.has_tag_name("marker") && in_defs(*node))
            .collect();

        for node in markers {
            let Some(id) = node.attribute("id").filter(|id| !id.is_empty()) else {
                continue;
            };
            let defaults = MarkerDef::default();
            let width = self.number(node, "markerWidth", defaults.width());
            let height = self.number(node, "markerHeight", defaults.height());
            let ref_x = self.number(node, "refX", 0.0);
            let ref_y = self.number(node, "refY", 0.0);
            self.figure
                .insert_marker(Id::new(id), MarkerDef::new(width, height, ref_x, ref_y));
        }
    }

    fn reserve_ids(&mut self) {
        let explicit = self
            .document
            .root_element()
            .descendants()
            .filter(|node| node.is_element() && is_identified(*node))
            .filter_map(|node| node.attribute("id").filter(|id| !id.is_empty()))
            .map(Id::new);
        self.reserved.extend(explicit);
    }

    fn collect_elements(&mut self) {
        let nodes: Vec<_> = self
            .document
            .root_element()
            .descendants()
            .filter(Node::is_element)
            .collect();

        for (index, node) in nodes.into_iter().enumerate() {
            let tag = node.tag_name().name();
            let templated = in_defs(node);
            let id = self.element_id(node, tag, index + 1, templated);
            if templated {
                continue;
            }

            trace!(tag, id:%; "Visiting element");
            match tag {
                "rect" => self.rect(node, id),
                "line" => self.line(node, id),
                "path" => self.path(node, id),
                "polygon" => self.poly(node, id, BoxOrigin::Polygon),
                "polyline" => self.poly(node, id, BoxOrigin::Polyline),
                "text" => self.text(node, id),
                _ => {}
            }
        }
    }

    /// Returns the element's id, synthesizing and reporting one when it is
    /// missing or already taken.
    fn element_id(&mut self, node: Node<'a, 'input>, tag: &str, index: usize, templated: bool) -> Id {
        let explicit = node.attribute("id").filter(|id| !id.is_empty()).map(Id::new);
        if templated || !IDENTIFIED_TAGS.contains(&tag) {
            return explicit.unwrap_or_else(|| Id::synthesized(index));
        }

        match explicit {
            Some(id) if self.assigned.insert(id) => id,
            Some(id) => {
                let name = self.synthesize(index);
                self.notice(
                    node,
                    NoticeKind::DuplicateId {
                        original: id.to_string(),
                    },
                    tag,
                    name,
                );
                name
            }
            None => {
                let name = self.synthesize(index);
                self.notice(node, NoticeKind::MissingId, tag, name);
                name
            }
        }
    }

    /// Claims `elem_<index>`, or the next free number after it.
    fn synthesize(&mut self, index: usize) -> Id {
        let mut number = index;
        loop {
            let name = Id::synthesized(number);
            if self.claim(name) {
                return name;
            }
            number += 1;
        }
    }

    /// Claims `name` unless another shape uses it or an explicit id reserves it.
    fn claim(&mut self, name: Id) -> bool {
        !self.reserved.contains(&name) && self.assigned.insert(name)
    }

    fn notice(&mut self, node: Node<'a, 'input>, kind: NoticeKind, tag: &str, name: Id) {
        let line = self.document.text_pos_at(node.range().start).row;
        self.figure.push_notice(Notice::new(kind, tag, line, name));
    }

    fn rect(&mut self, node: Node<'a, 'input>, id: Id) {
        if has_unresolved_length(node, id, &["x", "y", "width", "height"]) {
            return;
        }
        let x = self.number(node, "x", 0.0);
        let y = self.number(node, "y", 0.0);
        let width = self.number(node, "width", 0.0);
        let height = self.number(node, "height", 0.0);

        let bounds = Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height));
        self.figure.push_element(Element::Box(BoxShape::new(
            id,
            bounds,
            BoxOrigin::Rect,
            paint(node),
        )));
    }

    fn line(&mut self, node: Node<'a, 'input>, id: Id) {
        if has_unresolved_length(node, id, &["x1", "y1", "x2", "y2"]) {
            return;
        }
        let start = Point::new(self.number(node, "x1", 0.0), self.number(node, "y1", 0.0));
        let end = Point::new(self.number(node, "x2", 0.0), self.number(node, "y2", 0.0));
        let stroke_width = self.stroke_width(node);

        let line = LineShape::new(id, Segment::new(start, end), stroke_width)
            .with_marker_end(marker_end(node))
            .with_stroke(paint(node).stroke());
        self.figure.push_element(Element::Line(line));
    }

    /// Flattens a path into lines. A single segment keeps the path's id;
    /// otherwise segments are numbered and only the last one gets the marker.
    fn path(&mut self, node: Node<'a, 'input>, id: Id) {
        let Some(data) = node.attribute("d") else {
            return;
        };
        let segments = match path::parse_path(data) {
            Ok(segments) => segments,
            Err(err) => {
                let span = self.value_span(node, "d");
                let at = span.start() + err.offset.min(span.len());
                let end = (at + 1).min(span.end());
                self.collector.emit(
                    Diagnostic::error("invalid path data")
                        .with_code(ErrorCode::E003)
                        .with_label(Span::new(at..end), "unexpected input in path data")
                        .with_secondary_label(tag_span(node), "in this <path> element")
                        .with_help("path data is a list of commands such as `M 10 10 L 50 10`"),
                );
                return;
            }
        };

        let stroke_width = self.stroke_width(node);
        let marker = marker_end(node);
        let stroke = paint(node).stroke();
        let last = segments.len().saturating_sub(1);
        let numbered = segments.len() > 1;
        let mut number = 0;

        for (index, segment) in segments.into_iter().enumerate() {
            let segment_id = if numbered {
                loop {
                    let name = id.segment(number);
                    number += 1;
                    if self.claim(name) {
                        break name;
                    }
                }
            } else {
                id
            };
            let line = LineShape::new(segment_id, segment, stroke_width)
                .with_source(id)
                .with_marker_end(if index == last { marker } else { None })
                .with_stroke(stroke);
            self.figure.push_element(Element::Line(line));
        }
    }

    fn poly(&mut self, node: Node<'a, 'input>, id: Id, origin: BoxOrigin) {
        let Some(data) = node.attribute("points") else {
            return;
        };
        let points = match path::parse_points(data) {
            Ok(points) => points,
            Err(err) => {
                let span = self.value_span(node, "points");
                let at = span.start() + err.offset.min(span.len());
                let end = (at + 1).min(span.end());
                self.collector.emit(
                    Diagnostic::error("invalid point list")
                        .with_code(ErrorCode::E004)
                        .with_label(Span::new(at..end), "expected a coordinate pair")
                        .with_secondary_label(tag_span(node), format!("in this <{origin}> element"))
                        .with_help("points are written as `x,y` pairs separated by spaces"),
                );
                return;
            }
        };

        if let Some(bounds) = Bounds::enclosing(points) {
            self.figure
                .push_element(Element::Box(BoxShape::new(id, bounds, origin, paint(node))));
        }
    }

    fn text(&mut self, node: Node<'a, 'input>, id: Id) {
        let content = node
            .descendants()
            .filter(Node::is_text)
            .filter_map(|child| child.text())
            .collect::<String>();
        let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            debug!(id:%; "Skipping empty text element");
            return;
        }
        if has_unresolved_length(node, id, &["x", "y"]) {
            return;
        }

        let x = self.coordinate(node, "x");
        let y = self.coordinate(node, "y");

        let defaults = FontSpec::default();
        let family = style::inherited_property(node, "font-family")
            .and_then(style::primary_family)
            .unwrap_or(defaults.family());
        let size = style::inherited_property(node, "font-size")
            .and_then(style::parse_font_size)
            .unwrap_or(defaults.size());
        let anchor = style::inherited_property(node, "text-anchor")
            .and_then(TextAnchor::from_keyword)
            .unwrap_or_default();

        let run = TextRun::new(id, &content, Point::new(x, y), FontSpec::new(family, size), anchor)
            .with_fill(paint(node).fill());
        self.figure.push_element(Element::Text(run));
    }

    fn stroke_width(&mut self, node: Node<'a, 'input>) -> f32 {
        match style::inherited_property(node, "stroke-width") {
            Some(value) => match style::parse_length(value) {
                Some(width) => width,
                None => {
                    self.invalid_number(node, "stroke-width");
                    1.0
                }
            },
            None => 1.0,
        }
    }

    /// Reads a numeric attribute, reporting E002 when it is not a number.
    fn number(&mut self, node: Node<'a, 'input>, name: &str, default: f32) -> f32 {
        let Some(value) = node.attribute(name) else {
            return default;
        };
        style::parse_length(value).unwrap_or_else(|| {
            self.invalid_number(node, name);
            default
        })
    }

    /// Like [`Self::number`], accepting a coordinate list and using its first entry.
    fn coordinate(&mut self, node: Node<'a, 'input>, name: &str) -> f32 {
        let Some(value) = node.attribute(name) else {
            return 0.0;
        };
        style::parse_first_coordinate(value).unwrap_or_else(|| {
            self.invalid_number(node, name);
            0.0
        })
    }

    fn invalid_number(&mut self, node: Node<'a, 'input>, name: &str) {
        let tag = node.tag_name().name();
        self.collector.emit(
            Diagnostic::error(format!("invalid numeric attribute `{name}`"))
                .with_code(ErrorCode::E002)
                .with_label(self.value_span(node, name), "expected a number")
                .with_secondary_label(tag_span(node), format!("in this <{tag}> element"))
                .with_help("use a plain number, optionally followed by `px`"),
        );
    }

    /// Span of an attribute value, or of the `style` attribute when the
    /// property was declared there.
    fn value_span(&self, node: Node<'a, 'input>, name: &str) -> Span {
        node.attributes()
            .find(|attribute| attribute.name() == name)
            .or_else(|| node.attributes().find(|attribute| attribute.name() == "style"))
            .map(|attribute| Span::new(attribute.range_value()))
            .unwrap_or_else(|| tag_span(node))
    }
}

/// Span of `<tag` at the start of an element.
fn tag_span(node: Node<'_, '_>) -> Span {
    let start = node.range().start;
    Span::new(start..start + 1 + node.tag_name().name().len())
}

/// Warns and returns true when a geometry attribute uses a unit such as
/// `%` or `em`; the element is then left out of the figure.
fn has_unresolved_length(node: Node<'_, '_>, id: Id, names: &[&str]) -> bool {
    let Some((attribute, value, unit)) = names.iter().find_map(|&name| {
        let value = node.attribute(name)?;
        style::unresolved_unit(value).map(|unit| (name, value, unit))
    }) else {
        return false;
    };

    let tag = node.tag_name().name();
    warn!(tag, id:%, attribute, value, unit; "Skipping element with unresolved length unit");
    true
}

/// Shape elements outside `<defs>`, the ones reported by id.
fn is_identified(node: Node<'_, '_>) -> bool {
    IDENTIFIED_TAGS.contains(&node.tag_name().name()) && !in_defs(node)
}

fn in_defs(node: Node<'_, '_>) -> bool {
    node.ancestors().any(|ancestor| ancestor.has_tag_name("defs"))
}

fn paint(node: Node<'_, '_>) -> Paint {
    let stroke = style::inherited_property(node, "stroke").and_then(style::parse_paint);
    // SVG fills shapes black unless told otherwise
    let fill = match style::inherited_property(node, "fill") {
        Some(value) => style::parse_paint(value),
        None => style::parse_paint("black"),
    };
    Paint::new(stroke, fill)
}

fn marker_end(node: Node<'_, '_>) -> Option<Id> {
    style::inherited_property(node, "marker-end")
        .and_then(style::url_reference)
        .map(Id::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset() {
        let source = "ab\ncdé\nf";
        assert_eq!(byte_offset(source, 1, 1), 0);
        assert_eq!(byte_offset(source, 2, 1), 3);
        assert_eq!(byte_offset(source, 2, 4), 7);
        assert_eq!(byte_offset(source, 3, 1), 8);
        assert_eq!(byte_offset(source, 9, 9), source.len());
    }

    #[test]
    fn test_markup_error_has_code_and_label() {
        let err = build("<svg><rect></svg>").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert!(diag.message().starts_with("malformed SVG markup"));
        assert_eq!(diag.labels().len(), 1);
    }

    #[test]
    fn test_in_defs() {
        let document = Document::parse(
            r#"<svg><defs><marker id="m"><path d="M0 0"/></marker></defs><rect/></svg>"#,
        )
        .unwrap();
        let path = document.descendants().find(|n| n.has_tag_name("path")).unwrap();
        let rect = document.descendants().find(|n| n.has_tag_name("rect")).unwrap();
        assert!(in_defs(path));
        assert!(!in_defs(rect));
    }

    #[test]
    fn test_tag_span() {
        let source = r#"<svg>  <rect x="1"/></svg>"#;
        let document = Document::parse(source).unwrap();
        let rect = document.descendants().find(|n| n.has_tag_name("rect")).unwrap();
        assert_eq!(&source[tag_span(rect).range()], "<rect");
    }
}
