//! Reads the supported subset of SVG into a [Document].

use std::collections::HashMap;

use roxmltree::Node;
use tessel_core::kurbo::{Affine, BezPath, Point, Rect};
use tessel_core::peniko::color::{parse_color, Srgb};
use tessel_core::peniko::{Color, Fill};

use super::document::{
    ops_from_bez_path, CapMode, Document, GradientDef, GradientDirection, GradientStop,
    GradientUnits, JoinMode, PathStyle, Pattern, SpreadMethod, SvgPath,
};
use super::error::SvgError;
use super::{ParseErrorMode, SvgOptions};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Gradients may inherit stops through `href` chains at most this deep.
const MAX_HREF_DEPTH: usize = 8;

/// Parse SVG content into a [Document].
///
/// Malformed XML always fails. Other problems follow `options.parse_errors`.
pub fn parse_document(content: &str, options: &SvgOptions) -> Result<Document, SvgError> {
    let xml = roxmltree::Document::parse(content)?;
    let root = xml.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgError::NotSvg(root.tag_name().name().to_string()));
    }
    let mut parser = Parser {
        options,
        gradients: HashMap::new(),
    };
    for node in xml.descendants().filter(|n| n.is_element()) {
        if matches!(node.tag_name().name(), "linearGradient" | "radialGradient") {
            if let Some(id) = node.attribute("id") {
                parser.gradients.insert(id, node);
            }
        }
    }

    let mut document = Document {
        view_box: parser.view_box(root)?,
        width: parser.length(root, "width")?,
        height: parser.length(root, "height")?,
        paths: Vec::new(),
    };
    let style = parser.apply_presentation(root, PathStyle::default())?;
    parser.walk(root, &style, &mut document.paths)?;
    Ok(document)
}

struct Parser<'o, 'a, 'input> {
    options: &'o SvgOptions,
    gradients: HashMap<&'a str, Node<'a, 'input>>,
}

impl<'a, 'input> Parser<'_, 'a, 'input> {
    /// Fail, or log and continue with `fallback`, depending on the parse error mode.
    fn recover<T>(&self, err: SvgError, fallback: T) -> Result<T, SvgError> {
        match self.options.parse_errors {
            ParseErrorMode::Strict => Err(err),
            ParseErrorMode::Warn => {
                log::warn!("SVG: {err}");
                Ok(fallback)
            },
            ParseErrorMode::Ignore => Ok(fallback),
        }
    }

    fn walk(
        &self,
        parent: Node<'a, 'input>,
        inherited: &PathStyle,
        out: &mut Vec<SvgPath>,
    ) -> Result<(), SvgError> {
        for node in parent.children().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "g" => {
                    let style = self.apply_presentation(node, inherited.clone())?;
                    self.walk(node, &style, out)?;
                },
                "path" => {
                    if let Some(path) = self.path(node, inherited)? {
                        out.push(path);
                    }
                },
                "defs" | "linearGradient" | "radialGradient" | "title" | "desc" | "metadata" => {},
                other => log::debug!("skipping unsupported SVG element <{other}>"),
            }
        }
        Ok(())
    }

    fn path(
        &self,
        node: Node<'a, 'input>,
        inherited: &PathStyle,
    ) -> Result<Option<SvgPath>, SvgError> {
        let style = self.apply_presentation(node, inherited.clone())?;
        let data = node.attribute("d").unwrap_or_default();
        match BezPath::from_svg(data) {
            Ok(path) => Ok(Some(SvgPath {
                ops: ops_from_bez_path(&path),
                style,
            })),
            Err(err) => self.recover(SvgError::PathData(err), None),
        }
    }

    /// Apply the presentation attributes and `style` declarations of `node` on top of the
    /// inherited style.
    fn apply_presentation(
        &self,
        node: Node<'a, 'input>,
        mut style: PathStyle,
    ) -> Result<PathStyle, SvgError> {
        let mut own_opacity = 1.0;
        for (name, value) in declarations(node) {
            match name {
                "fill" => style.fill = self.pattern(name, value, style.fill.take())?,
                "stroke" => style.stroke = self.pattern(name, value, style.stroke.take())?,
                "fill-opacity" => {
                    style.fill_opacity = self.number(name, value, style.fill_opacity)?.clamp(0.0, 1.0)
                },
                "stroke-opacity" => {
                    style.stroke_opacity =
                        self.number(name, value, style.stroke_opacity)?.clamp(0.0, 1.0)
                },
                "opacity" => own_opacity = self.number(name, value, 1.0)?.clamp(0.0, 1.0),
                "stroke-width" => style.stroke_width = self.number(name, value, style.stroke_width)?,
                "stroke-miterlimit" => {
                    style.miter_limit = self.number(name, value, style.miter_limit)?
                },
                "stroke-linecap" => {
                    style.cap = match value {
                        "butt" => CapMode::Butt,
                        "square" => CapMode::Square,
                        "round" => CapMode::Round,
                        "cubic" => CapMode::Cubic,
                        "quadratic" => CapMode::Quadratic,
                        _ => self.recover(SvgError::attribute(name, value), style.cap)?,
                    }
                },
                "stroke-linejoin" => {
                    style.join = match value {
                        "arcs" => JoinMode::Arc,
                        "round" => JoinMode::Round,
                        "bevel" => JoinMode::Bevel,
                        "miter" => JoinMode::Miter,
                        "miter-clip" => JoinMode::MiterClip,
                        "arc-clip" => JoinMode::ArcClip,
                        _ => self.recover(SvgError::attribute(name, value), style.join)?,
                    }
                },
                "fill-rule" => {
                    style.fill_rule = match value {
                        "nonzero" => Fill::NonZero,
                        "evenodd" => Fill::EvenOdd,
                        _ => self.recover(SvgError::attribute(name, value), style.fill_rule)?,
                    }
                },
                _ => {},
            }
        }
        style.opacity *= own_opacity;
        if let Some(value) = node.attribute("transform") {
            style.transform *= self.transform("transform", value)?;
        }
        Ok(style)
    }

    fn pattern(
        &self,
        name: &str,
        value: &str,
        current: Option<Pattern>,
    ) -> Result<Option<Pattern>, SvgError> {
        match value {
            "none" => return Ok(None),
            "inherit" => return Ok(current),
            _ => {},
        }
        if let Some(rest) = value.strip_prefix("url(") {
            let id = rest
                .split(')')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .trim_start_matches('#');
            return match self.gradients.get(id) {
                Some(node) => Ok(Some(Pattern::Gradient(self.gradient(*node)?))),
                None => self.recover(SvgError::UnknownReference(id.to_string()), None),
            };
        }
        match color(value) {
            Some(color) => Ok(Some(Pattern::Plain(color))),
            None => self.recover(SvgError::attribute(name, value), current),
        }
    }

    fn gradient(&self, node: Node<'a, 'input>) -> Result<GradientDef, SvgError> {
        let units = match node.attribute("gradientUnits") {
            None | Some("objectBoundingBox") => GradientUnits::ObjectBoundingBox,
            Some("userSpaceOnUse") => GradientUnits::UserSpaceOnUse,
            Some(other) => self.recover(
                SvgError::attribute("gradientUnits", other),
                GradientUnits::ObjectBoundingBox,
            )?,
        };
        let spread = match node.attribute("spreadMethod") {
            None | Some("pad") => SpreadMethod::Pad,
            Some("reflect") => SpreadMethod::Reflect,
            Some("repeat") => SpreadMethod::Repeat,
            Some(other) => {
                self.recover(SvgError::attribute("spreadMethod", other), SpreadMethod::Pad)?
            },
        };
        let transform = match node.attribute("gradientTransform") {
            Some(value) => self.transform("gradientTransform", value)?,
            None => Affine::IDENTITY,
        };
        let coord = |name: &str, default: f64| self.coordinate(node, name, default);
        let direction = if node.tag_name().name() == "linearGradient" {
            GradientDirection::Linear {
                x1: coord("x1", 0.0)?,
                y1: coord("y1", 0.0)?,
                x2: coord("x2", 1.0)?,
                y2: coord("y2", 0.0)?,
            }
        } else {
            let cx = coord("cx", 0.5)?;
            let cy = coord("cy", 0.5)?;
            GradientDirection::Radial {
                cx,
                cy,
                fx: coord("fx", cx)?,
                fy: coord("fy", cy)?,
                r: coord("r", 0.5)?,
                fr: coord("fr", 0.0)?,
            }
        };
        Ok(GradientDef {
            direction,
            stops: self.stops(node, 0)?,
            units,
            spread,
            transform,
        })
    }

    /// The `<stop>` children of a gradient, or those of the gradient it references when it
    /// has none of its own.
    fn stops(&self, node: Node<'a, 'input>, depth: usize) -> Result<Vec<GradientStop>, SvgError> {
        let mut stops = Vec::new();
        for child in node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "stop")
        {
            let mut stop = GradientStop {
                offset: 0.0,
                color: Color::BLACK,
                opacity: 1.0,
            };
            for (name, value) in declarations(child) {
                match name {
                    "offset" => stop.offset = self.fraction(name, value, 0.0)?.clamp(0.0, 1.0),
                    "stop-color" => {
                        stop.color = match color(value) {
                            Some(color) => color,
                            None => self.recover(SvgError::attribute(name, value), Color::BLACK)?,
                        }
                    },
                    "stop-opacity" => {
                        stop.opacity = self.number(name, value, 1.0)?.clamp(0.0, 1.0)
                    },
                    _ => {},
                }
            }
            stops.push(stop);
        }
        if stops.is_empty() && depth < MAX_HREF_DEPTH {
            let href = node
                .attribute("href")
                .or_else(|| node.attribute((XLINK_NS, "href")));
            if let Some(href) = href {
                let id = href.trim_start_matches('#');
                match self.gradients.get(id) {
                    Some(target) => return self.stops(*target, depth + 1),
                    None => {
                        return self
                            .recover(SvgError::UnknownReference(id.to_string()), stops)
                    },
                }
            }
        }
        Ok(stops)
    }

    fn coordinate(
        &self,
        node: Node<'a, 'input>,
        name: &str,
        default: f64,
    ) -> Result<f64, SvgError> {
        match node.attribute(name) {
            Some(value) => self.fraction(name, value, default),
            None => Ok(default),
        }
    }

    /// A plain number or a percentage.
    fn fraction(&self, name: &str, value: &str, fallback: f64) -> Result<f64, SvgError> {
        let parsed = match value.trim().strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f64>().ok().map(|v| v / 100.0),
            None => number(value),
        };
        match parsed {
            Some(v) => Ok(v),
            None => self.recover(SvgError::attribute(name, value), fallback),
        }
    }

    fn number(&self, name: &str, value: &str, fallback: f64) -> Result<f64, SvgError> {
        match number(value) {
            Some(v) => Ok(v),
            None => self.recover(SvgError::attribute(name, value), fallback),
        }
    }

    fn length(&self, node: Node<'a, 'input>, name: &str) -> Result<Option<f64>, SvgError> {
        let Some(value) = node.attribute(name) else {
            return Ok(None);
        };
        if value.trim().ends_with('%') {
            return Ok(None);
        }
        match number(value) {
            Some(v) => Ok(Some(v)),
            None => self.recover(SvgError::attribute(name, value), None),
        }
    }

    fn view_box(&self, node: Node<'a, 'input>) -> Result<Option<Rect>, SvgError> {
        let Some(value) = node.attribute("viewBox") else {
            return Ok(None);
        };
        match numbers(value).as_deref() {
            Some(&[x, y, w, h]) => {
                if w > 0.0 && h > 0.0 {
                    Ok(Some(Rect::new(x, y, x + w, y + h)))
                } else {
                    Ok(None)
                }
            },
            _ => self.recover(SvgError::attribute("viewBox", value), None),
        }
    }

    fn transform(&self, name: &str, value: &str) -> Result<Affine, SvgError> {
        match parse_transform(value) {
            Some(transform) => Ok(transform),
            None => self.recover(SvgError::attribute(name, value), Affine::IDENTITY),
        }
    }
}

/// Attribute values followed by `style` declarations, so the latter win.
fn declarations<'a>(node: Node<'a, '_>) -> Vec<(&'a str, &'a str)> {
    let mut list: Vec<(&str, &str)> = node
        .attributes()
        .filter(|attr| attr.namespace().is_none())
        .map(|attr| (attr.name(), attr.value().trim()))
        .collect();
    if let Some(style) = node.attribute("style") {
        list.extend(style.split(';').filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            Some((name.trim(), value.trim()))
        }));
    }
    list
}

fn color(value: &str) -> Option<Color> {
    parse_color(value)
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>())
}

fn number(value: &str) -> Option<f64> {
    let value = value.trim();
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

fn numbers(text: &str) -> Option<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect()
}

/// Parse a transform list such as `translate(10 5) scale(2)`.
pub fn parse_transform(text: &str) -> Option<Affine> {
    let mut result = Affine::IDENTITY;
    let mut rest = text.trim();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = open + rest[open..].find(')')?;
        let name = rest[..open].trim();
        let args = numbers(&rest[open + 1..close])?;
        let step = match (name, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e, f]),
            ("translate", &[x]) => Affine::translate((x, 0.0)),
            ("translate", &[x, y]) => Affine::translate((x, y)),
            ("scale", &[s]) => Affine::scale(s),
            ("scale", &[x, y]) => Affine::scale_non_uniform(x, y),
            ("rotate", &[angle]) => Affine::rotate(angle.to_radians()),
            ("rotate", &[angle, cx, cy]) => {
                Affine::rotate_about(angle.to_radians(), Point::new(cx, cy))
            },
            ("skewX", &[angle]) => Affine::skew(angle.to_radians().tan(), 0.0),
            ("skewY", &[angle]) => Affine::skew(0.0, angle.to_radians().tan()),
            _ => return None,
        };
        result *= step;
        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }
    Some(result)
}
