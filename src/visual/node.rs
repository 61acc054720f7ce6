use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Rect, Transform2D, Vec2},
    visual::color::Color,
};

/// Common per-node presentation state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Local transform relative to the parent.
    #[serde(default, skip_serializing_if = "Transform2D::is_identity")]
    pub transform: Transform2D,
    /// Multiplied into the parent opacity.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Hidden nodes keep their subtree but draw nothing.
    #[serde(default = "yes")]
    pub visible: bool,
    /// Clip in the node's local coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<Rect>,
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

impl Default for Style {
    fn default() -> Self {
        Self {
            transform: Transform2D::default(),
            opacity: 1.0,
            visible: true,
            clip: None,
        }
    }
}

/// One color stop of a gradient fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, `0..=1`.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
}

/// Paint for shapes, text and container backgrounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    /// Single flat color.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// Gradient along a direction through the node bounds.
    LinearGradient {
        /// CSS angle: 0 points up, 90 points right.
        angle_deg: f64,
        /// Stops in offset order.
        stops: Vec<GradientStop>,
    },
    /// Gradient from the node center outward.
    RadialGradient {
        /// Stops from center to edge.
        stops: Vec<GradientStop>,
    },
}

impl Fill {
    /// Flat fill.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// Evenly spaced stops.
    pub fn linear(angle_deg: f64, colors: &[Color]) -> Self {
        Self::LinearGradient {
            angle_deg,
            stops: even_stops(colors),
        }
    }

    /// Radial gradient with evenly spaced stops.
    pub fn radial(colors: &[Color]) -> Self {
        Self::RadialGradient {
            stops: even_stops(colors),
        }
    }
}

fn even_stops(colors: &[Color]) -> Vec<GradientStop> {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| GradientStop {
            offset: i as f64 / last,
            color: *c,
        })
        .collect()
}

/// Outline of a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Outline color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

/// Geometry of a shape node, in local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle with its top-left corner at the origin.
    Rect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
        /// Rounded corner radius; 0 is square.
        #[serde(default)]
        corner_radius: f64,
    },
    /// Ellipse centered at the origin.
    Ellipse {
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// Segment from the origin.
    Line {
        /// End point.
        to: Vec2,
    },
}

/// Horizontal anchoring of a text run at its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Text starts at the origin.
    #[default]
    Start,
    /// Text is centered on the origin.
    Center,
    /// Text ends at the origin.
    End,
}

/// Font selection and layout for a text node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family; must match a declared font face.
    pub family: String,
    /// Font size in pixels.
    pub size: f64,
    /// CSS weight, 100 to 900.
    #[serde(default = "default_weight")]
    pub weight: u16,
    /// Anchoring at the node origin.
    #[serde(default)]
    pub align: TextAlign,
    /// Extra advance between glyphs, in pixels.
    #[serde(default)]
    pub letter_spacing: f64,
}

fn default_weight() -> u16 {
    400
}

impl TextStyle {
    /// Regular weight, start-aligned.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: default_weight(),
            align: TextAlign::Start,
            letter_spacing: 0.0,
        }
    }

    /// Set the CSS weight.
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    /// Center the text on its origin.
    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// How an image fills its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Fill the box, cropping the overflow.
    #[default]
    Cover,
    /// Fit inside the box, letterboxing the remainder.
    Contain,
    /// Stretch to the box.
    Fill,
}

/// Immutable description of one visual element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualNode {
    /// Groups children under one style.
    Container {
        /// Label for debugging and lookups.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Applied to the whole subtree.
        #[serde(default)]
        style: Style,
        /// Painted over `clip`, or the full frame when unclipped.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<Fill>,
        /// Drawn in order, later on top.
        #[serde(default)]
        children: Vec<VisualNode>,
    },
    /// Filled and/or stroked geometry.
    Shape {
        /// Node style.
        #[serde(default)]
        style: Style,
        /// Geometry.
        shape: Shape,
        /// Interior paint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Fill>,
        /// Outline.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<Stroke>,
    },
    /// A single run of text.
    Text {
        /// Node style.
        #[serde(default)]
        style: Style,
        /// Content.
        text: String,
        /// Font and alignment.
        font: TextStyle,
        /// Glyph paint.
        fill: Fill,
    },
    /// A raster asset drawn into a box.
    Image {
        /// Node style.
        #[serde(default)]
        style: Style,
        /// Asset-relative path.
        src: String,
        /// Box size in pixels.
        size: Vec2,
        /// Fit of the image inside its box.
        #[serde(default)]
        fit: ImageFit,
    },
}

impl VisualNode {
    /// Unnamed container with default style.
    pub fn container(children: Vec<VisualNode>) -> Self {
        Self::Container {
            name: None,
            style: Style::default(),
            background: None,
            children,
        }
    }

    /// Unfilled rectangle.
    pub fn rect(width: f64, height: f64) -> Self {
        Self::Shape {
            style: Style::default(),
            shape: Shape::Rect {
                width,
                height,
                corner_radius: 0.0,
            },
            fill: None,
            stroke: None,
        }
    }

    /// Unfilled circle centered at the origin.
    pub fn circle(radius: f64) -> Self {
        Self::Shape {
            style: Style::default(),
            shape: Shape::Ellipse {
                rx: radius,
                ry: radius,
            },
            fill: None,
            stroke: None,
        }
    }

    /// Text filled with a flat color.
    pub fn text(text: impl Into<String>, font: TextStyle, color: Color) -> Self {
        Self::Text {
            style: Style::default(),
            text: text.into(),
            font,
            fill: Fill::solid(color),
        }
    }

    /// Image with [`ImageFit::Cover`].
    pub fn image(src: impl Into<String>, width: f64, height: f64) -> Self {
        Self::Image {
            style: Style::default(),
            src: src.into(),
            size: Vec2::new(width, height),
            fit: ImageFit::Cover,
        }
    }

    /// Style of any node kind.
    pub fn style(&self) -> &Style {
        match self {
            Self::Container { style, .. }
            | Self::Shape { style, .. }
            | Self::Text { style, .. }
            | Self::Image { style, .. } => style,
        }
    }

    /// Mutable style of any node kind.
    pub fn style_mut(&mut self) -> &mut Style {
        match self {
            Self::Container { style, .. }
            | Self::Shape { style, .. }
            | Self::Text { style, .. }
            | Self::Image { style, .. } => style,
        }
    }

    /// Container children; empty for leaves.
    pub fn children(&self) -> &[VisualNode] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Name a container. No-op on other kinds.
    pub fn named(mut self, n: impl Into<String>) -> Self {
        if let Self::Container { name, .. } = &mut self {
            *name = Some(n.into());
        }
        self
    }

    /// Set opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style_mut().opacity = opacity;
        self
    }

    /// Set the translation.
    pub fn translate(mut self, x: f64, y: f64) -> Self {
        let t = &mut self.style_mut().transform;
        t.translate = Vec2::new(x, y);
        self
    }

    /// Uniform scale about `anchor`.
    pub fn scale(mut self, s: f64, anchor: Vec2) -> Self {
        let t = &mut self.style_mut().transform;
        t.scale = Vec2::new(s, s);
        t.anchor = anchor;
        self
    }

    /// Set the rotation in degrees.
    pub fn rotate_deg(mut self, deg: f64) -> Self {
        self.style_mut().transform.rotation_rad = deg.to_radians();
        self
    }

    /// Replace the whole transform.
    pub fn transform(mut self, transform: Transform2D) -> Self {
        self.style_mut().transform = transform;
        self
    }

    /// Mark invisible.
    pub fn hidden(mut self) -> Self {
        self.style_mut().visible = false;
        self
    }

    /// Clip to `rect` in local coordinates.
    pub fn clip(mut self, rect: Rect) -> Self {
        self.style_mut().clip = Some(rect);
        self
    }

    /// Sets the fill of shapes and text, or the background of containers. No-op on images.
    pub fn fill(mut self, f: Fill) -> Self {
        match &mut self {
            Self::Container { background, .. } => *background = Some(f),
            Self::Shape { fill, .. } => *fill = Some(f),
            Self::Text { fill, .. } => *fill = f,
            Self::Image { .. } => {}
        }
        self
    }

    /// Outline a shape. No-op on other kinds.
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        if let Self::Shape { stroke, .. } = &mut self {
            *stroke = Some(Stroke { color, width });
        }
        self
    }

    /// Round a rectangle. No-op on other kinds.
    pub fn corner_radius(mut self, r: f64) -> Self {
        if let Self::Shape {
            shape: Shape::Rect { corner_radius, .. },
            ..
        } = &mut self
        {
            *corner_radius = r;
        }
        self
    }

    /// Pre-order traversal; `f` receives each node and its depth (root is 0).
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&VisualNode, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&VisualNode, usize),
    {
        f(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, f);
        }
    }

    /// Nodes in the tree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_, _| n += 1);
        n
    }

    /// Image sources referenced anywhere in the tree.
    pub fn asset_refs(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.walk(&mut |node, _| {
            if let Self::Image { src, .. } = node {
                out.insert(src.clone());
            }
        });
        out
    }

    /// Font families referenced anywhere in the tree.
    pub fn font_families(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.walk(&mut |node, _| {
            if let Self::Text { font, .. } = node {
                out.insert(font.family.clone());
            }
        });
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visual/node.rs"]
mod tests;
