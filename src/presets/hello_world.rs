use serde::Deserialize;
use serde_json::json;

use crate::{
    animation::{
        interpolate::{InterpolateOptions, interpolate},
        spring::SpringConfig,
    },
    composition::model::Composition,
    eval::context::FrameCtx,
    foundation::{
        core::{Fps, Vec2, VideoConfig},
        error::AdreelResult,
    },
    visual::{
        color::Color,
        node::{Fill, TextStyle, VisualNode},
    },
};

/// Registry id of the hello-world composition.
pub const ID: &str = "HelloWorld";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    title_text: String,
    title_color: Color,
}

/// Centered title fading in over one second while a damped spring scales it up.
pub fn hello_world() -> AdreelResult<Composition> {
    let config = VideoConfig::new(Fps::whole(30)?, 1920, 1080, 150)?;
    Composition::builder(ID, config)
        .default_props(json!({
            "titleText": "Hello from adreel",
            "titleColor": "#ffffff",
        }))?
        .composer(compose)
        .build()
}

fn compose(ctx: &FrameCtx<'_>) -> AdreelResult<VisualNode> {
    let props: Props = ctx.props_as()?;
    let frame = ctx.local();
    let fps = ctx.fps().as_f64();

    let opacity = interpolate(
        frame as f64,
        &[0.0, fps],
        &[0.0, 1.0],
        InterpolateOptions::clamp_right(),
    )?;
    let scale = ctx.spring(SpringConfig::default().with_damping(200.0), frame)?;

    let center = ctx.config.center().to_vec2();
    let title = VisualNode::text(
        props.title_text,
        TextStyle::new("sans-serif", 80.0).weight(700).centered(),
        props.title_color,
    )
    .translate(center.x, center.y)
    .scale(scale, Vec2::ZERO)
    .opacity(opacity);

    Ok(VisualNode::container(vec![title])
        .fill(Fill::solid(Color::rgb8(0x0b, 0x12, 0x15)))
        .named("hello-world"))
}

#[cfg(test)]
#[path = "../../tests/unit/presets/hello_world.rs"]
mod tests;
