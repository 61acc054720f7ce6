use serde::Deserialize;
use serde_json::json;

use crate::{
    animation::{
        interpolate::Interpolation,
        spring::{Spring, SpringConfig},
    },
    composition::model::Composition,
    eval::context::FrameCtx,
    foundation::{
        core::{Fps, Vec2, VideoConfig},
        error::{AdreelError, AdreelResult},
    },
    timeline::scene::Scene,
    visual::{
        color::Color,
        node::{Fill, TextStyle, VisualNode},
    },
};

/// Registry id of the countdown.
pub const ID: &str = "CountdownTimer";

const ENTER: SpringConfig = SpringConfig::physics(1.0, 200.0, 12.0);

#[derive(Deserialize)]
struct Props {
    from: i64,
    to: i64,
}

/// One-second digits counting down from `from` to `to`, each springing in and fading out.
pub fn countdown() -> AdreelResult<Composition> {
    let fps = Fps::whole(30)?;
    let config = VideoConfig::new(fps, 1920, 1080, 330)?;
    // Settles within the first 30% of each one-second digit.
    let enter = Spring::new(ENTER.with_duration(seconds(fps) * 3 / 10), fps)?;
    Composition::builder(ID, config)
        .default_props(json!({ "from": 10, "to": 0 }))?
        .composer(move |ctx: &FrameCtx<'_>| compose(ctx, &enter))
        .build()
}

fn seconds(fps: Fps) -> u64 {
    fps.as_f64().round() as u64
}

/// Scenes depend on props, so they are laid out per call rather than stored on the composition.
fn digit_scenes(props: &Props, fps: u64) -> AdreelResult<Vec<(i64, Scene)>> {
    if props.to > props.from {
        return Err(AdreelError::validation(format!(
            "countdown 'from' ({}) must be >= 'to' ({})",
            props.from, props.to
        )));
    }
    (props.to..=props.from)
        .rev()
        .enumerate()
        .map(|(i, n)| Ok((n, Scene::new(format!("count-{n}"), i as u64 * fps, fps)?)))
        .collect()
}

fn compose(ctx: &FrameCtx<'_>, enter: &Spring) -> AdreelResult<VisualNode> {
    let props: Props = ctx.props_as()?;
    let fps = seconds(ctx.fps());
    let scenes = digit_scenes(&props, fps)?;
    let center = ctx.config.center().to_vec2();

    let mut children = Vec::new();
    for (n, scene) in &scenes {
        let Some(local) = scene.active_local(ctx.frame) else {
            continue;
        };
        let d = scene.duration as f64;
        let scale = enter.progress_at(local);
        let opacity = Interpolation::clamped(vec![0.0, 8.0, d - 8.0, d], vec![0.0, 1.0, 1.0, 0.0])?
            .sample(local as f64)?;

        children.push(
            VisualNode::container(vec![
                VisualNode::text(
                    n.to_string(),
                    TextStyle::new("sans-serif", 280.0).weight(700).centered(),
                    Color::WHITE,
                )
                .translate(center.x, center.y)
                .scale(scale, Vec2::ZERO)
                .opacity(opacity),
            ])
            .named(scene.name.clone()),
        );
    }

    Ok(VisualNode::container(children)
        .fill(Fill::solid(Color::rgb8(0x0b, 0x12, 0x15)))
        .named("countdown"))
}

#[cfg(test)]
#[path = "../../tests/unit/presets/countdown.rs"]
mod tests;
