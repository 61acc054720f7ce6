use serde::Deserialize;
use serde_json::json;

use crate::{
    animation::{
        interpolate::{InterpolateOptions, Lerp, interpolate},
        noise::NoiseField,
        remap::{LoopMode, Remap},
        spring::{Spring, SpringConfig, SpringOptions},
    },
    composition::model::{Composition, FontFace},
    eval::context::FrameCtx,
    foundation::{
        core::{Fps, Vec2, VideoConfig},
        error::{AdreelError, AdreelResult},
    },
    timeline::{
        compose::compose_scenes,
        sequencer::TransitionSeries,
        transition::{Direction, Transition, TransitionTiming},
    },
    visual::{
        color::{Color, interpolate_colors},
        node::{Fill, TextStyle, VisualNode},
    },
};

/// Registry id of the promo reel.
pub const ID: &str = "PromoReel";

const FAMILY: &str = "Inter";
const SCENE_LEN: u64 = 110;
const TRANSITION_LEN: u64 = 15;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    headline: String,
    tagline: String,
    features: Vec<String>,
    cta: String,
    accent: Color,
    background: Color,
    #[serde(default)]
    logo: Option<String>,
}

/// Three-scene vertical ad: hook, staggered feature list, typed call to action.
pub fn promo_reel() -> AdreelResult<Composition> {
    let fps = Fps::whole(30)?;
    let timeline = TransitionSeries::new()
        .scene("hook", SCENE_LEN)
        .transition(Transition::fade(TransitionTiming::spring(
            TRANSITION_LEN,
            SpringConfig::physics(1.0, 100.0, 200.0),
        )))
        .scene("features", SCENE_LEN)
        .premount(TRANSITION_LEN)
        .transition(Transition::wipe(
            Direction::FromLeft,
            TransitionTiming::linear(TRANSITION_LEN),
        ))
        .scene("cta", SCENE_LEN)
        .premount(TRANSITION_LEN)
        .build(fps)?;
    let config = VideoConfig::new(fps, 1080, 1920, timeline.duration())?;

    Composition::builder(ID, config)
        .timeline(timeline)
        .font(FontFace::new(FAMILY, "fonts/Inter-Regular.ttf"))
        .font(FontFace::new(FAMILY, "fonts/Inter-Bold.ttf").weight(800))
        .default_props(json!({
            "headline": "Train smarter.",
            "tagline": "Not more expensive.",
            "features": [
                "Real-time form feedback",
                "A plan built in seconds",
                "Progress you can see",
            ],
            "cta": "Try it free today",
            "accent": "#00D4FF",
            "background": "#04070F",
            "logo": null,
        }))?
        .composer(compose)
        .build()
}

fn compose(ctx: &FrameCtx<'_>) -> AdreelResult<VisualNode> {
    let props: Props = ctx.props_as()?;
    let frame = ctx
        .timeline
        .as_ref()
        .ok_or_else(|| AdreelError::evaluation("promo reel needs its timeline"))?;

    let scenes = compose_scenes(frame, ctx.bounds(), |scene| match scene.name.as_str() {
        "hook" => hook(ctx, &props, scene.local),
        "features" => features(ctx, &props, scene.local),
        "cta" => cta(ctx, &props, scene.local),
        other => Err(AdreelError::evaluation(format!("unknown scene '{other}'"))),
    })?;

    Ok(VisualNode::container(vec![background(ctx, &props)?, scenes]).named("promo"))
}

fn background(ctx: &FrameCtx<'_>, props: &Props) -> AdreelResult<VisualNode> {
    let total = ctx.config.duration.0 as f64;
    let glow = interpolate_colors(
        ctx.frame.0 as f64,
        &[0.0, total],
        &[props.background, Color::lerp(&props.background, &props.accent, 0.2)],
    )?;

    let (w, h) = (f64::from(ctx.config.width), f64::from(ctx.config.height));
    let t = ctx.frame.0 as f64 * 0.01;
    let mut children = Vec::with_capacity(3);
    for (i, base) in [(0.2, 0.25), (0.8, 0.5), (0.35, 0.85)].into_iter().enumerate() {
        let field = NoiseField::new(format!("orb-{i}"));
        let dx = field.sample2(t, 0.0) * 60.0;
        let dy = field.sample2(0.0, t) * 60.0;
        children.push(
            VisualNode::circle(220.0)
                .fill(Fill::radial(&[props.accent.faded(0.25), Color::TRANSPARENT]))
                .translate(base.0 * w + dx, base.1 * h + dy),
        );
    }

    Ok(VisualNode::container(children)
        .fill(Fill::linear(180.0, &[props.background, glow]))
        .named("background"))
}

fn hook(ctx: &FrameCtx<'_>, props: &Props, local: i64) -> AdreelResult<VisualNode> {
    let center = ctx.config.center().to_vec2();
    let pop = Spring::new(SpringConfig::BOUNCY, ctx.fps())?;
    let scale = pop.value(local as f64, &SpringOptions::range(0.6, 1.0))?;
    let opacity = interpolate(
        local as f64,
        &[0.0, 10.0],
        &[0.0, 1.0],
        InterpolateOptions::clamp(),
    )?;

    let settle = Spring::new(SpringConfig::SMOOTH, ctx.fps())?;
    let rise = settle.value(local as f64, &SpringOptions::range(80.0, 0.0).delayed(12.0))?;
    let tagline_opacity = settle.progress((local - 12) as f64);

    Ok(VisualNode::container(vec![
        VisualNode::text(
            props.headline.clone(),
            TextStyle::new(FAMILY, 120.0).weight(800).centered(),
            Color::WHITE,
        )
        .translate(center.x, center.y - 80.0)
        .scale(scale, Vec2::ZERO)
        .opacity(opacity),
        VisualNode::text(
            props.tagline.clone(),
            TextStyle::new(FAMILY, 64.0).centered(),
            props.accent,
        )
        .translate(center.x, center.y + 80.0 + rise)
        .opacity(tagline_opacity),
    ]))
}

fn features(ctx: &FrameCtx<'_>, props: &Props, local: i64) -> AdreelResult<VisualNode> {
    let snappy = Spring::new(SpringConfig::SNAPPY, ctx.fps())?;
    let left = 140.0;
    let top = f64::from(ctx.config.height) * 0.3;

    let mut rows = Vec::with_capacity(props.features.len());
    for (i, text) in props.features.iter().enumerate() {
        let delay = 8.0 * i as f64;
        let x = snappy.value(local as f64, &SpringOptions::range(-300.0, 0.0).delayed(delay))?;
        let opacity = snappy.progress(local as f64 - delay).clamp(0.0, 1.0);
        rows.push(
            VisualNode::container(vec![
                VisualNode::circle(14.0).fill(Fill::solid(props.accent)),
                VisualNode::text(
                    text.clone(),
                    TextStyle::new(FAMILY, 56.0),
                    Color::WHITE,
                )
                .translate(48.0, 0.0),
            ])
            .translate(left + x, top + 160.0 * i as f64)
            .opacity(opacity),
        );
    }
    Ok(VisualNode::container(rows))
}

fn cta(ctx: &FrameCtx<'_>, props: &Props, local: i64) -> AdreelResult<VisualNode> {
    let center = ctx.config.center().to_vec2();
    let len = props.cta.chars().count();
    let typed = interpolate(
        local as f64,
        &[0.0, 30.0],
        &[0.0, len as f64],
        InterpolateOptions::clamp(),
    )?
    .floor() as usize;
    let shown: String = props.cta.chars().take(typed).collect();

    let blink = Remap::Loop {
        period: 16,
        mode: LoopMode::Repeat,
    };
    let pulse = Remap::Loop {
        period: 30,
        mode: LoopMode::PingPong,
    };
    let button = interpolate_colors(
        pulse.apply(local.max(0)) as f64,
        &[0.0, 29.0],
        &[props.accent, Color::lerp(&props.accent, &Color::WHITE, 0.3)],
    )?;

    let mut cursor = VisualNode::rect(6.0, 72.0)
        .fill(Fill::solid(Color::WHITE))
        .translate(center.x + 30.0 * typed as f64 / 2.0, center.y - 36.0);
    if typed >= len && blink.apply(local) >= 8 {
        cursor = cursor.hidden();
    }

    let mut children = vec![
        VisualNode::rect(760.0, 160.0)
            .corner_radius(80.0)
            .fill(Fill::solid(button))
            .translate(center.x - 380.0, center.y - 80.0),
        VisualNode::text(
            shown,
            TextStyle::new(FAMILY, 64.0).weight(800).centered(),
            props.background,
        )
        .translate(center.x, center.y),
        cursor,
    ];
    if let Some(logo) = &props.logo {
        children.push(
            VisualNode::image(logo.clone(), 240.0, 240.0).translate(center.x - 120.0, 240.0),
        );
    }
    Ok(VisualNode::container(children))
}

#[cfg(test)]
#[path = "../../tests/unit/presets/promo.rs"]
mod tests;
