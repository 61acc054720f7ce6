use super::*;
use crate::{
    foundation::core::{Fps, VideoConfig},
    timeline::sequencer::TransitionSeries,
};
use serde_json::json;

fn config(duration: u64) -> VideoConfig {
    VideoConfig::new(Fps::whole(30).unwrap(), 1080, 1920, duration).unwrap()
}

fn blank(_: &FrameCtx<'_>) -> AdreelResult<VisualNode> {
    Ok(VisualNode::container(vec![]))
}

#[test]
fn merge_replaces_top_level_keys_only() {
    let defaults = json!({ "title": "Hi", "theme": { "bg": "#000", "fg": "#fff" } });
    let Value::Object(defaults) = defaults else {
        unreachable!()
    };
    let merged = merge_props(&defaults, Some(&json!({ "theme": { "bg": "#111" } }))).unwrap();
    assert_eq!(merged, json!({ "title": "Hi", "theme": { "bg": "#111" } }));

    assert_eq!(merge_props(&defaults, None).unwrap(), Value::Object(defaults.clone()));
    assert_eq!(
        merge_props(&defaults, Some(&Value::Null)).unwrap(),
        Value::Object(defaults.clone())
    );
    assert!(matches!(
        merge_props(&defaults, Some(&json!([1, 2]))),
        Err(AdreelError::Validation(_))
    ));
}

#[test]
fn builder_validates_ids_and_props() {
    assert!(
        Composition::builder("Hello World", config(30))
            .composer(blank)
            .build()
            .is_err()
    );
    assert!(
        Composition::builder("hello", config(30))
            .default_props(json!("not an object"))
            .is_err()
    );
    assert!(Composition::builder("hello", config(30)).build().is_err());

    let comp = Composition::builder("Hello-World", config(30))
        .default_props(json!({ "title": "x" }))
        .unwrap()
        .composer(blank)
        .build()
        .unwrap();
    assert_eq!(comp.id(), "Hello-World");
    assert_eq!(
        comp.resolve_props(Some(&json!({ "title": "y" }))).unwrap(),
        json!({ "title": "y" })
    );
}

#[test]
fn timeline_must_fit_the_video() {
    let fps = Fps::whole(30).unwrap();
    let tl = TransitionSeries::new().scene("a", 60).build(fps).unwrap();
    assert!(
        Composition::builder("short", config(30))
            .timeline(tl.clone())
            .composer(blank)
            .build()
            .is_err()
    );
    assert!(
        Composition::builder("fits", config(60))
            .timeline(tl)
            .composer(blank)
            .build()
            .is_ok()
    );

    let other_fps = TransitionSeries::new()
        .scene("a", 10)
        .build(Fps::whole(24).unwrap())
        .unwrap();
    assert!(
        Composition::builder("fps", config(60))
            .timeline(other_fps)
            .composer(blank)
            .build()
            .is_err()
    );
}

#[test]
fn fonts_need_relative_paths() {
    let bad = Composition::builder("fonts", config(30))
        .font(FontFace::new("Inter", "/abs/Inter.ttf"))
        .composer(blank)
        .build();
    assert!(bad.is_err());

    let ok = Composition::builder("fonts", config(30))
        .font(FontFace::new("Inter", "fonts/Inter.ttf").weight(700))
        .composer(blank)
        .build()
        .unwrap();
    assert_eq!(ok.fonts()[0].weight, 700);
}

#[test]
fn closures_are_composers() {
    let comp = Composition::builder("closure", config(30))
        .composer(|ctx: &FrameCtx<'_>| -> AdreelResult<VisualNode> {
            Ok(VisualNode::rect(ctx.frame.0 as f64, 1.0))
        })
        .build()
        .unwrap();
    let props = json!({});
    let ctx = FrameCtx {
        frame: crate::foundation::core::FrameIndex(7),
        config: comp.config(),
        timeline: None,
        props: &props,
    };
    let node = comp.composer().compose(&ctx).unwrap();
    assert_eq!(node, VisualNode::rect(7.0, 1.0));
}
