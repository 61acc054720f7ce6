use super::*;
use crate::{
    animation::spring::SpringConfig,
    foundation::core::{Fps, VideoConfig},
    timeline::sequencer::TransitionSeries,
};
use serde_json::json;

fn spring_comp() -> Composition {
    let fps = Fps::whole(30).unwrap();
    let config = VideoConfig::new(fps, 1920, 1080, 150).unwrap();
    let timeline = TransitionSeries::new().scene("main", 150).build(fps).unwrap();
    Composition::builder("spring-box", config)
        .timeline(timeline)
        .default_props(json!({ "size": 100.0 }))
        .unwrap()
        .composer(|ctx: &FrameCtx<'_>| -> AdreelResult<VisualNode> {
            let size = ctx.props["size"].as_f64().unwrap_or(0.0);
            let Some(local) = ctx.scene_local("main") else {
                return Ok(VisualNode::container(vec![]));
            };
            let p = ctx.spring(SpringConfig::SMOOTH, local)?;
            Ok(VisualNode::container(vec![VisualNode::rect(size, size).opacity(p)]))
        })
        .build()
        .unwrap()
}

fn opacity_at(eval: &Evaluator<'_>, frame: u64) -> f64 {
    let out = eval.eval_frame(FrameIndex(frame)).unwrap();
    out.root.children()[0].style().opacity
}

#[test]
fn single_scene_spring_golden() {
    let comp = spring_comp();
    let eval = Evaluator::new(&comp, None).unwrap();
    assert_eq!(opacity_at(&eval, 0), 0.0);
    assert!(opacity_at(&eval, 1) < 0.05);
    assert!(opacity_at(&eval, 30) > 0.999);
    for f in [60, 90, 149] {
        assert!((opacity_at(&eval, f) - 1.0).abs() < 1e-6, "frame {f}");
    }
}

#[test]
fn frame_past_duration_is_an_evaluation_error() {
    let comp = spring_comp();
    let err = eval_frame(&comp, FrameIndex(150), None).unwrap_err();
    assert!(matches!(err, AdreelError::Evaluation(_)));
    assert!(err.to_string().starts_with("evaluation error:"));
}

#[test]
fn re_evaluation_is_identical() {
    let comp = spring_comp();
    let eval = Evaluator::new(&comp, None).unwrap();
    let a = eval.eval_frame(FrameIndex(42)).unwrap();
    let _ = eval.eval_frame(FrameIndex(7)).unwrap();
    let b = eval.eval_frame(FrameIndex(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn overrides_reach_the_composer() {
    let comp = spring_comp();
    let out = eval_frame(&comp, FrameIndex(10), Some(&json!({ "size": 42.0 }))).unwrap();
    let VisualNode::Shape { shape, .. } = &out.root.children()[0] else {
        panic!("expected shape");
    };
    assert_eq!(
        serde_json::to_value(shape).unwrap()["width"],
        json!(42.0)
    );
    assert!(Evaluator::new(&comp, Some(&json!(3))).is_err());
}

#[test]
fn composer_errors_keep_their_kind() {
    let config = VideoConfig::new(Fps::whole(30).unwrap(), 10, 10, 10).unwrap();
    let comp = Composition::builder("failing", config)
        .composer(|ctx: &FrameCtx<'_>| -> AdreelResult<VisualNode> {
            #[derive(serde::Deserialize)]
            #[allow(dead_code)]
            struct Props {
                title: String,
            }
            let _: Props = ctx.props_as()?;
            Ok(VisualNode::container(vec![]))
        })
        .build()
        .unwrap();
    assert!(matches!(
        eval_frame(&comp, FrameIndex(0), None),
        Err(AdreelError::Validation(_))
    ));

    let comp = Composition::builder("wrapped", config)
        .composer(|_: &FrameCtx<'_>| -> AdreelResult<VisualNode> {
            Err(anyhow::anyhow!("disk on fire").into())
        })
        .build()
        .unwrap();
    let err = eval_frame(&comp, FrameIndex(3), None).unwrap_err();
    assert!(matches!(err, AdreelError::Evaluation(_)));
    assert!(err.to_string().contains("disk on fire"));
}
