use super::*;
use crate::{eval::evaluator::Evaluator, foundation::core::FrameIndex};

fn scenes(eval: &Evaluator<'_>, frame: u64) -> Vec<VisualNode> {
    let root = eval.eval_frame(FrameIndex(frame)).unwrap().root;
    root.children()[1].children().to_vec()
}

fn name(node: &VisualNode) -> &str {
    match node {
        VisualNode::Container { name, .. } => name.as_deref().unwrap_or(""),
        _ => "",
    }
}

fn texts(node: &VisualNode) -> Vec<String> {
    let mut out = Vec::new();
    node.walk(&mut |n, _| {
        if let VisualNode::Text { text, .. } = n {
            out.push(text.clone());
        }
    });
    out
}

#[test]
fn layout_overlaps_scenes_by_transition_width() {
    let comp = promo_reel().unwrap();
    let tl = comp.timeline().unwrap();
    let starts: Vec<u64> = tl.scenes().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0, 95, 190]);
    assert_eq!(comp.config().duration.0, 300);
    assert_eq!((comp.config().width, comp.config().height), (1080, 1920));
}

#[test]
fn fade_cross_dissolves_hook_into_features() {
    let comp = promo_reel().unwrap();
    let eval = Evaluator::new(&comp, None).unwrap();
    let at = scenes(&eval, 100);
    assert_eq!(at.iter().map(name).collect::<Vec<_>>(), vec!["hook", "features"]);
    let (out, inc) = (at[0].style().opacity, at[1].style().opacity);
    assert_eq!(out, 1.0);
    assert!(inc > 0.0 && inc < 1.0);
}

#[test]
fn upcoming_scene_is_premounted_hidden() {
    let comp = promo_reel().unwrap();
    let eval = Evaluator::new(&comp, None).unwrap();
    let at = scenes(&eval, 85);
    assert_eq!(at.iter().map(name).collect::<Vec<_>>(), vec!["hook", "features"]);
    assert!(at[0].style().visible);
    assert!(!at[1].style().visible);
}

#[test]
fn wipe_clips_the_incoming_cta() {
    let comp = promo_reel().unwrap();
    let eval = Evaluator::new(&comp, None).unwrap();
    let at = scenes(&eval, 200);
    let cta = at.iter().find(|n| name(n) == "cta").unwrap();
    let clip = cta.style().clip.unwrap();
    assert!(clip.width() > 0.0 && clip.width() < 1080.0);
}

#[test]
fn cta_types_out_its_label() {
    let comp = promo_reel().unwrap();
    let eval = Evaluator::new(&comp, None).unwrap();
    let last = scenes(&eval, 299);
    let cta = last.iter().find(|n| name(n) == "cta").unwrap();
    assert!(texts(cta).contains(&"Try it free today".to_owned()));

    let first = scenes(&eval, 190);
    let cta = first.iter().find(|n| name(n) == "cta").unwrap();
    assert!(texts(cta).contains(&String::new()));
}

#[test]
fn logo_prop_adds_an_image_reference() {
    let comp = promo_reel().unwrap();
    let eval = Evaluator::new(&comp, None).unwrap();
    assert!(eval.eval_frame(FrameIndex(250)).unwrap().root.asset_refs().is_empty());

    let overrides = serde_json::json!({ "logo": "img/logo.png" });
    let eval = Evaluator::new(&comp, Some(&overrides)).unwrap();
    let refs = eval.eval_frame(FrameIndex(250)).unwrap().root.asset_refs();
    assert!(refs.contains("img/logo.png"));
}

#[test]
fn background_orbs_drift_with_noise() {
    let comp = promo_reel().unwrap();
    let eval = Evaluator::new(&comp, None).unwrap();
    let orb = |f: u64| {
        let root = eval.eval_frame(FrameIndex(f)).unwrap().root;
        root.children()[0].children()[0].style().transform.translate
    };
    assert_ne!(orb(0), orb(137));
    assert_eq!(orb(137), orb(137));
}
