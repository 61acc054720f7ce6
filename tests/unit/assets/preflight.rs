use std::sync::Mutex;

use super::*;
use crate::{
    eval::context::FrameCtx,
    foundation::{
        core::{Fps, VideoConfig},
        error::AdreelError,
    },
    timeline::sequencer::TransitionSeries,
    visual::{
        color::Color,
        node::{TextStyle, VisualNode},
    },
};

/// Resolver that records every lookup and fails for paths containing "missing".
#[derive(Default)]
struct Recording {
    calls: Mutex<Vec<String>>,
}

impl AssetResolver for Recording {
    fn resolve(&self, rel: &str) -> AdreelResult<PathBuf> {
        self.calls.lock().unwrap().push(rel.to_owned());
        if rel.contains("missing") {
            return Err(AdreelError::asset(format!("'{rel}' not found")));
        }
        Ok(PathBuf::from("/assets").join(rel))
    }
}

fn comp(image: &'static str) -> Composition {
    let fps = Fps::whole(30).unwrap();
    let config = VideoConfig::new(fps, 100, 100, 60).unwrap();
    let tl = TransitionSeries::new()
        .scene("a", 30)
        .scene("b", 30)
        .build(fps)
        .unwrap();
    Composition::builder("scan", config)
        .timeline(tl)
        .font(FontFace::new("Inter", "fonts/Inter.ttf"))
        .font(FontFace::new("Inter", "./fonts/Inter.ttf"))
        .font(FontFace::new("Inter", "fonts/Inter-Bold.ttf").weight(700))
        .composer(move |ctx: &FrameCtx<'_>| -> AdreelResult<VisualNode> {
            let mut children = vec![VisualNode::text(
                "hi",
                TextStyle::new("Inter", 10.0),
                Color::WHITE,
            )];
            if ctx.scene_local("b").is_some() {
                children.push(VisualNode::image(image, 10.0, 10.0));
            }
            Ok(VisualNode::container(children))
        })
        .build()
        .unwrap()
}

#[test]
fn resolves_fonts_once_and_scanned_images() {
    let resolver = Recording::default();
    let prepared = Preflight::run(&comp("img/logo.png"), &resolver, None).unwrap();
    assert_eq!(prepared.comp_id(), "scan");
    assert_eq!(prepared.fonts().len(), 2);
    assert_eq!(prepared.fonts()[1].face.weight, 700);
    assert_eq!(
        prepared.image("./img/logo.png"),
        Some(Path::new("/assets/img/logo.png"))
    );
    assert_eq!(prepared.images().count(), 1);

    let calls = resolver.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec!["fonts/Inter.ttf", "fonts/Inter-Bold.ttf", "img/logo.png"]
    );
}

#[test]
fn resolution_failures_surface_unchanged() {
    let resolver = Recording::default();
    let err = Preflight::run(&comp("img/missing.png"), &resolver, None).unwrap_err();
    assert!(matches!(err, AdreelError::Asset(ref m) if m.contains("missing.png")));
}
