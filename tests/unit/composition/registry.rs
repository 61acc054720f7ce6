use super::*;
use crate::{
    foundation::core::{Fps, VideoConfig},
    visual::node::VisualNode,
};

fn comp(id: &str) -> Composition {
    let config = VideoConfig::new(Fps::whole(30).unwrap(), 640, 360, 30).unwrap();
    Composition::builder(id, config)
        .composer(
            |_: &crate::eval::context::FrameCtx<'_>| -> AdreelResult<VisualNode> {
                Ok(VisualNode::container(vec![]))
            },
        )
        .build()
        .unwrap()
}

#[test]
fn lists_in_registration_order() {
    let reg = Registry::new()
        .with(comp("zeta"))
        .unwrap()
        .with(comp("alpha"))
        .unwrap();
    assert_eq!(reg.ids().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.get("alpha").unwrap().id(), "alpha");
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut reg = Registry::new();
    reg.register(comp("intro")).unwrap();
    assert!(matches!(
        reg.register(comp("intro")),
        Err(AdreelError::Validation(_))
    ));
    assert_eq!(reg.len(), 1);
}

#[test]
fn missing_id_names_the_alternatives() {
    let reg = Registry::new().with(comp("intro")).unwrap();
    let err = reg.get("outro").unwrap_err();
    assert!(matches!(err, AdreelError::Validation(_)));
    assert!(err.to_string().contains("intro"));
    assert!(Registry::new().is_empty());
}
