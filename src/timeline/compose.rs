use crate::{
    foundation::{core::Rect, error::AdreelResult},
    timeline::{
        sequencer::{SceneFrame, TimelineFrame},
        transition::PresentationStyle,
    },
    visual::node::VisualNode,
};

/// Build one container per on-screen scene, in scene order, with the active transition's
/// presentation applied. Premounting scenes are rendered hidden.
///
/// `render` is called once per active or premounting scene with its local frame.
pub fn compose_scenes<F>(
    frame: &TimelineFrame,
    bounds: Rect,
    mut render: F,
) -> AdreelResult<VisualNode>
where
    F: FnMut(&SceneFrame) -> AdreelResult<VisualNode>,
{
    let mut entries: Vec<(&SceneFrame, bool)> = frame
        .active
        .iter()
        .map(|s| (s, false))
        .chain(frame.premounting.iter().map(|s| (s, true)))
        .collect();
    entries.sort_by_key(|(s, _)| s.index);

    let styles = frame
        .transition
        .as_ref()
        .map(|t| (t.from, t.to, t.transition.styles(t.progress, bounds)));

    let mut children = Vec::with_capacity(entries.len());
    for (scene, premounting) in entries {
        let mut node = VisualNode::container(vec![render(scene)?]).named(scene.name.clone());
        if premounting {
            node = node.hidden();
        } else if let Some((from, to, (outgoing, incoming))) = styles {
            if scene.index == from {
                node = apply(node, outgoing);
            } else if scene.index == to {
                node = apply(node, incoming);
            }
        }
        children.push(node);
    }
    Ok(VisualNode::container(children).named("scenes"))
}

fn apply(mut node: VisualNode, p: PresentationStyle) -> VisualNode {
    let style = node.style_mut();
    style.opacity *= p.opacity;
    style.transform.translate += p.offset;
    if let Some(clip) = p.clip {
        style.clip = Some(clip);
    }
    node
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/compose.rs"]
mod tests;
