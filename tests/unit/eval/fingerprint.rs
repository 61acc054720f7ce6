use super::*;
use crate::{foundation::core::FrameIndex, visual::node::VisualNode};

fn frame(f: u64, x: f64) -> EvaluatedFrame {
    EvaluatedFrame {
        frame: FrameIndex(f),
        root: VisualNode::container(vec![VisualNode::rect(10.0, 10.0).translate(x, 0.0)]),
    }
}

#[test]
fn fingerprint_is_stable() {
    let a = fingerprint_frame(&frame(3, 1.5)).unwrap();
    let b = fingerprint_frame(&frame(3, 1.5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fingerprint_tracks_content_and_frame() {
    let base = fingerprint_frame(&frame(3, 1.5)).unwrap();
    assert_ne!(base, fingerprint_frame(&frame(3, 1.6)).unwrap());
    assert_ne!(base, fingerprint_frame(&frame(4, 1.5)).unwrap());
}

#[test]
fn combined_fingerprint_is_order_sensitive() {
    let a = frame(0, 0.0);
    let b = frame(1, 2.0);
    let ab = fingerprint_frames(&[a.clone(), b.clone()]).unwrap();
    let ba = fingerprint_frames(&[b, a]).unwrap();
    assert_ne!(ab, ba);
    assert_ne!(fingerprint_frames(&[]).unwrap(), ab);
}
