use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.iter().count(), 3);
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
    assert_eq!(Fps::whole(30).unwrap().secs_to_frames_round(0.5), 15);
}

#[test]
fn video_config_rejects_zero_fields() {
    let fps = Fps::whole(30).unwrap();
    assert!(VideoConfig::new(fps, 1920, 1080, 150).is_ok());
    assert!(VideoConfig::new(fps, 0, 1080, 150).is_err());
    assert!(VideoConfig::new(fps, 1920, 1080, 0).is_err());

    let bad = VideoConfig {
        fps: Fps { num: 30, den: 0 },
        width: 10,
        height: 10,
        duration: FrameIndex(1),
    };
    assert!(bad.validate().is_err());
}

#[test]
fn video_config_center_is_half_extent() {
    let cfg = VideoConfig::new(Fps::whole(30).unwrap(), 1920, 1080, 1).unwrap();
    assert_eq!(cfg.center(), Point::new(960.0, 540.0));
    assert_eq!(cfg.frame_range().len_frames(), 1);
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert!(t.is_identity());
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D::translate(10.0, -2.5);
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn scale_about_anchor_keeps_anchor_fixed() {
    let anchor = Vec2::new(50.0, 20.0);
    let t = Transform2D::scale_about(2.0, anchor).to_affine();
    let p = t * Point::new(50.0, 20.0);
    assert!((p.x - 50.0).abs() < 1e-9);
    assert!((p.y - 20.0).abs() < 1e-9);
}
