use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    assert_eq!(Color::hex("#fff").unwrap(), Color::WHITE);
    assert_eq!("#0A0A0A".parse::<Color>().unwrap(), Color::rgb8(10, 10, 10));
}

#[test]
fn rejects_malformed_hex() {
    assert!(Color::hex("#12345").is_err());
    assert!(Color::hex("#gg0000").is_err());
    assert!(matches!(
        Color::hex("nope"),
        Err(AdreelError::Validation(_))
    ));
    assert!(serde_json::from_value::<Color>(json!([0.1, 0.2])).is_err());
}

#[test]
fn parses_objects_and_arrays() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgb(0.25, 0.5, 0.75));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));

    let c: Color = serde_json::from_value(json!({"h": 120.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!(c.r.abs() < 1e-9);
    assert!((c.g - 1.0).abs() < 1e-9);
    assert!(c.b.abs() < 1e-9);
}

#[test]
fn hex_formatting_round_trips() {
    let c = Color::hex("#3b82f6").unwrap();
    assert_eq!(c.to_hex(), "#3b82f6");
    assert_eq!(c.with_alpha(0.5).to_hex(), "#3b82f680");
}

#[test]
fn colors_interpolate_componentwise() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let blue = Color::rgb(0.0, 0.0, 1.0);
    let mid = interpolate_colors(5.0, &[0.0, 10.0], &[red, blue]).unwrap();
    assert_eq!(mid, Color::rgb(0.5, 0.0, 0.5));
    assert_eq!(
        interpolate_colors(20.0, &[0.0, 10.0], &[red, blue]).unwrap(),
        blue
    );
    assert!(interpolate_colors(1.0, &[0.0], &[red]).is_err());
}

#[test]
fn faded_scales_alpha() {
    assert_eq!(Color::WHITE.faded(0.25).a, 0.25);
}
