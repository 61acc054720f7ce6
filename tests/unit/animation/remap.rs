use super::*;

#[test]
fn delay_holds_first_frame() {
    let r = Remap::Delay { by: 5 };
    assert_eq!(r.apply(0), 0);
    assert_eq!(r.apply(4), 0);
    assert_eq!(r.apply(5), 0);
    assert_eq!(r.apply(9), 4);
}

#[test]
fn speed_floors_scaled_frame() {
    assert_eq!(Remap::Speed { factor: 2.0 }.apply(7), 14);
    assert_eq!(Remap::Speed { factor: 0.5 }.apply(7), 3);
}

#[test]
fn reverse_counts_down_then_holds() {
    let r = Remap::Reverse { duration: 10 };
    assert_eq!(r.apply(0), 9);
    assert_eq!(r.apply(9), 0);
    assert_eq!(r.apply(40), 0);
}

#[test]
fn loop_repeat_and_ping_pong() {
    let rep = Remap::Loop {
        period: 4,
        mode: LoopMode::Repeat,
    };
    let got: Vec<i64> = (0..9).map(|f| rep.apply(f)).collect();
    assert_eq!(got, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);

    let pp = Remap::Loop {
        period: 4,
        mode: LoopMode::PingPong,
    };
    let got: Vec<i64> = (0..9).map(|f| pp.apply(f)).collect();
    assert_eq!(got, vec![0, 1, 2, 3, 2, 1, 0, 1, 2]);
}

#[test]
fn freeze_ignores_input() {
    let r = Remap::Freeze { frame: 12 };
    assert_eq!(r.apply(-3), 12);
    assert_eq!(r.apply(500), 12);
}

#[test]
fn premount_frames_pass_through() {
    assert_eq!(Remap::Delay { by: 3 }.apply(-2), -2);
    assert_eq!(Remap::Reverse { duration: 3 }.apply(-1), -1);
}

#[test]
fn chain_applies_in_order() {
    let chain = [
        Remap::Delay { by: 10 },
        Remap::Loop {
            period: 30,
            mode: LoopMode::Repeat,
        },
    ];
    assert_eq!(apply_chain(&chain, 5), 0);
    assert_eq!(apply_chain(&chain, 45), 5);
}

#[test]
fn validate_rejects_degenerate_parameters() {
    assert!(Remap::Speed { factor: 0.0 }.validate().is_err());
    assert!(Remap::Speed { factor: f64::NAN }.validate().is_err());
    assert!(Remap::Reverse { duration: 0 }.validate().is_err());
    assert!(
        Remap::Loop {
            period: 0,
            mode: LoopMode::PingPong
        }
        .validate()
        .is_err()
    );
    assert!(Remap::Delay { by: 0 }.validate().is_ok());
}

#[test]
fn serde_is_internally_tagged() {
    let r: Remap = serde_json::from_value(serde_json::json!({
        "kind": "loop", "period": 8, "mode": "ping_pong"
    }))
    .unwrap();
    assert_eq!(
        r,
        Remap::Loop {
            period: 8,
            mode: LoopMode::PingPong
        }
    );
}
