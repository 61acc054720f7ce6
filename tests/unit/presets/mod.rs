use super::*;
use crate::foundation::core::FrameIndex;

#[test]
fn builtins_register_in_listing_order() {
    let reg = builtin_registry().unwrap();
    assert_eq!(
        reg.ids().collect::<Vec<_>>(),
        vec![hello_world::ID, countdown::ID, promo::ID]
    );
}

#[test]
fn every_builtin_validates_and_evaluates_its_bounds() {
    let reg = builtin_registry().unwrap();
    for comp in reg.iter() {
        comp.validate().unwrap();
        let last = comp.config().duration.0 - 1;
        for f in [0, last / 2, last] {
            crate::eval::evaluator::eval_frame(comp, FrameIndex(f), None)
                .unwrap_or_else(|e| panic!("{} frame {f}: {e}", comp.id()));
        }
    }
}
