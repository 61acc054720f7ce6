//! Built-in compositions.

pub(crate) mod countdown;
pub(crate) mod hello_world;
pub(crate) mod promo;

use crate::{composition::registry::Registry, foundation::error::AdreelResult};

/// Registry holding every built-in composition, in listing order.
pub fn builtin_registry() -> AdreelResult<Registry> {
    Registry::new()
        .with(hello_world::hello_world()?)?
        .with(countdown::countdown()?)?
        .with(promo::promo_reel()?)
}

#[cfg(test)]
#[path = "../../tests/unit/presets/mod.rs"]
mod tests;
