pub(crate) mod compose;
pub(crate) mod scene;
pub(crate) mod sequencer;
pub(crate) mod transition;
