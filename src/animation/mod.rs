pub(crate) mod accumulate;
pub(crate) mod ease;
pub(crate) mod looping;
pub(crate) mod range;
pub(crate) mod stage;
pub(crate) mod wave;
