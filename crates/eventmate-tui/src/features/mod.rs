//! Feature modules, each owning its state, reducer pieces and render code.

pub mod events;
