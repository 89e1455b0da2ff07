//! Input normalization: three independent handlers (wheel/trackpad,
//! keyboard, touch) that each reduce raw host events to a directional
//! intent for the transition engine.

pub mod keys;
pub mod touch;
pub mod wheel;
