//! Controller layer: storefront events, alert classification, and command orchestration.

pub mod events;
pub mod orchestration;
