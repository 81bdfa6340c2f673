//! Terminal presentation of the storefront views.

pub mod render;
