//! Integration flows between fedi-crypto, fedi-actor and fedi-tui.

pub mod support;

mod profile;
mod signing;
