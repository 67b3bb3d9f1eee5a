// ── Resource stores ──
//
// One store per entity collection. A store owns the cached snapshot and is
// the only writer to it; controllers and front ends read and subscribe.

mod collection;
mod resource;

pub use resource::{Reconciliation, ResourceStore};
