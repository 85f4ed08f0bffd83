//! URL handling module for sitemirror
//!
//! This module provides seed cleaning, candidate link resolution, and the
//! domain scope predicate that confines a crawl to the seed's domain.

mod normalize;
mod scope;

pub use normalize::{clean_seed_url, resolve_candidate};
pub use scope::Scope;
