use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

// Single static counter for all figures
static NEXT_FIGURE_ID: AtomicUsize = AtomicUsize::new(1);

/// Process-unique identity of a figure, stable across moves and restyles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FigureId(usize);

impl std::fmt::Display for FigureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub fn generate_id() -> FigureId {
    FigureId(NEXT_FIGURE_ID.fetch_add(1, Ordering::SeqCst))
}
