mod cancel;
pub mod heuristic;
mod search;

pub use cancel::CancelToken;
pub use heuristic::{Heuristic, KalahHeuristic};
pub use search::{Cancelled, Searcher};
