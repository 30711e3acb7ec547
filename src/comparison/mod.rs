// Simulation-versus-measurement comparison
//
// Pipeline:
// - align simulation and test samples by parameter name (crate::align)
// - compute absolute/relative error and a tolerance verdict per parameter
// - aggregate a session summary over computable relative errors
// - derive recommendations from the summary
//
// A zero simulation value leaves the relative error undefined; those records
// are counted separately and never contribute to averages or extrema.

mod comparator;
mod config;
mod recommendation;

pub use comparator::{compare, ComparisonAnalysis, ComparisonRecord, ComparisonSummary};
pub use config::ComparisonConfig;
pub use recommendation::{recommend, Recommendation};
