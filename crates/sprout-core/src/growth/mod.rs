pub mod chart;
pub mod scorer;
pub mod suggestion;
pub mod weights;

pub use chart::{chart_data, ChartPoint};
pub use scorer::{percentage_delta, GrowthResult, GrowthScorer};
pub use suggestion::Suggestion;
pub use weights::MetricWeights;
