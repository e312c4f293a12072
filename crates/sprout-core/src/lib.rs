pub mod color;
pub mod consts;
pub mod detection;
pub mod diagnostics;
pub mod error;
pub mod filters;
pub mod frame;
pub mod growth;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod segmentation;
