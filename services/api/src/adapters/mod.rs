pub mod latency;
pub mod static_dataset;

pub use latency::SimulatedLatency;
pub use static_dataset::StaticDatasetAdapter;
