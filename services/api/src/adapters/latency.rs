//! services/api/src/adapters/latency.rs
//!
//! Wraps any `FacilityDataSource` and delays every call, standing in for the
//! round trip a real facility API would add.

use async_trait::async_trait;
use healthtrack_core::domain::FacilityRecord;
use healthtrack_core::ports::{FacilityDataSource, PortResult};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct SimulatedLatency<S> {
    inner: S,
    delay: Duration,
}

impl<S> SimulatedLatency<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<S: FacilityDataSource> FacilityDataSource for SimulatedLatency<S> {
    async fn list_facilities(&self) -> PortResult<Vec<FacilityRecord>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_facilities().await
    }

    async fn get_facility(&self, id: &str) -> PortResult<FacilityRecord> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_facility(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticDatasetAdapter;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn delays_then_delegates() {
        let inner =
            StaticDatasetAdapter::new(vec![FacilityRecord::new("h1", "One", "Here", "108")]);
        let source = SimulatedLatency::new(inner, Duration::from_millis(300));

        let started = Instant::now();
        let facilities = source.list_facilities().await.unwrap();

        assert_eq!(facilities.len(), 1);
        assert!(started.elapsed() >= Duration::from_millis(300));
        assert_eq!(source.get_facility("h1").await.unwrap().name, "One");
    }
}
