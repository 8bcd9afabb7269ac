//! Background section content loads standing in for the portfolio's REST
//! data layer. Each load reports back over a channel; the section mounts when
//! its result arrives.

use std::time::Duration;

use folio_core::SectionId;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Result of an async section load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    Loaded { section: SectionId },
}

impl LoadResult {
    pub fn section(&self) -> &SectionId {
        match self {
            LoadResult::Loaded { section } => section,
        }
    }
}

/// Simulated latency of one section's fetch, staggered by position
pub fn load_latency(position: usize) -> Duration {
    Duration::from_millis(150 + 120 * position as u64)
}

/// Spawn a load that completes after `latency`
pub fn spawn_section_load(
    tx: UnboundedSender<LoadResult>,
    section: SectionId,
    latency: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(latency).await;
        tracing::debug!(section = %section, latency_ms = latency.as_millis() as u64, "Section data loaded");
        if tx.send(LoadResult::Loaded { section }).is_err() {
            tracing::debug!("Load receiver dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_loads_arrive_in_latency_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_section_load(tx.clone(), SectionId::from("articles"), load_latency(2));
        spawn_section_load(tx, SectionId::from("skills"), load_latency(0));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.section(), &SectionId::from("skills"));
        assert_eq!(second.section(), &SectionId::from("articles"));
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_latency_is_staggered() {
        assert!(load_latency(0) < load_latency(1));
        assert_eq!(load_latency(0), Duration::from_millis(150));
    }
}
