// In-memory telemetry store
use crate::application::telemetry_repository::TelemetryRepository;
use crate::application::window::truncate_to_hour;
use crate::domain::telemetry::{HourlySpeed, PositionSample, Train};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    trains: HashMap<String, Train>,
    /// Insertion ordered
    positions: Vec<PositionSample>,
    schedules: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

/// Seed file layout
#[derive(Debug, Deserialize, Default)]
pub struct SeedData {
    #[serde(default)]
    pub trains: Vec<Train>,
    #[serde(default)]
    pub positions: Vec<PositionSample>,
    #[serde(default)]
    pub schedules: u64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Result<Self> {
        if let Some(bad) = seed.positions.iter().find(|p| is_invalid_speed(p.speed)) {
            anyhow::bail!(
                "Position sample for train {} at {} has invalid speed {}",
                bad.train_id,
                bad.timestamp,
                bad.speed
            );
        }

        let trains = seed
            .trains
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();

        Ok(Self {
            store: RwLock::new(Store {
                trains,
                positions: seed.positions,
                schedules: seed.schedules,
            }),
        })
    }

    pub fn load_seed_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
        Self::from_seed(seed)
    }

    pub async fn insert_train(&self, train: Train) {
        self.store.write().await.trains.insert(train.id.clone(), train);
    }

    pub async fn insert_sample(&self, sample: PositionSample) -> Result<()> {
        if is_invalid_speed(sample.speed) {
            anyhow::bail!("Speed must be non-negative, got {}", sample.speed);
        }
        self.store.write().await.positions.push(sample);
        Ok(())
    }

    pub async fn set_schedule_count(&self, schedules: u64) {
        self.store.write().await.schedules = schedules;
    }
}

fn is_invalid_speed(speed: f64) -> bool {
    speed.is_nan() || speed < 0.0
}

#[async_trait]
impl TelemetryRepository for InMemoryRepository {
    async fn count_samples(&self) -> Result<u64> {
        Ok(self.store.read().await.positions.len() as u64)
    }

    async fn count_schedules(&self) -> Result<u64> {
        Ok(self.store.read().await.schedules)
    }

    async fn avg_speed_by_hour(&self, start: DateTime<Utc>) -> Result<HashMap<DateTime<Utc>, HourlySpeed>> {
        let store = self.store.read().await;

        let mut sums: HashMap<DateTime<Utc>, (f64, u64)> = HashMap::new();
        for p in store.positions.iter().filter(|p| p.timestamp >= start) {
            let entry = sums.entry(truncate_to_hour(p.timestamp)).or_default();
            entry.0 += p.speed;
            entry.1 += 1;
        }

        Ok(sums
            .into_iter()
            .map(|(hour, (total, count))| (hour, HourlySpeed::new(total / count as f64, count)))
            .collect())
    }

    async fn count_by_class(&self, start: DateTime<Utc>) -> Result<Vec<(Option<String>, u64)>> {
        let store = self.store.read().await;

        let mut counts: Vec<(Option<String>, u64)> = Vec::new();
        for p in store.positions.iter().filter(|p| p.timestamp >= start) {
            let class = store
                .trains
                .get(&p.train_id)
                .and_then(|t| t.class_type.clone());

            match counts.iter_mut().find(|(c, _)| *c == class) {
                Some((_, n)) => *n += 1,
                None => counts.push((class, 1)),
            }
        }

        Ok(counts)
    }

    async fn top_sections_by_activity(&self, start: DateTime<Utc>, limit: usize) -> Result<Vec<String>> {
        let store = self.store.read().await;

        let mut counts: Vec<(&str, u64)> = Vec::new();
        for p in store.positions.iter().filter(|p| p.timestamp >= start) {
            match counts.iter_mut().find(|(s, _)| *s == p.section_id) {
                Some((_, n)) => *n += 1,
                None => counts.push((p.section_id.as_str(), 1)),
            }
        }

        // Stable sort keeps first-seen order between equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(counts
            .into_iter()
            .take(limit)
            .map(|(section, _)| section.to_string())
            .collect())
    }

    async fn count_in_range(&self, section_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u64> {
        let store = self.store.read().await;
        Ok(store
            .positions
            .iter()
            .filter(|p| p.section_id == section_id && p.timestamp >= start && p.timestamp < end)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap()
    }

    async fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.insert_train(Train::new("T1", Some("Express"))).await;
        repo.insert_train(Train::new("T2", None)).await;

        for (train, section, time, speed) in [
            ("T1", "SEC-B", at(9, 10), 40.0),
            ("T1", "SEC-A", at(10, 5), 60.0),
            ("T2", "SEC-A", at(10, 40), 20.0),
            ("T3", "SEC-B", at(11, 15), 30.0),
            ("T1", "SEC-C", at(11, 45), 90.0),
        ] {
            repo.insert_sample(PositionSample::new(train, section, time, speed))
                .await
                .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_counts() {
        let repo = seeded().await;
        repo.set_schedule_count(7).await;

        assert_eq!(repo.count_samples().await.unwrap(), 5);
        assert_eq!(repo.count_schedules().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_avg_speed_grouped_by_hour() {
        let repo = seeded().await;
        let by_hour = repo.avg_speed_by_hour(at(10, 0)).await.unwrap();

        assert_eq!(by_hour.len(), 2);
        assert_eq!(by_hour[&at(10, 0)], HourlySpeed::new(40.0, 2));
        assert_eq!(by_hour[&at(11, 0)], HourlySpeed::new(60.0, 2));
    }

    #[tokio::test]
    async fn test_count_by_class_outer_joins_trains() {
        let repo = seeded().await;
        let counts = repo.count_by_class(at(10, 0)).await.unwrap();

        // T2 has no class and T3 is unregistered; both land under None
        assert_eq!(
            counts,
            vec![(Some("Express".to_string()), 2), (None, 2)]
        );
    }

    #[tokio::test]
    async fn test_top_sections_ties_keep_store_order() {
        let repo = seeded().await;

        let all = repo.top_sections_by_activity(at(0, 0), 10).await.unwrap();
        assert_eq!(all, vec!["SEC-B", "SEC-A", "SEC-C"]);

        let top = repo.top_sections_by_activity(at(10, 0), 2).await.unwrap();
        assert_eq!(top, vec!["SEC-A", "SEC-B"]);
    }

    #[tokio::test]
    async fn test_count_in_range_is_half_open() {
        let repo = seeded().await;

        assert_eq!(repo.count_in_range("SEC-A", at(10, 5), at(10, 40)).await.unwrap(), 1);
        assert_eq!(repo.count_in_range("SEC-A", at(10, 5), at(10, 41)).await.unwrap(), 2);
        assert_eq!(repo.count_in_range("SEC-Z", at(0, 0), at(23, 0)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_negative_speed_rejected() {
        let repo = InMemoryRepository::new();
        let result = repo
            .insert_sample(PositionSample::new("T1", "SEC-A", at(10, 0), -1.0))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_nan_speed_rejected() {
        let repo = InMemoryRepository::new();
        let result = repo
            .insert_sample(PositionSample::new("T1", "SEC-A", at(10, 0), f64::NAN))
            .await;
        assert!(result.is_err());
        assert_eq!(repo.count_samples().await.unwrap(), 0);

        let seed = SeedData {
            positions: vec![PositionSample::new("T1", "SEC-A", at(10, 0), f64::NAN)],
            ..SeedData::default()
        };
        assert!(InMemoryRepository::from_seed(seed).is_err());
    }

    #[test]
    fn test_seed_parsing() {
        let raw = r#"{
            "trains": [{"id": "T1", "class_type": "Freight"}, {"id": "T2"}],
            "positions": [
                {"train_id": "T1", "section_id": "SEC-A", "timestamp": "2024-03-10T10:05:00Z", "speed_kmph": 55.0}
            ],
            "schedules": 3
        }"#;
        let seed: SeedData = serde_json::from_str(raw).unwrap();

        assert_eq!(seed.trains[1].class_type, None);
        assert_eq!(seed.positions[0].speed, 55.0);
        assert_eq!(seed.positions[0].timestamp, at(10, 5));
        assert!(InMemoryRepository::from_seed(seed).is_ok());
    }
}
