use super::ApiClient;
use crate::domain::SystemStats;
use eyre::Result;

impl ApiClient {
    pub async fn overview_stats(&self) -> Result<SystemStats> {
        self.get_one("/stats/overview").await
    }
}
