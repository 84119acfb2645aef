use async_trait::async_trait;

use crate::fetch::FetchError;
use crate::models::Cruise;

/// Anything that can answer `GET <endpoint>` with a cruise list.
#[async_trait]
pub trait CruiseSource: Send + Sync {
    /// One request per call. No retries.
    async fn fetch_cruises(&self, endpoint: &str) -> Result<Vec<Cruise>, FetchError>;
}
