use async_trait::async_trait;
use lodge_core::cache::PageCache;
use redis::RedisResult;
use tracing::{info, warn};

/// Channel the rendering tier subscribes to for stale page paths.
pub const INVALIDATION_CHANNEL: &str = "pages:invalidate";

#[derive(Clone)]
pub struct RedisPageCache {
    client: redis::Client,
}

impl RedisPageCache {
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    pub fn page_key(path: &str) -> String {
        format!("page:{}", path)
    }

    async fn evict(&self, path: &str) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let _: () = redis::pipe()
            .del(Self::page_key(path))
            .ignore()
            .publish(INVALIDATION_CHANNEL, path)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn invalidate(&self, path: &str) {
        match self.evict(path).await {
            Ok(()) => info!("Page invalidated: {}", path),
            Err(e) => warn!("Failed to invalidate page {}: {}", path, e),
        }
    }
}
