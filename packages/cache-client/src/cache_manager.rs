use fred::prelude::*;
use log::info;
use once_cell::sync::OnceCell;

/// Best-effort Redis cache. Callers treat `global()` returning `None` (or any
/// command error) as a cache miss and fall back to the database.
#[derive(Clone)]
pub struct CacheManager {
    client: RedisClient,
}

static INSTANCE: OnceCell<CacheManager> = OnceCell::new();

impl CacheManager {
    pub fn new(redis_url: &str) -> Result<Self, RedisError> {
        let config = RedisConfig::from_url(redis_url)?;
        let client = RedisClient::new(config, None, None, None);

        Ok(Self { client })
    }

    pub fn init_global(redis_url: &str) -> Result<&'static CacheManager, RedisError> {
        INSTANCE.get_or_try_init(|| Self::new(redis_url))
    }

    pub fn global() -> Option<&'static CacheManager> {
        INSTANCE.get()
    }

    pub async fn connect(&self) -> Result<(), RedisError> {
        self.client.connect();
        self.client.wait_for_connect().await?;
        info!("Connected to Redis");
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, RedisError> {
        let value: Option<String> = self.client.get(key).await?;
        Ok(value)
    }

    pub async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        seconds: i64,
    ) -> Result<(), RedisError> {
        self.client
            .set::<(), _, _>(key, value, Some(Expiration::EX(seconds)), None, false)
            .await
    }

    pub async fn incr(&self, key: &str) -> Result<i64, RedisError> {
        let value: i64 = self.client.incr(key).await?;
        Ok(value)
    }
}
