use anyhow::Result;
use async_trait::async_trait;
use redis::{AsyncCommands, Client};

use crate::infra::kv::KeyValueStore;

/// Key-value persistence backed by a local redis instance.
#[derive(Clone)]
pub struct RedisKv {
    client: Client,
}

impl RedisKv {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let kv = Self {
            client: Client::open(redis_url)?,
        };
        kv.ping().await?;
        Ok(kv)
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for RedisKv {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value = conn.get::<_, Option<String>>(key).await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
