use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use log::debug;
use snafu::ResultExt;

use crate::errors::{CacheSnafu, CustomResult};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// # on disk cache of api responses
/// responses are stored as `<dir>/<season>/<key>.json`. files are written to a temporary name
/// and renamed afterwards so concurrent requests never read a half written file.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// # enable the cache
    /// creates the cache directory when it does not exist yet
    ///
    /// ## Arguments
    /// * `dir` - the directory to store the responses in
    pub async fn enable<P: AsRef<Path>>(dir: P) -> CustomResult<ResponseCache> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .context(CacheSnafu { path: dir.display().to_string() })?;

        Ok(ResponseCache { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, season: i32, key: &str) -> PathBuf {
        self.dir.join(season.to_string()).join(format!("{key}.json"))
    }

    /// # read a cached response
    ///
    /// ## Arguments
    /// * `season` - the season the response belongs to
    /// * `key` - the name of the response
    /// * `max_age` - responses older than this are ignored, `None` never expires
    ///
    /// ## Returns
    /// * `Option<String>` - the cached body, `None` when missing or expired
    pub async fn get_data(&self, season: i32, key: &str, max_age: Option<Duration>) -> CustomResult<Option<String>> {
        let path = self.path_of(season, key);
        let path_str = path.display().to_string();

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).context(CacheSnafu { path: path_str }),
        };

        if let Some(max_age) = max_age {
            let modified = metadata.modified().context(CacheSnafu { path: path_str.clone() })?;
            let age = SystemTime::now().duration_since(modified).unwrap_or_default();
            if age > max_age {
                debug!(target: "cache:get_data", "{} expired ({}s old)", path_str, age.as_secs());
                return Ok(None);
            }
        }

        let body = tokio::fs::read_to_string(&path)
            .await
            .context(CacheSnafu { path: path_str })?;

        Ok(Some(body))
    }

    /// # store a response
    pub async fn set_data(&self, season: i32, key: &str, data: &str) -> CustomResult<()> {
        let path = self.path_of(season, key);
        let season_dir = self.dir.join(season.to_string());
        tokio::fs::create_dir_all(&season_dir)
            .await
            .context(CacheSnafu { path: season_dir.display().to_string() })?;

        let tmp = season_dir.join(format!(
            ".{key}.{}.{}.tmp",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        tokio::fs::write(&tmp, data)
            .await
            .context(CacheSnafu { path: tmp.display().to_string() })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .context(CacheSnafu { path: path.display().to_string() })?;

        debug!(target: "cache:set_data", "stored {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("f1_race_weekend_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn enable_creates_directory_and_is_idempotent() {
        let dir = scratch_dir("enable");
        ResponseCache::enable(&dir).await.unwrap();
        ResponseCache::enable(&dir).await.unwrap();
        assert!(dir.is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn stores_and_reads_back() {
        let dir = scratch_dir("roundtrip");
        let cache = ResponseCache::enable(&dir).await.unwrap();

        assert_eq!(cache.get_data(2025, "results-3", None).await.unwrap(), None);

        cache.set_data(2025, "results-3", "{\"a\":1}").await.unwrap();
        assert_eq!(
            cache.get_data(2025, "results-3", None).await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.join("2025").join("results-3.json").is_file());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn expired_entries_are_ignored() {
        let dir = scratch_dir("expired");
        let cache = ResponseCache::enable(&dir).await.unwrap();
        cache.set_data(2025, "schedule", "[]").await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get_data(2025, "schedule", Some(Duration::ZERO)).await.unwrap(), None);
        assert!(cache.get_data(2025, "schedule", Some(Duration::from_secs(3600))).await.unwrap().is_some());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
