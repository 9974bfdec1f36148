use serde::{Deserialize, Serialize};

/// Configuration for a worker thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// OS-level name given to the worker thread
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
    /// Maximum number of queued (not yet dequeued) tasks.
    ///  None means unbounded.
    #[serde(default)]
    pub max_queue_size: Option<usize>,
}

fn default_thread_name() -> String {
    "threadobject-worker".to_string()
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            max_queue_size: None,
        }
    }
}

impl WorkerConfig {
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn max_queue_size(mut self, size: usize) -> Self {
        self.max_queue_size = Some(size);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: WorkerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WorkerConfig::default());
        assert_eq!(config.max_queue_size, None);

        let config: WorkerConfig = serde_json::from_str(r#"{"max_queue_size": 8}"#).unwrap();
        assert_eq!(config.max_queue_size, Some(8));
        assert_eq!(config.thread_name, "threadobject-worker");
    }
}
