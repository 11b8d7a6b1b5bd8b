//! In-memory fakes shared by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::{ArchiveStore, ExistenceChecker, RenderedContentIndex};

/// A probe issued against a [`StaticChecker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Probe {
    Db(String),
    S3(String),
}

enum Answer {
    Always(bool),
    Keys(HashSet<String>),
}

impl Answer {
    fn check(&self, key: &str) -> bool {
        match self {
            Answer::Always(value) => *value,
            Answer::Keys(keys) => keys.contains(key),
        }
    }
}

/// Existence checker with fixed answers that records every probe.
pub(crate) struct StaticChecker {
    db: Answer,
    s3: Answer,
    probes: Mutex<Vec<Probe>>,
}

impl StaticChecker {
    /// Both stores answer `false` for every key.
    pub(crate) fn deny_all() -> Self {
        Self::constant(false, false)
    }

    /// Each store answers the same for every key.
    pub(crate) fn constant(db: bool, s3: bool) -> Self {
        Self {
            db: Answer::Always(db),
            s3: Answer::Always(s3),
            probes: Mutex::new(Vec::new()),
        }
    }

    /// Cache answers `true` only for these keys.
    pub(crate) fn with_db_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.db = Answer::Keys(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Archive answers `true` only for these (cache) keys.
    pub(crate) fn with_s3_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.s3 = Answer::Keys(keys.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn probes(&self) -> Vec<Probe> {
        self.probes.lock().unwrap().clone()
    }

    pub(crate) fn db_probes(&self) -> Vec<String> {
        self.probes()
            .into_iter()
            .filter_map(|p| match p {
                Probe::Db(key) => Some(key),
                Probe::S3(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ExistenceChecker for StaticChecker {
    async fn confirm_db_path_exists(&self, key: &str) -> bool {
        self.probes.lock().unwrap().push(Probe::Db(key.to_string()));
        self.db.check(key)
    }

    async fn confirm_s3_path_exists(&self, key: &str) -> bool {
        self.probes.lock().unwrap().push(Probe::S3(key.to_string()));
        self.s3.check(key)
    }
}

/// Archive store holding a fixed key set and recording probed keys.
pub(crate) struct RecordingArchive {
    existing: HashSet<String>,
    failure: Option<String>,
    probed: Mutex<Vec<String>>,
}

impl RecordingArchive {
    pub(crate) fn new<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            existing: existing.into_iter().map(Into::into).collect(),
            failure: None,
            probed: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Every probe fails with an S3 error carrying `message`.
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            existing: HashSet::new(),
            failure: Some(message.to_string()),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveStore for RecordingArchive {
    async fn object_exists(&self, key: &str) -> Result<bool> {
        self.probed.lock().unwrap().push(key.to_string());
        match &self.failure {
            Some(message) => Err(AppError::s3(message)),
            None => Ok(self.existing.contains(key)),
        }
    }

    fn location(&self, key: &str) -> String {
        format!("memory://{key}")
    }
}

/// Cache index whose every lookup fails.
pub(crate) struct FailingIndex;

#[async_trait]
impl RenderedContentIndex for FailingIndex {
    async fn contains_key(&self, _cache_key: &str) -> Result<bool> {
        Err(AppError::Io(std::io::Error::other("database unavailable")))
    }
}
