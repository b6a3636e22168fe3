use crate::change::Change;
use crate::collections::OrderedMap;
use crate::diff::diff_snapshots;
use crate::merge::merge_changes;
use crate::request::{RecordSource, RequestGenerator, RequestSender, ResponseValidator};
use anisync_types::{Anime, ContainerError, PushError, RecordError, Result, Service, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A watch-list that can be mirrored from a primary list.
///
/// `Box<dyn AnimeList>` implements the trait too, so lists of different
/// concrete types can share one [`super::ListSyncManager`].
pub trait AnimeList {
    /// Service whose id space keys this list.
    fn service(&self) -> Service;

    fn add(&mut self, anime: Anime) -> Result<()>;

    fn edit(&mut self, anime: Anime) -> Result<()>;

    fn remove(&mut self, anime: &Anime) -> Result<()>;

    /// Whether the list holds the entry with this id on [`AnimeList::service`].
    fn contains(&self, id: u64) -> bool;

    fn all_records(&self) -> Vec<Anime>;
}

impl<L: AnimeList + ?Sized> AnimeList for Box<L> {
    fn service(&self) -> Service {
        (**self).service()
    }

    fn add(&mut self, anime: Anime) -> Result<()> {
        (**self).add(anime)
    }

    fn edit(&mut self, anime: Anime) -> Result<()> {
        (**self).edit(anime)
    }

    fn remove(&mut self, anime: &Anime) -> Result<()> {
        (**self).remove(anime)
    }

    fn contains(&self, id: u64) -> bool {
        (**self).contains(id)
    }

    fn all_records(&self) -> Vec<Anime> {
        (**self).all_records()
    }
}

/// A merged batch that reached the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushedBatch {
    pub changes: Vec<Change>,
    pub pushed_at: DateTime<Utc>,
}

/// Local copy of one service's list with a queue of unpushed changes.
///
/// Records are keyed by their id on the list's service and iterate in
/// ascending id order. Every local mutation appends to the pending queue in
/// the order it happened; nothing is deduplicated until [`TrackedList::push`]
/// merges the queue.
#[derive(Debug, Clone)]
pub struct TrackedList {
    service: Service,
    records: OrderedMap<Anime>,
    pending: Vec<Change>,
    archive: Vec<PushedBatch>,
}

impl TrackedList {
    pub fn new(service: Service) -> Self {
        Self {
            service,
            records: OrderedMap::new(),
            pending: Vec::new(),
            archive: Vec::new(),
        }
    }

    /// List seeded with a remote snapshot and nothing pending.
    pub fn from_snapshot(service: Service, snapshot: Snapshot) -> Self {
        let mut list = Self::new(service);
        list.replace_snapshot(snapshot);
        list
    }

    pub fn get(&self, id: u64) -> Result<&Anime> {
        Ok(self.records.get(id)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unpushed changes, oldest first.
    pub fn pending(&self) -> &[Change] {
        &self.pending
    }

    /// Pushed batches, oldest first.
    pub fn archive(&self) -> &[PushedBatch] {
        &self.archive
    }

    pub fn snapshot(&self) -> Snapshot {
        self.records.iter().map(|(id, anime)| (id, anime.clone())).collect()
    }

    /// Load the remote state as the new baseline, dropping pending changes.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.records = snapshot.into_iter().collect();
        self.pending.clear();
    }

    /// Replace the records with `snapshot` and queue the changes between the
    /// current records and it. Returns how many changes were queued.
    pub fn stage_snapshot(&mut self, snapshot: Snapshot) -> usize {
        let changes = diff_snapshots(&self.snapshot(), &snapshot);
        let staged = changes.len();
        self.records = snapshot.into_iter().collect();
        self.pending.extend(changes);
        staged
    }

    /// Fetch the remote list from `source` and make it the baseline.
    ///
    /// A source keyed by another service is refused before anything is fetched.
    pub async fn pull<S>(&mut self, source: &S) -> std::result::Result<usize, S::Error>
    where
        S: RecordSource + ?Sized,
        S::Error: From<RecordError>,
    {
        if source.service() != self.service {
            return Err(RecordError::ServiceMismatch {
                expected: self.service,
                found: source.service(),
            }
            .into());
        }
        let snapshot = source.fetch().await?;
        let count = snapshot.len();
        self.replace_snapshot(snapshot);
        tracing::info!(service = %self.service, count, "pulled remote list");
        Ok(count)
    }

    /// Revert the newest pending change locally.
    ///
    /// Fails with [`PushError::EmptyUndo`] and changes nothing when the queue is empty.
    pub fn undo(&mut self) -> Result<Change> {
        let change = self.pending.pop().ok_or(PushError::EmptyUndo)?;
        self.apply_local(&change.inverse())?;
        Ok(change)
    }

    /// Merge the pending queue and push it as one batch.
    ///
    /// On success the merged batch is archived and the queue emptied. On
    /// failure nothing changes, so calling `push` again retries the same
    /// batch. Returns how many requests were sent.
    pub async fn push<S>(
        &mut self,
        generator: &RequestGenerator,
        sender: &S,
        timeout: Duration,
        validator: ResponseValidator,
    ) -> Result<usize>
    where
        S: RequestSender + ?Sized,
    {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let merged = merge_changes(&self.pending, self.service)?;
        let requests = generator.batch(&merged, self.service, false)?;
        let sent = requests.len();

        if sent > 0 {
            if let Err(e) = sender.send_many(requests, timeout, validator).await {
                tracing::warn!(
                    service = %self.service,
                    pending = self.pending.len(),
                    "push failed, changes stay queued: {}",
                    e
                );
                return Err(e.into());
            }
            self.archive.push(PushedBatch {
                changes: merged,
                pushed_at: Utc::now(),
            });
        }

        self.pending.clear();
        tracing::info!(service = %self.service, sent, "pushed pending changes");
        Ok(sent)
    }

    /// Undo the newest pushed batch on the remote service, then locally.
    ///
    /// Fails with [`PushError::EmptyUndo`] when nothing has been pushed. The
    /// archive and records are untouched unless the whole undo batch succeeds.
    pub async fn revert_last_push<S>(
        &mut self,
        generator: &RequestGenerator,
        sender: &S,
        timeout: Duration,
        validator: ResponseValidator,
    ) -> Result<usize>
    where
        S: RequestSender + ?Sized,
    {
        let batch = self.archive.last().ok_or(PushError::EmptyUndo)?;
        let requests = generator.batch(&batch.changes, self.service, true)?;
        let sent = requests.len();
        sender.send_many(requests, timeout, validator).await?;

        if let Some(batch) = self.archive.pop() {
            for change in batch.changes.iter().rev() {
                self.apply_local(&change.inverse())?;
            }
        }
        tracing::info!(service = %self.service, sent, "reverted last push");
        Ok(sent)
    }

    fn apply_local(&mut self, change: &Change) -> Result<()> {
        let id = change.id_on(self.service)?;
        match change {
            Change::Add { anime } | Change::Edit { new: anime, .. } => {
                self.records.add(id, anime.clone());
            }
            Change::Delete { .. } => {
                self.records.remove(id);
            }
        }
        Ok(())
    }
}

impl AnimeList for TrackedList {
    fn service(&self) -> Service {
        self.service
    }

    /// Adding an id the list already holds is recorded as an edit.
    fn add(&mut self, anime: Anime) -> Result<()> {
        let id = anime.id().require(self.service)?;
        let change = match self.records.add(id, anime.clone()) {
            Some(old) => Change::Edit { old, new: anime },
            None => Change::Add { anime },
        };
        self.pending.push(change);
        Ok(())
    }

    fn edit(&mut self, anime: Anime) -> Result<()> {
        let id = anime.id().require(self.service)?;
        let old = self.records.get(id)?.clone();
        self.records.add(id, anime.clone());
        self.pending.push(Change::Edit { old, new: anime });
        Ok(())
    }

    fn remove(&mut self, anime: &Anime) -> Result<()> {
        let id = anime.id().require(self.service)?;
        let stored = self.records.remove(id).ok_or(ContainerError::KeyNotFound { key: id })?;
        self.pending.push(Change::Delete { anime: stored });
        Ok(())
    }

    fn contains(&self, id: u64) -> bool {
        self.records.contains(id)
    }

    fn all_records(&self) -> Vec<Anime> {
        self.records.values().cloned().collect()
    }
}
