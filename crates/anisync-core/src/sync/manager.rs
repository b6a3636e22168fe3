use super::list::AnimeList;
use anisync_types::{Anime, Result, Service};

/// Counts from one [`ListSyncManager::sync`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub edited: usize,
}

/// Applies every mutation to a primary list and then to each replica.
///
/// There is no transaction across lists: the first failing list stops the
/// loop, and lists already mutated keep their change.
pub struct ListSyncManager<L: AnimeList> {
    primary: L,
    replicas: Vec<L>,
}

impl<L: AnimeList> ListSyncManager<L> {
    pub fn new(primary: L) -> Self {
        Self {
            primary,
            replicas: Vec::new(),
        }
    }

    pub fn with_replica(mut self, replica: L) -> Self {
        self.add_replica(replica);
        self
    }

    pub fn add_replica(&mut self, replica: L) {
        self.replicas.push(replica);
    }

    pub fn primary(&self) -> &L {
        &self.primary
    }

    pub fn replicas(&self) -> &[L] {
        &self.replicas
    }

    pub fn replica(&self, service: Service) -> Option<&L> {
        self.replicas.iter().find(|replica| replica.service() == service)
    }

    pub fn into_parts(self) -> (L, Vec<L>) {
        (self.primary, self.replicas)
    }

    pub fn add(&mut self, anime: &Anime) -> Result<()> {
        self.primary.add(anime.clone())?;
        for replica in &mut self.replicas {
            replica.add(anime.clone())?;
        }
        Ok(())
    }

    pub fn edit(&mut self, anime: &Anime) -> Result<()> {
        self.primary.edit(anime.clone())?;
        for replica in &mut self.replicas {
            replica.edit(anime.clone())?;
        }
        Ok(())
    }

    pub fn remove(&mut self, anime: &Anime) -> Result<()> {
        self.primary.remove(anime)?;
        for replica in &mut self.replicas {
            replica.remove(anime)?;
        }
        Ok(())
    }

    /// Bring every replica up to the primary's current records.
    ///
    /// Each primary record is edited into replicas that already hold it and
    /// added to the others. Records missing from the primary are never
    /// removed from replicas; this pass only adds and edits.
    pub fn sync(&mut self) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        for anime in self.primary.all_records() {
            for replica in &mut self.replicas {
                let id = anime.id().require(replica.service())?;
                if replica.contains(id) {
                    replica.edit(anime.clone())?;
                    report.edited += 1;
                } else {
                    replica.add(anime.clone())?;
                    report.added += 1;
                }
            }
        }
        tracing::info!(
            primary = %self.primary.service(),
            replicas = self.replicas.len(),
            added = report.added,
            edited = report.edited,
            "synced replicas"
        );
        Ok(report)
    }
}
