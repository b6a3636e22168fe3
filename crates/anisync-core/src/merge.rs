//! Collapsing a chronological change queue into its net effect.
//!
//! Changes are sorted into three buckets keyed by the record's id on the
//! target service: pending creates, pending edits and pending deletes. Each
//! bucket is an [`LruMap`], so the output order depends only on the order in
//! which ids were last written, never on hash iteration order.
//!
//! Per id, in queue order:
//!
//! - `Add r` sets the pending create to `r` and cancels a pending delete.
//! - `Edit old -> new` folds into a pending create when there is one.
//!   Otherwise it becomes the pending edit, keeping the `old` side of an
//!   earlier pending edit so the net edit still covers every field touched.
//!   A pending delete is superseded.
//! - `Delete r` discards a pending create or edit and sends nothing. Only
//!   when neither exists is a remote delete queued.
//!
//! Output: creates, then edits, then deletes, each bucket from least- to
//! most-recently written. Every net edit is kept, even one whose tracked
//! fields ended up equal, so a diff is always a fixed point of the merge.

use crate::change::Change;
use crate::collections::LruMap;
use anisync_types::{Anime, RecordError, Service};

/// Merges change queues addressed to one service's id space.
#[derive(Debug)]
pub struct MergeEngine {
    service: Service,
    pending_add: LruMap<Anime>,
    pending_edit: LruMap<(Anime, Anime)>,
    pending_delete: LruMap<Anime>,
}

impl MergeEngine {
    pub fn new(service: Service) -> Self {
        Self {
            service,
            pending_add: LruMap::new(),
            pending_edit: LruMap::new(),
            pending_delete: LruMap::new(),
        }
    }

    /// Fold one change into the buckets.
    ///
    /// A second edit of an id already pending an edit overwrites the `new`
    /// side only. The `old` side stays the one from the first edit, so the
    /// net edit (and its undo) still covers every field changed in between.
    pub fn push(&mut self, change: &Change) -> Result<(), RecordError> {
        let id = change.id_on(self.service)?;
        match change {
            Change::Add { anime } => {
                self.pending_add.add(id, anime.clone());
                self.pending_delete.remove(id);
            }
            Change::Edit { old, new } => {
                if self.pending_add.contains(id) {
                    self.pending_add.add(id, new.clone());
                } else {
                    let first_old = match self.pending_edit.get(id) {
                        Ok((earlier_old, _)) => earlier_old.clone(),
                        Err(_) => old.clone(),
                    };
                    self.pending_edit.add(id, (first_old, new.clone()));
                }
                self.pending_delete.remove(id);
            }
            Change::Delete { anime } => {
                if self.pending_add.contains(id) || self.pending_edit.contains(id) {
                    self.pending_add.remove(id);
                    self.pending_edit.remove(id);
                } else {
                    self.pending_delete.add(id, anime.clone());
                }
            }
        }
        Ok(())
    }

    /// Consume the engine and emit the merged changes.
    pub fn finish(self) -> Vec<Change> {
        let adds = self.pending_add.into_iter().map(|(_, anime)| Change::Add { anime });
        let edits = self
            .pending_edit
            .into_iter()
            .map(|(_, (old, new))| Change::Edit { old, new });
        let deletes = self.pending_delete.into_iter().map(|(_, anime)| Change::Delete { anime });
        adds.chain(edits).chain(deletes).collect()
    }
}

/// Merge `changes` (oldest first) for `service` into the minimal equivalent
/// sequence.
pub fn merge_changes(changes: &[Change], service: Service) -> Result<Vec<Change>, RecordError> {
    let mut engine = MergeEngine::new(service);
    for change in changes {
        engine.push(change)?;
    }
    let merged = engine.finish();
    tracing::debug!(
        service = %service,
        input = changes.len(),
        output = merged.len(),
        "merged pending changes"
    );
    Ok(merged)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anisync_types::{AnimeId, Status};

    const HB: Service = Service::Hummingbird;

    fn hb(id: u64) -> Anime {
        Anime::new(AnimeId::on(HB, id), format!("anime {id}"))
    }

    fn watching(id: u64, episodes: u32) -> Anime {
        hb(id).with_status(Status::Watching).with_episodes_watched(episodes)
    }

    fn add(anime: Anime) -> Change {
        Change::Add { anime }
    }

    fn edit(old: Anime, new: Anime) -> Change {
        Change::Edit { old, new }
    }

    fn delete(anime: Anime) -> Change {
        Change::Delete { anime }
    }

    #[test]
    fn test_mixed_batch() {
        let changes = vec![
            add(watching(69, 11)),
            add(watching(420, 11)),
            edit(hb(420), hb(420).with_status(Status::Completed).with_episodes_watched(12)),
            edit(hb(71), watching(71, 1)),
            delete(hb(72)),
            delete(watching(69, 11)),
        ];

        let merged = merge_changes(&changes, HB).unwrap();
        assert_eq!(
            merged,
            vec![
                add(hb(420).with_status(Status::Completed).with_episodes_watched(12)),
                edit(hb(71), watching(71, 1)),
                delete(hb(72)),
            ]
        );
    }

    #[test]
    fn test_adds_keep_queue_order() {
        let changes = vec![add(hb(420)), add(hb(69)), add(hb(620))];
        assert_eq!(merge_changes(&changes, HB).unwrap(), changes);
    }

    #[test]
    fn test_add_then_delete_cancels() {
        let changes = vec![add(hb(9)), delete(hb(9))];
        assert!(merge_changes(&changes, HB).unwrap().is_empty());
    }

    #[test]
    fn test_add_then_edit_folds_forward() {
        let a = watching(9, 1);
        let b = watching(9, 2);
        let merged = merge_changes(&[add(a.clone()), edit(a, b.clone())], HB).unwrap();
        assert_eq!(merged, vec![add(b)]);
    }

    #[test]
    fn test_edit_then_delete_sends_nothing() {
        let changes = vec![edit(watching(3, 1), watching(3, 2)), delete(watching(3, 2))];
        assert!(merge_changes(&changes, HB).unwrap().is_empty());
    }

    #[test]
    fn test_delete_then_readd_cancels_delete() {
        let changes = vec![delete(watching(5, 1)), add(watching(5, 4))];
        assert_eq!(merge_changes(&changes, HB).unwrap(), vec![add(watching(5, 4))]);
    }

    #[test]
    fn test_edit_supersedes_delete() {
        let changes = vec![delete(watching(5, 1)), edit(watching(5, 1), watching(5, 2))];
        assert_eq!(
            merge_changes(&changes, HB).unwrap(),
            vec![edit(watching(5, 1), watching(5, 2))]
        );
    }

    #[test]
    fn test_consecutive_edits_keep_first_old() {
        let a = watching(8, 1);
        let b = watching(8, 2).with_status(Status::OnHold);
        let c = watching(8, 2).with_status(Status::Completed);
        let merged = merge_changes(&[edit(a.clone(), b.clone()), edit(b, c.clone())], HB).unwrap();
        assert_eq!(merged, vec![edit(a, c)]);
    }

    #[test]
    fn test_edit_back_to_start_is_kept() {
        let a = watching(8, 1);
        let b = watching(8, 2);
        let merged = merge_changes(&[edit(a.clone(), b.clone()), edit(b, a.clone())], HB).unwrap();
        assert_eq!(merged, vec![edit(a.clone(), a)]);
    }

    #[test]
    fn test_untracked_edits_survive_merge() {
        let renamed = edit(watching(1, 3), watching(1, 3).with_title("renamed"));
        let learned_mal_id = edit(
            watching(2, 0),
            watching(2, 0).with_id(AnimeId::on(HB, 2).with(Service::MyAnimeList, 20)),
        );
        let changes = vec![renamed, learned_mal_id];
        assert_eq!(merge_changes(&changes, HB).unwrap(), changes);
    }

    #[test]
    fn test_buckets_follow_last_touch() {
        let changes = vec![
            edit(hb(1), watching(1, 1)),
            add(hb(2)),
            edit(hb(3), watching(3, 1)),
            add(hb(4)),
            // touching 1 again moves it behind 3
            edit(watching(1, 1), watching(1, 2)),
            // touching 2 again moves it behind 4
            add(watching(2, 5)),
        ];

        let ids: Vec<u64> = merge_changes(&changes, HB)
            .unwrap()
            .iter()
            .map(|change| change.id_on(HB).unwrap())
            .collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let changes = vec![
            add(watching(1, 1)),
            edit(hb(2), watching(2, 3)),
            delete(hb(3)),
            edit(watching(1, 1), watching(1, 4)),
            add(hb(5)),
            delete(hb(5)),
        ];
        let once = merge_changes(&changes, HB).unwrap();
        let twice = merge_changes(&once, HB).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_service_id_rejected() {
        let changes = vec![add(hb(1))];
        assert_eq!(
            merge_changes(&changes, Service::MyAnimeList).unwrap_err(),
            RecordError::MissingServiceId { service: Service::MyAnimeList }
        );
    }
}
