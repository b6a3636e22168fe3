//! Snapshot diffing.

use crate::change::Change;
use anisync_types::{Anime, Service, Snapshot};

/// Changes that turn `old` into `new`.
///
/// Ids only in `old` become deletes, ids only in `new` become adds, and ids
/// in both become edits when the records differ in any field. Deletes and
/// edits come first in ascending id order, then adds in ascending id order.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let mut changes = Vec::new();

    for (id, old_anime) in old {
        match new.get(id) {
            None => changes.push(Change::Delete { anime: old_anime.clone() }),
            Some(new_anime) if new_anime != old_anime => changes
                .push(Change::Edit { old: old_anime.clone(), new: new_anime.clone() }),
            Some(_) => {},
        }
    }

    changes.extend(
        new.iter()
            .filter(|(id, _)| !old.contains_key(id))
            .map(|(_, anime)| Change::Add { anime: anime.clone() }),
    );

    tracing::debug!(old = old.len(), new = new.len(), changes = changes.len(), "diffed snapshots");
    changes
}

/// Apply `changes` to `snapshot`, keyed by the same ids the snapshot uses.
///
/// `key` maps a record to its snapshot key; records it cannot key are skipped.
pub fn apply_changes<F>(snapshot: &mut Snapshot, changes: &[Change], key: F)
where
    F: Fn(&Anime) -> Option<u64>,
{
    for change in changes {
        let Some(id) = key(change.anime()) else {
            continue;
        };
        match change {
            Change::Add { anime } | Change::Edit { new: anime, .. } => {
                snapshot.insert(id, anime.clone());
            }
            Change::Delete { .. } => {
                snapshot.remove(&id);
            }
        }
    }
}

/// Re-key `snapshot` by the ids its records carry on `service`.
///
/// Records unknown on `service` cannot be addressed there and are dropped.
pub fn key_by(snapshot: Snapshot, service: Service) -> Snapshot {
    let total = snapshot.len();
    let keyed: Snapshot = snapshot
        .into_values()
        .filter_map(|anime| anime.id().get(service).map(|id| (id, anime)))
        .collect();
    if keyed.len() < total {
        tracing::warn!(%service, dropped = total - keyed.len(), "records without an id on service");
    }
    keyed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::merge::merge_changes;
    use anisync_types::{AnimeId, Status};

    const HB: Service = Service::Hummingbird;

    fn entry(id: u64, episodes: u32, status: Status, rewatched: u32, rewatching: bool) -> Anime {
        Anime::new(AnimeId::on(HB, id), format!("anime {id}"))
            .with_episodes_watched(episodes)
            .with_status(status)
            .with_rewatched_times(rewatched)
            .with_rewatching(rewatching)
    }

    fn snapshot(entries: impl IntoIterator<Item = Anime>) -> Snapshot {
        entries.into_iter().map(|anime| (anime.id().hummingbird, anime)).collect()
    }

    fn hb_key(anime: &Anime) -> Option<u64> {
        anime.id().get(HB)
    }

    #[test]
    fn test_add_edit_delete() {
        let old = snapshot([
            entry(10, 11, Status::Watching, 0, false),
            entry(2, 5, Status::Watching, 1, true),
        ]);
        let new = snapshot([
            entry(1, 1, Status::Watching, 0, false),
            entry(2, 6, Status::Watching, 1, true),
        ]);

        let changes = diff_snapshots(&old, &new);
        assert_eq!(
            changes,
            vec![
                Change::Edit {
                    old: entry(2, 5, Status::Watching, 1, true),
                    new: entry(2, 6, Status::Watching, 1, true),
                },
                Change::Delete { anime: entry(10, 11, Status::Watching, 0, false) },
                Change::Add { anime: entry(1, 1, Status::Watching, 0, false) },
            ]
        );

        // the three-change set is already minimal
        let mut merged = merge_changes(&changes, HB).unwrap();
        let mut original = changes.clone();
        let sort_key = |c: &Change| c.id_on(HB).unwrap();
        merged.sort_by_key(sort_key);
        original.sort_by_key(sort_key);
        assert_eq!(merged, original);
    }

    #[test]
    fn test_identical_snapshots() {
        let list = snapshot([
            entry(0, 11, Status::Watching, 0, true),
            entry(1, 12, Status::Completed, 1, false),
        ]);
        assert!(diff_snapshots(&list, &list).is_empty());
    }

    #[test]
    fn test_any_field_difference_is_an_edit() {
        let base = entry(4, 3, Status::OnHold, 0, false);
        let variants = [
            base.clone().with_episodes_watched(4),
            base.clone().with_status(Status::Dropped),
            base.clone().with_rewatched_times(1),
            base.clone().with_rewatching(true),
            base.clone().with_title("renamed"),
        ];
        for variant in variants {
            let changes = diff_snapshots(&snapshot([base.clone()]), &snapshot([variant]));
            assert_eq!(changes.len(), 1);
            assert!(matches!(changes[0], Change::Edit { .. }));
        }
    }

    #[test]
    fn test_applying_diff_reproduces_new() {
        let old = snapshot([
            entry(1, 1, Status::Watching, 0, false),
            entry(2, 2, Status::Watching, 0, false),
            entry(3, 3, Status::Completed, 0, false),
        ]);
        let new = snapshot([
            entry(2, 2, Status::Dropped, 0, false),
            entry(3, 3, Status::Completed, 0, false),
            entry(4, 0, Status::PlanToWatch, 0, false),
        ]);

        let mut replayed = old.clone();
        apply_changes(&mut replayed, &diff_snapshots(&old, &new), hb_key);
        assert_eq!(replayed, new);
    }

    #[test]
    fn test_empty_sides() {
        let list = snapshot([entry(1, 1, Status::Watching, 0, false)]);
        let empty = Snapshot::new();

        assert!(matches!(diff_snapshots(&empty, &list).as_slice(), [Change::Add { .. }]));
        assert!(matches!(diff_snapshots(&list, &empty).as_slice(), [Change::Delete { .. }]));
    }

    #[test]
    fn test_key_by_other_service() {
        let both = entry(1, 1, Status::Watching, 0, false)
            .with_id(AnimeId::on(HB, 1).with(Service::MyAnimeList, 100));
        let hb_only = entry(2, 1, Status::Watching, 0, false);

        let keyed = key_by(snapshot([both.clone(), hb_only]), Service::MyAnimeList);
        assert_eq!(keyed.into_iter().collect::<Vec<_>>(), vec![(100, both)]);
    }
}
