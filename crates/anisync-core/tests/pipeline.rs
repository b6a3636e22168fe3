#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::unwrap_used, reason = "integration test, panics are the assertion mechanism")]

use anisync_core::{
    accept_success, diff_snapshots, merge_changes, AnimeList, Change, Endpoints,
    RequestGenerator, RequestSender, ResponseValidator, TrackedList,
};
use anisync_types::{
    Anime, AnimeId, Credential, PushError, PushRequest, PushResponse, Service, Snapshot, Status,
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

const HB: Service = Service::Hummingbird;

fn entry(id: u64, episodes: u32, status: Status) -> Anime {
    Anime::new(AnimeId::on(HB, id), format!("title {id}"))
        .with_episodes_watched(episodes)
        .with_status(status)
}

fn snapshot(entries: impl IntoIterator<Item = Anime>) -> Snapshot {
    entries.into_iter().map(|a| (a.id().hummingbird, a)).collect()
}

/// Answers every request with a canned status and runs the validator on it.
struct CannedSender {
    status: u16,
    seen: Mutex<Vec<PushRequest>>,
}

#[async_trait]
impl RequestSender for CannedSender {
    async fn send_many(
        &self,
        requests: Vec<PushRequest>,
        _timeout: Duration,
        validator: ResponseValidator,
    ) -> Result<(), PushError> {
        for request in requests {
            self.seen.lock().unwrap().push(request);
            validator(&PushResponse {
                status: self.status,
                body: String::new(),
            })
                .map_err(PushError::request_failed)?;
        }
        Ok(())
    }
}

#[test]
fn test_diff_output_is_a_merge_fixed_point() {
    let old = snapshot([
        entry(1, 3, Status::Watching),
        entry(2, 12, Status::Completed),
        entry(3, 0, Status::PlanToWatch),
    ]);
    let new = snapshot([
        entry(1, 4, Status::Watching),
        entry(3, 0, Status::PlanToWatch),
        entry(4, 1, Status::Watching),
    ]);

    let changes = diff_snapshots(&old, &new);
    assert_eq!(changes.iter().filter(|c| matches!(c, Change::Add { .. })).count(), 1);
    assert_eq!(changes.iter().filter(|c| matches!(c, Change::Edit { .. })).count(), 1);
    assert_eq!(changes.iter().filter(|c| matches!(c, Change::Delete { .. })).count(), 1);

    let merged = merge_changes(&changes, HB).unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(merge_changes(&merged, HB).unwrap(), merged);
    for change in &changes {
        assert!(merged.contains(change));
    }
}

#[test]
fn test_untracked_differences_are_a_merge_fixed_point() {
    let old = snapshot([entry(1, 3, Status::Watching), entry(2, 0, Status::Dropped)]);
    let renamed = entry(1, 3, Status::Watching).with_title("renamed");
    let new = snapshot([renamed, entry(3, 0, Status::PlanToWatch)]);

    let changes = diff_snapshots(&old, &new);
    assert_eq!(changes.len(), 3);
    let mut merged = merge_changes(&changes, HB).unwrap();
    merged.sort_by_key(|change| change.id_on(HB).unwrap());
    assert_eq!(merged, changes);

    let learned_id = entry(2, 0, Status::Dropped)
        .with_id(AnimeId::on(HB, 2).with(Service::MyAnimeList, 20));
    let changes = diff_snapshots(&old, &snapshot([entry(1, 3, Status::Watching), learned_id]));
    assert_eq!(changes.len(), 1);
    assert_eq!(merge_changes(&changes, HB).unwrap(), changes);
}

#[tokio::test]
async fn test_staged_snapshot_pushes_minimal_batch() {
    let mut list = TrackedList::from_snapshot(
        HB,
        snapshot([entry(1, 3, Status::Watching), entry(2, 12, Status::Completed)]),
    );
    list.stage_snapshot(snapshot([entry(1, 4, Status::Watching), entry(5, 0, Status::OnHold)]));

    let generator =
        RequestGenerator::new(Credential::token("t0k3n"), Endpoints::all_at("http://mock"));
    let sender = CannedSender {
        status: 200,
        seen: Mutex::new(Vec::new()),
    };
    let sent =
        list.push(&generator, &sender, Duration::from_secs(1), accept_success()).await.unwrap();

    assert_eq!(sent, 3);
    let seen = sender.seen.lock().unwrap();
    let urls: Vec<_> = seen.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "http://mock/api/v1/libraries/5",
            "http://mock/api/v1/libraries/1",
            "http://mock/api/v1/libraries/2/remove",
        ]
    );
    assert_eq!(seen[1].form.len(), 1);
    assert_eq!(seen[1].form.get("episodes_watched"), Some("4"));
    assert!(seen.iter().all(|r| r.credential == Credential::token("t0k3n")));
}

#[tokio::test]
async fn test_rejected_response_keeps_changes_queued() {
    let mut list = TrackedList::new(HB);
    list.add(entry(7, 1, Status::Watching)).unwrap();

    let generator = RequestGenerator::new(Credential::token("t"), Endpoints::default());
    let sender = CannedSender {
        status: 500,
        seen: Mutex::new(Vec::new()),
    };
    let err = list.push(&generator, &sender, Duration::from_secs(1), accept_success()).await;

    assert!(err.is_err());
    assert_eq!(list.pending().len(), 1);
    assert!(list.archive().is_empty());
}
