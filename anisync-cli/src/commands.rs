use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use anisync_client::{decode_library, ClientConfig, HttpSender, HummingbirdSource};
use anisync_core::{
    accept_success, diff_snapshots, key_by, load_config, merge_changes, AnimeList, Change,
    Endpoints, ListSyncManager, RecordSource, RequestGenerator, SyncConfig, TrackedList,
};
use anisync_types::{Anime, Service, Snapshot};

fn read_dump(path: &Path) -> Result<Snapshot> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    decode_library(&body).with_context(|| format!("Failed to decode {}", path.display()))
}

fn load(config_path: &Path) -> Result<SyncConfig> {
    load_config(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))
}

fn print_change(change: &Change, endpoints: &Endpoints, service: Service) {
    let line = change.to_string();
    let line = match change {
        Change::Add { .. } => line.green(),
        Change::Edit { .. } => line.yellow(),
        Change::Delete { .. } => line.red(),
    };
    match change.url(endpoints, service, false) {
        Ok(url) => println!("{}  {}", line, url.dimmed()),
        Err(e) => println!("{}  {}", line, e.to_string().red()),
    }
}

/// Merged changes between two dumps, addressed by their ids on `service`.
///
/// Entries unknown on `service` cannot be pushed there and are left out.
fn merged_between(old: Snapshot, new: Snapshot, service: Service) -> Result<Vec<Change>> {
    let changes = diff_snapshots(&key_by(old, service), &key_by(new, service));
    Ok(merge_changes(&changes, service)?)
}

pub fn diff(old: &Path, new: &Path, service: Service, json: bool) -> Result<()> {
    let merged = merged_between(read_dump(old)?, read_dump(new)?, service)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&merged)?);
        return Ok(());
    }

    if merged.is_empty() {
        println!("{}", "No changes".dimmed());
        return Ok(());
    }
    let endpoints = Endpoints::default();
    for change in &merged {
        print_change(change, &endpoints, service);
    }
    println!("\n{} changes for {}", merged.len(), service.to_string().bold());
    Ok(())
}

pub async fn fetch(config_path: &Path, user: Option<String>, json: bool) -> Result<()> {
    let config = load(config_path)?;
    let user = match user {
        Some(user) => user,
        None => config
            .username(Service::Hummingbird)
            .map(str::to_string)
            .context("No user given and no hummingbird account configured")?,
    };

    let client_config = ClientConfig {
        retry: config.retry,
        ..ClientConfig::default()
    };
    let source = HummingbirdSource::new(client_config, &config.endpoints, &user)?;
    let snapshot =
        source.fetch().await.with_context(|| format!("Failed to fetch {}", source.url()))?;

    if json {
        let records: Vec<&Anime> = snapshot.values().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{}", format!("{user}'s library ({} entries)", snapshot.len()).cyan().bold());
    for (id, anime) in &snapshot {
        println!(
            "  {:>6}  {:<14} {:>4} ep  {}",
            id,
            anime.status().to_string(),
            anime.episodes_watched(),
            anime.title()
        );
    }
    Ok(())
}

pub async fn push(config_path: &Path, old: &Path, new: &Path, dry_run: bool) -> Result<()> {
    let config = load(config_path)?;
    let old = read_dump(old)?;
    let changes = diff_snapshots(&old, &read_dump(new)?);

    let tracked = |service| TrackedList::from_snapshot(service, key_by(old.clone(), service));
    let mut manager = ListSyncManager::new(tracked(config.primary));
    for &replica in &config.replicas {
        manager.add_replica(tracked(replica));
    }

    for change in &changes {
        let applied = match change {
            Change::Add { anime } => manager.add(anime),
            Change::Edit { new, .. } => manager.edit(new),
            Change::Delete { anime } => manager.remove(anime),
        };
        applied.with_context(|| format!("Cannot apply change: {change}"))?;
    }

    let (primary, replicas) = manager.into_parts();
    let mut lists = Vec::with_capacity(replicas.len() + 1);
    lists.push(primary);
    lists.extend(replicas);

    if dry_run {
        for list in &lists {
            let merged = merge_changes(list.pending(), list.service())?;
            println!("{} ({} requests)", list.service().to_string().cyan().bold(), merged.len());
            for change in &merged {
                print_change(change, &config.endpoints, list.service());
            }
        }
        return Ok(());
    }

    let sender = HttpSender::new(&ClientConfig::default())?;
    for list in &mut lists {
        let service = list.service();
        let credential = config.credential(service)?;
        let generator = RequestGenerator::new(credential, config.endpoints.clone());
        let sent = list
            .push(&generator, &sender, config.push_timeout(), accept_success())
            .await
            .with_context(|| format!("Push to {service} failed"))?;
        println!("{} {}: {} requests sent", "✓".green(), service, sent);
    }
    Ok(())
}
