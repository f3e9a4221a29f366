//! Promo directory watching.
//!
//! The promo directory may not exist when the kiosk boots (a USB stick or a
//! sync job fills it later). Until it does, the closest existing ancestor is
//! watched instead and the watch moves down once the directory appears.

use cosmic::iced::Subscription;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Something changed in the promo asset directory; a rescan is due.
#[derive(Debug, Clone)]
pub enum WatcherEvent {
    Changed(PathBuf),
    Error(String),
}

/// The directory to attach the watch to: `dir` itself, or its nearest existing ancestor.
pub fn watch_root(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .find(|candidate| candidate.is_dir())
        .map(Path::to_path_buf)
}

/// Whether a change at `path` can affect the slides found in `dir`.
pub fn affects(dir: &Path, path: &Path) -> bool {
    dir.starts_with(path) || path.parent() == Some(dir)
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(_)
    )
}

pub fn watch_directory(dir: Option<PathBuf>) -> Subscription<WatcherEvent> {
    Subscription::run_with_id(
        dir.clone(),
        cosmic::iced::stream::channel(100, move |mut output| async move {
            use cosmic::iced_futures::futures::SinkExt;

            let Some(dir) = dir else {
                std::future::pending::<()>().await;
                unreachable!()
            };

            let (tx, mut rx) = mpsc::channel(100);

            let watcher_result = RecommendedWatcher::new(
                move |res: Result<Event, notify::Error>| {
                    let _ = tx.blocking_send(res);
                },
                Config::default(),
            );

            let mut watcher = match watcher_result {
                Ok(watcher) => watcher,
                Err(e) => {
                    let _ = output.send(WatcherEvent::Error(e.to_string())).await;
                    std::future::pending::<()>().await;
                    unreachable!();
                }
            };

            let Some(mut watched) = watch_root(&dir) else {
                let _ = output
                    .send(WatcherEvent::Error(format!(
                        "nothing to watch for {}",
                        dir.display()
                    )))
                    .await;
                std::future::pending::<()>().await;
                unreachable!();
            };

            if let Err(e) = watcher.watch(&watched, RecursiveMode::NonRecursive) {
                let _ = output.send(WatcherEvent::Error(e.to_string())).await;
                std::future::pending::<()>().await;
                unreachable!();
            }
            if watched != dir {
                tracing::info!(
                    "{} does not exist yet, watching {}",
                    dir.display(),
                    watched.display()
                );
            }

            while let Some(event_result) = rx.recv().await {
                let event = match event_result {
                    Ok(event) => event,
                    Err(e) => {
                        let _ = output.send(WatcherEvent::Error(e.to_string())).await;
                        continue;
                    }
                };

                if !is_change(&event.kind) {
                    continue;
                }
                let Some(path) = event.paths.into_iter().find(|path| affects(&dir, path)) else {
                    continue;
                };

                // The promo directory (or one of its parents) came or went
                if let Some(root) = watch_root(&dir).filter(|root| *root != watched) {
                    let _ = watcher.unwatch(&watched);
                    match watcher.watch(&root, RecursiveMode::NonRecursive) {
                        Ok(()) => {
                            tracing::debug!("now watching {}", root.display());
                            watched = root;
                        }
                        Err(e) => {
                            let _ = output.send(WatcherEvent::Error(e.to_string())).await;
                        }
                    }
                }

                let _ = output.send(WatcherEvent::Changed(path)).await;
            }

            std::future::pending::<()>().await;
            unreachable!()
        }),
    )
}
