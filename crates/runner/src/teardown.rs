//! Removal detection
//!
//! Every widget runs a watcher subscribed to the document's structural
//! change notifications. After each mutation it checks whether its own
//! root is still attached and cancels only its own token otherwise. All
//! watchers share one notification source; none can cancel another widget.

use tokio_util::sync::CancellationToken;

use crate::dom::{NodeId, SharedDocument};

/// Cancel `cancel` once `root` is no longer reachable from the document body
///
/// Returns when the root is detached, when the token is cancelled by
/// someone else, or when the document is dropped.
pub async fn watch_removal(
    doc: SharedDocument,
    root: NodeId,
    cancel: CancellationToken,
    name: String,
) {
    let mut changes = doc.read().subscribe_mutations();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    log::debug!("[{}] Document closed, cancelling", name);
                    cancel.cancel();
                    break;
                }
                if !doc.read().is_connected(root) {
                    log::info!("[{}] Root removed from document, cancelling", name);
                    cancel.cancel();
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_only_the_removed_root_is_cancelled() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        doc.append_child(body, first);
        doc.append_child(body, second);
        let doc = doc.into_shared();

        let first_token = CancellationToken::new();
        let second_token = CancellationToken::new();
        let first_watch = tokio::spawn(watch_removal(
            doc.clone(),
            first,
            first_token.clone(),
            "first".to_string(),
        ));
        let second_watch = tokio::spawn(watch_removal(
            doc.clone(),
            second,
            second_token.clone(),
            "second".to_string(),
        ));
        tokio::task::yield_now().await;

        // Unrelated mutation
        {
            let mut page = doc.write();
            let extra = page.create_element("p");
            page.append_child(body, extra);
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!first_token.is_cancelled());
        assert!(!second_token.is_cancelled());

        doc.write().remove(first);
        first_watch.await.unwrap();
        assert!(first_token.is_cancelled());
        assert!(!second_token.is_cancelled());

        second_token.cancel();
        second_watch.await.unwrap();
    }

    #[tokio::test]
    async fn test_removing_an_ancestor_counts_as_removal() {
        let mut doc = Document::new();
        let body = doc.body();
        let section = doc.create_element("section");
        let root = doc.create_element("div");
        doc.append_child(section, root);
        doc.append_child(body, section);
        let doc = doc.into_shared();

        let token = CancellationToken::new();
        let watch = tokio::spawn(watch_removal(
            doc.clone(),
            root,
            token.clone(),
            "nested".to_string(),
        ));
        tokio::task::yield_now().await;

        doc.write().remove(section);
        watch.await.unwrap();
        assert!(token.is_cancelled());
    }
}
