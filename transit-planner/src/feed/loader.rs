//! Loading a feed from a directory of TOML documents.
//!
//! A feed directory holds one document per entity kind:
//!
//! ```text
//! agencies.toml  modalities.toml  nodes.toml
//! transfers.toml routes.toml      notifications.toml
//! ```
//!
//! Each document is a table keyed by id. A missing document is treated
//! as an empty table, so a feed without notifications simply omits
//! `notifications.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::builder::FeedBuilder;
use super::definition::{
    AgencyDef, ModalityDef, NodeDef, NotificationDef, RouteDef, TransferDef,
};
use super::error::FeedError;
use super::graph::Feed;

pub const AGENCIES_FILE: &str = "agencies.toml";
pub const MODALITIES_FILE: &str = "modalities.toml";
pub const NODES_FILE: &str = "nodes.toml";
pub const TRANSFERS_FILE: &str = "transfers.toml";
pub const ROUTES_FILE: &str = "routes.toml";
pub const NOTIFICATIONS_FILE: &str = "notifications.toml";

/// The parsed documents of a feed directory.
#[derive(Debug, Clone, Default)]
pub struct FeedDocuments {
    pub agencies: BTreeMap<String, AgencyDef>,
    pub modalities: BTreeMap<String, ModalityDef>,
    pub nodes: BTreeMap<String, NodeDef>,
    pub transfers: BTreeMap<String, TransferDef>,
    pub routes: BTreeMap<String, RouteDef>,
    pub notifications: BTreeMap<String, NotificationDef>,
}

impl FeedDocuments {
    /// Read and parse every document in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a present document can't be read or parsed.
    pub fn read_dir(dir: &Path) -> Result<Self, FeedError> {
        Ok(Self {
            agencies: read_table(dir, AGENCIES_FILE)?,
            modalities: read_table(dir, MODALITIES_FILE)?,
            nodes: read_table(dir, NODES_FILE)?,
            transfers: read_table(dir, TRANSFERS_FILE)?,
            routes: read_table(dir, ROUTES_FILE)?,
            notifications: read_table(dir, NOTIFICATIONS_FILE)?,
        })
    }

    /// Hand the documents to a builder, in id order.
    pub fn into_builder(self) -> FeedBuilder {
        let mut builder = FeedBuilder::new();
        for (id, def) in self.agencies {
            builder = builder.agency(id, def);
        }
        for (id, def) in self.modalities {
            builder = builder.modality(id, def);
        }
        for (id, def) in self.nodes {
            builder = builder.node(id, def);
        }
        for (id, def) in self.transfers {
            builder = builder.transfer(id, def);
        }
        for (id, def) in self.routes {
            builder = builder.route(id, def);
        }
        for (id, def) in self.notifications {
            builder = builder.notification(id, def);
        }
        builder
    }
}

impl Feed {
    /// Load and build the feed stored in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a document can't be read or parsed, or if the
    /// documents don't form a consistent feed.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let dir = dir.as_ref();
        let feed = FeedDocuments::read_dir(dir)?.into_builder().build()?;
        info!(
            dir = %dir.display(),
            nodes = feed.nodes().len(),
            routes = feed.routes().len(),
            "Loaded feed"
        );
        Ok(feed)
    }
}

fn read_table<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<BTreeMap<String, T>, FeedError> {
    let path = dir.join(file);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file, "Feed document missing, treating as empty");
            return Ok(BTreeMap::new());
        }
        Err(source) => return Err(FeedError::Io { path, source }),
    };

    toml::from_str(&contents).map_err(|source| FeedError::Parse {
        file: file.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeIndex, NotificationKind, seconds};

    fn write(dir: &Path, file: &str, contents: &str) {
        fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn load_feed_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            MODALITIES_FILE,
            r#"
            [train]
            name = "Trein"
            nodeName = "Treinstation"
            icon = "train"
            "#,
        );
        write(
            dir.path(),
            NODES_FILE,
            r#"
            [asd]
            name = "Amsterdam Centraal"
            modality = "train"
            location = "Amsterdam"

            [ut]
            name = "Utrecht Centraal"
            modality = "train"
            "#,
        );
        write(
            dir.path(),
            ROUTES_FILE,
            r#"
            [ic]
            name = "Intercity"
            modality = "train"

            [ic.stops.1]
            node = "asd"

            [ic.stops.2]
            node = "ut"
            time = 1620
            "#,
        );
        write(
            dir.path(),
            NOTIFICATIONS_FILE,
            r#"
            [storing]
            type = "disruption"
            affectedNodes = ["ut"]
            "#,
        );

        let feed = Feed::load_dir(dir.path()).unwrap();

        assert_eq!(feed.nodes().len(), 2);
        assert!(feed.transfers().is_empty());
        assert!(feed.agencies().is_empty());

        let asd = feed.node_index("asd").unwrap();
        assert_eq!(
            feed.node_description(asd).as_deref(),
            Some("Treinstation · Amsterdam · asd")
        );
        assert_eq!(feed.node_icon(asd), Some("train"));

        let route = feed.route_by_id("ic").unwrap();
        assert_eq!(route.total_time(), seconds(1620));

        let ut = feed.node_index("ut").unwrap();
        let notices: Vec<_> = feed.notifications_for_node(ut).collect();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NotificationKind::Disruption);
        assert_eq!(notices[0].name(), Some("Storing"));
        assert_eq!(feed.notifications_for_node(asd).count(), 0);
    }

    #[test]
    fn sample_feed_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
        let feed = Feed::load_dir(dir).unwrap();

        assert_eq!(feed.agencies().len(), 2);
        assert_eq!(feed.modalities().len(), 2);
        assert_eq!(feed.nodes().len(), 7);
        assert_eq!(feed.routes().len(), 3);

        let ic = feed.route_by_id("ic-shl-ut").unwrap();
        assert_eq!(ic.display_name(), "IC");
        assert_eq!(ic.total_time(), seconds(2580));
        assert_eq!(ic.color.background, "#ffc917");

        let separate = feed.transfer_by_id("dam-leidseplein").unwrap();
        assert!(separate.separate);
    }

    #[test]
    fn empty_directory_is_empty_feed() {
        let dir = tempfile::tempdir().unwrap();
        let feed = Feed::load_dir(dir.path()).unwrap();

        assert!(feed.nodes().is_empty());
        assert!(feed.routes().is_empty());
    }

    #[test]
    fn nodes_indexed_in_id_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            NODES_FILE,
            "[zz]\nname = \"Last\"\n[aa]\nname = \"First\"\n",
        );

        let feed = Feed::load_dir(dir.path()).unwrap();
        assert_eq!(feed.node_index("aa"), Some(NodeIndex(0)));
        assert_eq!(feed.node_index("zz"), Some(NodeIndex(1)));
    }

    #[test]
    fn parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), TRANSFERS_FILE, "[t1\nbetween = ");

        let err = Feed::load_dir(dir.path()).unwrap_err();
        match err {
            FeedError::Parse { file, .. } => assert_eq!(file, TRANSFERS_FILE),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn dangling_reference_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            TRANSFERS_FILE,
            "[t1]\nbetween = \"a\"\nand = \"b\"\ntime = 60\n",
        );

        let err = Feed::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, FeedError::UnknownReference { kind: "node", .. }));
    }
}
