//! Directory-backed storage: one JSON document per named graph

use crate::error::{StorageError, StorageResult};
use crate::traits::GraphStore;
use dwgraph_core::limits::validate_graph_name;
use dwgraph_core::{DirectedWeightedGraph, GraphCodec, GraphModel, TypeRegistry};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

const EXTENSION: &str = "json";

/// File storage backend
///
/// Graphs live at `<root>/<name>.json`. Writes go to a temporary sibling
/// that is renamed over the target once fully written.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    codec: GraphCodec,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let store = Self {
            root: root.as_ref().to_path_buf(),
            codec: GraphCodec::default(),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Use a custom type registry for encoding/decoding
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.codec = GraphCodec::new(registry);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for `name`
    pub fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        validate_graph_name(name)?;
        Ok(self.root.join(format!("{}.{}", name, EXTENSION)))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> StorageResult<()> {
        let tmp_path = path.with_extension(format!("{}.tmp", EXTENSION));

        {
            // Owner read/write only
            #[cfg(unix)]
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&tmp_path)?;
            #[cfg(not(unix))]
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;

            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        if let Err(e) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl GraphStore for FileStore {
    fn initialize(&self) -> StorageResult<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    fn health_check(&self) -> StorageResult<bool> {
        Ok(self.root.is_dir())
    }

    fn save_graph(&self, name: &str, graph: &DirectedWeightedGraph) -> StorageResult<()> {
        let path = self.path_for(name)?;
        let content = self.codec.encode(graph)?;
        self.write_atomic(&path, &content)?;

        tracing::debug!(
            "Saved graph '{}' ({} nodes, {} edges) to {:?}",
            name,
            graph.node_count(),
            graph.edge_count(),
            path
        );
        Ok(())
    }

    fn load_graph(&self, name: &str) -> StorageResult<Option<DirectedWeightedGraph>> {
        let path = self.path_for(name)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let graph = self.codec.decode(&content)?;
        tracing::debug!("Loaded graph '{}' from {:?}", name, path);
        Ok(Some(graph))
    }

    fn list_graphs(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_graph_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_graph(&self, name: &str) -> StorageResult<()> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Deleted graph '{}'", name);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::GraphNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, name: &str) -> StorageResult<bool> {
        Ok(self.path_for(name)?.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwgraph_core::Node;

    fn sample_graph() -> DirectedWeightedGraph {
        let mut graph = DirectedWeightedGraph::new();
        for key in 1..=3 {
            graph.add_node(Node::new(key)).unwrap();
        }
        graph.connect(1, 2, 1.0).unwrap();
        graph.connect(2, 3, 2.0).unwrap();
        graph
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("graphs")).unwrap();
        assert!(store.health_check().unwrap());

        store.save_graph("roads", &sample_graph()).unwrap();
        let loaded = store.load_graph("roads").unwrap().unwrap();

        assert_eq!(loaded.keys(), vec![1, 2, 3]);
        assert_eq!(loaded.edge(2, 3).unwrap().weight(), 2.0);
        assert!(store.root().join("roads.json").is_file());
        assert!(!store.root().join("roads.json.tmp").exists());
    }

    #[test]
    fn test_missing_graph_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.load_graph("nothing").unwrap().is_none());
        assert!(store.load_or_default("nothing").unwrap().is_empty());
        assert!(!store.contains("nothing").unwrap());
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.save_graph("beta", &sample_graph()).unwrap();
        store.save_graph("alpha", &DirectedWeightedGraph::new()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list_graphs().unwrap(), vec!["alpha", "beta"]);

        store.delete_graph("alpha").unwrap();
        assert_eq!(store.list_graphs().unwrap(), vec!["beta"]);
        assert!(matches!(
            store.delete_graph("alpha"),
            Err(StorageError::GraphNotFound(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.save_graph("../escape", &sample_graph()),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            store.load_graph(""),
            Err(StorageError::InvalidName(_))
        ));
    }

    #[test]
    fn test_corrupt_document_is_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ \"nodes\": 3 }").unwrap();

        assert!(matches!(
            store.load_graph("broken"),
            Err(StorageError::Codec(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.save_graph("private", &sample_graph()).unwrap();

        let mode = std::fs::metadata(dir.path().join("private.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
