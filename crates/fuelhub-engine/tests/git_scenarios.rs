//! End-to-end scenarios against the git backend

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fuelhub_core::{CommitterIdentity, ResourceKind, ResourceRecord};
use fuelhub_engine::{EngineError, ErrorKind, Hub, ResourceCatalog};
use fuelhub_repo::GitBackend;
use fuelhub_repo::archive::{list_entries, read_entry};
use tempfile::TempDir;

struct Env {
    temp: TempDir,
    hub: Hub,
    catalog: ResourceCatalog,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let backend = GitBackend::new(CommitterIdentity::default());
        let hub = Hub::new(temp.path().join("resources"), Arc::new(backend));
        Self {
            temp,
            hub,
            catalog: ResourceCatalog::open_memory().unwrap(),
        }
    }

    fn folder(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.temp.path().join("sources").join(name);
        for (rel, content) in files {
            let path = dir.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        dir
    }

    fn create(&mut self, files: &[(&str, &str)]) -> ResourceRecord {
        let source = self.folder("initial", files);
        self.hub
            .create_resource(&mut self.catalog, "box", "alice", ResourceKind::Model, &source)
            .unwrap()
    }

    fn replace(&mut self, res: &ResourceRecord, name: &str, files: &[(&str, &str)]) {
        let source = self.folder(name, files);
        self.hub
            .replace_content(&mut self.catalog, res, ResourceKind::Model, &source, Some("alice"))
            .unwrap();
    }
}

fn sorted_entries(path: &Path) -> Vec<String> {
    let mut entries = list_entries(path).unwrap();
    entries.sort();
    entries
}

#[test]
fn create_then_replace() {
    let mut env = Env::new();
    let res = env.create(&[("a.txt", "A")]);

    let v1 = env.hub.get_zip(&res, ResourceKind::Model, "tip").unwrap();
    assert_eq!(v1.version, 1);
    assert_eq!(sorted_entries(&v1.path), vec!["a.txt"]);

    env.replace(&res, "v2", &[("a.txt", "A"), ("b.txt", "B")]);

    let v2 = env.hub.get_zip(&res, ResourceKind::Model, "tip").unwrap();
    assert_eq!(v2.version, 2);
    assert_eq!(sorted_entries(&v2.path), vec!["a.txt", "b.txt"]);

    let again = env.hub.get_zip(&res, ResourceKind::Model, "1").unwrap();
    assert_eq!(again.path, v1.path);
    assert_eq!(sorted_entries(&again.path), vec!["a.txt"]);
}

#[test]
fn every_version_round_trips() {
    let mut env = Env::new();
    let res = env.create(&[("model.sdf", "v1")]);
    for v in 2..=4 {
        env.replace(&res, &format!("v{}", v), &[("model.sdf", &format!("v{}", v))]);
    }

    assert_eq!(env.hub.latest_version(&res).unwrap(), 4);
    for v in 1..=4u32 {
        let (content, version) = env.hub.get_file(&res, "/model.sdf", &v.to_string()).unwrap();
        assert_eq!(version, v);
        assert_eq!(content, format!("v{}", v).into_bytes());

        let zip = env.hub.get_zip(&res, ResourceKind::Model, &v.to_string()).unwrap();
        assert_eq!(read_entry(&zip.path, "model.sdf").unwrap(), format!("v{}", v).into_bytes());
    }
}

#[test]
fn out_of_range_versions() {
    let mut env = Env::new();
    let res = env.create(&[("a.txt", "A")]);

    let err = env.hub.resolve_version(&res, "2").unwrap_err();
    assert!(matches!(err, EngineError::VersionNotFound { requested: 2, latest: 1 }));
    assert_eq!(env.hub.resolve_version(&res, "0").unwrap_err().kind(), ErrorKind::InvalidValue);
    assert_eq!(env.hub.resolve_version(&res, "-1").unwrap_err().kind(), ErrorKind::InvalidValue);
}

#[test]
fn clone_restarts_at_version_one() {
    let mut env = Env::new();
    let res = env.create(&[("a.txt", "1")]);
    env.replace(&res, "v2", &[("a.txt", "2")]);
    env.replace(&res, "v3", &[("a.txt", "3")]);

    let clone = env
        .hub
        .clone_resource(&mut env.catalog, &res, "bob", "box copy")
        .unwrap();

    assert_eq!(env.hub.resolve_version(&clone, "tip").unwrap().version, 1);
    assert_eq!(env.hub.latest_version(&res).unwrap(), 3);
    let (content, _) = env.hub.get_file(&clone, "a.txt", "1").unwrap();
    assert_eq!(content, b"3");

    env.replace(&clone, "clone-v2", &[("a.txt", "4")]);
    assert_eq!(env.hub.latest_version(&clone).unwrap(), 2);
    assert_eq!(env.hub.latest_version(&res).unwrap(), 3);
}

#[test]
fn file_tree_has_no_root_node() {
    let mut env = Env::new();
    let res = env.create(&[
        ("model.config", "c"),
        ("model.sdf", "s"),
        ("meshes/base.dae", "m"),
        ("meshes/textures/base.png", "t"),
    ]);

    let tree = env.hub.file_tree(&res, "tip").unwrap();
    assert!(tree.find("/").is_none());
    assert_eq!(
        tree.paths(),
        vec![
            "/meshes",
            "/meshes/base.dae",
            "/meshes/textures",
            "/meshes/textures/base.png",
            "/model.config",
            "/model.sdf",
        ]
    );
}

#[test]
fn move_keeps_history_reachable() {
    let mut env = Env::new();
    let mut res = env.create(&[("a.txt", "A")]);
    env.replace(&res, "v2", &[("a.txt", "B")]);

    env.hub.move_resource(&mut env.catalog, &mut res, "acme").unwrap();

    assert_eq!(env.hub.latest_version(&res).unwrap(), 2);
    let (content, _) = env.hub.get_file(&res, "a.txt", "1").unwrap();
    assert_eq!(content, b"A");
}
