//! End-to-end route discovery over real directory trees.

use std::path::Path;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use route_tree::config::DuplicatePolicy;
use route_tree::routing::{LoadError, ModuleExport, RouterError};
use route_tree::{DirectoryRouter, ModuleRegistry, RouterConfig, StandardLoader};

mod common;

fn prefixes(router: &DirectoryRouter) -> Vec<&str> {
    router.routes().iter().map(|r| r.prefix.as_str()).collect()
}

#[tokio::test]
async fn test_root_users_and_helper_scenario() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "route.toml", &common::router_module("home"));
    common::write(dir.path(), "users/route.toml", &common::router_module("users"));
    common::write(dir.path(), "users/helpers.toml", &common::data_module());

    let config = RouterConfig::new(dir.path()).with_sorted_entries(true);
    let router = DirectoryRouter::new(config, &StandardLoader::declarative_only()).unwrap();

    assert_eq!(prefixes(&router), vec!["/", "/users"]);

    let app = router.router();
    assert_eq!(common::get(&app, "/").await, (StatusCode::OK, "home".to_string()));
    assert_eq!(common::get(&app, "/users").await, (StatusCode::OK, "users".to_string()));
    assert_eq!(common::get(&app, "/users/helpers").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_named_modules_and_directory_modules() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "admin/route.toml", &common::router_module("admin"));
    common::write(dir.path(), "admin/users.toml", &common::router_module("admin users"));
    common::write(dir.path(), "admin/logo.svg", "<svg/>");

    let config = RouterConfig::new(dir.path()).with_sorted_entries(true);
    let router = DirectoryRouter::new(config, &StandardLoader::declarative_only()).unwrap();

    assert_eq!(prefixes(&router), vec!["/admin", "/admin/users"]);

    let app = router.router();
    assert_eq!(common::get(&app, "/admin").await.1, "admin");
    assert_eq!(common::get(&app, "/admin/users").await.1, "admin users");
}

#[test]
fn test_every_router_module_is_mounted_once() {
    let dir = tempfile::tempdir().unwrap();
    let layout = [
        "route.toml",
        "a/route.toml",
        "a/b.toml",
        "a/c/route.toml",
        "a/c/d.toml",
        "e/f/g/h.toml",
    ];
    for relative in layout {
        common::write(dir.path(), relative, &common::router_module(relative));
    }
    common::write(dir.path(), "a/c/fixtures.toml", &common::data_module());

    let router =
        DirectoryRouter::new(RouterConfig::new(dir.path()), &StandardLoader::declarative_only())
            .unwrap();

    let mut mounted = prefixes(&router);
    mounted.sort_unstable();
    assert_eq!(mounted, vec!["/", "/a", "/a/b", "/a/c", "/a/c/d", "/e/f/g/h"]);
}

#[test]
fn test_missing_root_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let config = RouterConfig::new(dir.path().join("nope"));

    let err = DirectoryRouter::new(config, &StandardLoader::declarative_only()).unwrap_err();
    assert!(matches!(err, RouterError::Filesystem { .. }));
}

#[test]
fn test_broken_module_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "route.toml", &common::router_module("ok"));
    common::write(dir.path(), "users/route.toml", "kind = \"router\"\n[[routes]\n");

    let err = DirectoryRouter::new(RouterConfig::new(dir.path()), &StandardLoader::declarative_only())
        .unwrap_err();

    match err {
        RouterError::Load { path, source } => {
            assert!(path.ends_with(Path::new("users").join("route.toml")));
            assert!(matches!(source, LoadError::Syntax(_)));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_duplicate_prefix_rejected_by_default() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "a/route.toml", &common::router_module("dir"));
    common::write(dir.path(), "a.toml", &common::router_module("file"));

    let err = DirectoryRouter::new(RouterConfig::new(dir.path()), &StandardLoader::declarative_only())
        .unwrap_err();
    assert!(matches!(err, RouterError::DuplicatePrefix { ref prefix, .. } if prefix == "/a"));
}

#[tokio::test]
async fn test_duplicate_prefix_keep_first() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "a/route.toml", &common::router_module("dir"));
    common::write(dir.path(), "a.toml", &common::router_module("file"));

    let config = RouterConfig::new(dir.path())
        .with_sorted_entries(true)
        .with_duplicate_policy(DuplicatePolicy::KeepFirst);
    let router = DirectoryRouter::new(config, &StandardLoader::declarative_only()).unwrap();

    // "a" sorts before "a.toml", so the directory module is registered first.
    assert_eq!(prefixes(&router), vec!["/a"]);
    assert_eq!(common::get(&router.router(), "/a").await.1, "dir");
}

#[tokio::test]
async fn test_compiled_modules_from_registry() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "route.rs", "");
    common::write(dir.path(), "users/{id}/route.rs", "");
    common::write(dir.path(), "users/helpers.rs", "");

    let registry = ModuleRegistry::new()
        .register_router("route.rs", || Router::new().route("/", get(|| async { "index" })))
        .register_router("users/{id}/route.rs", || {
            Router::new().route(
                "/",
                get(|axum::extract::Path(id): axum::extract::Path<String>| async move {
                    format!("user {}", id)
                }),
            )
        });

    let config = RouterConfig::new(dir.path()).with_sorted_entries(true);
    let router = DirectoryRouter::new(config, &StandardLoader::new(registry)).unwrap();

    assert_eq!(prefixes(&router), vec!["/", "/users/{id}"]);

    let app = router.router();
    assert_eq!(common::get(&app, "/").await.1, "index");
    assert_eq!(common::get(&app, "/users/42").await.1, "user 42");
}

#[test]
fn test_factory_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "db.rs", "");

    let registry = ModuleRegistry::new()
        .register("db.rs", || Err(LoadError::Factory("pool exhausted".into())));

    let err = DirectoryRouter::new(RouterConfig::new(dir.path()), &StandardLoader::new(registry))
        .unwrap_err();
    assert!(matches!(err, RouterError::Load { source: LoadError::Factory(_), .. }));
}

#[test]
fn test_custom_loader_and_extensions() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "api/route.mod", "");
    common::write(dir.path(), "api/util.mod", "");
    common::write(dir.path(), "api/ignored.rs", "");

    let mut config = RouterConfig::new(dir.path());
    config.extensions = vec!["mod".into()];

    let loader = |module: &route_tree::discovery::CandidateModule| -> Result<ModuleExport, LoadError> {
        if module.relative_key().ends_with("route.mod") {
            Ok(ModuleExport::Router(Router::new()))
        } else {
            Ok(ModuleExport::other("utility"))
        }
    };

    let router = DirectoryRouter::new(config, &loader).unwrap();
    assert_eq!(prefixes(&router), vec!["/api"]);
}

#[test]
fn test_unservable_declared_path_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "users.toml", &common::router_module_at("/:id", "user"));

    let err = DirectoryRouter::new(RouterConfig::new(dir.path()), &StandardLoader::declarative_only())
        .unwrap_err();
    assert!(matches!(err, RouterError::Load { source: LoadError::Malformed(_), .. }));
}

#[tokio::test]
async fn test_root_routes_overlapping_nested_mount() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "route.toml", &common::router_module_at("/users", "root users"));
    common::write(dir.path(), "users/route.toml", &common::router_module("users"));

    // "route.toml" sorts before "users", so the root module is registered first.
    let config = RouterConfig::new(dir.path()).with_sorted_entries(true);
    let err = DirectoryRouter::new(config.clone(), &StandardLoader::declarative_only()).unwrap_err();
    assert!(matches!(err, RouterError::RouteConflict { ref prefix, .. } if prefix == "/users"));

    let config = config.with_duplicate_policy(DuplicatePolicy::KeepFirst);
    let router = DirectoryRouter::new(config, &StandardLoader::declarative_only()).unwrap();
    assert_eq!(prefixes(&router), vec!["/"]);
    assert_eq!(router.skipped().len(), 1);
    assert!(router.skipped()[0].source.ends_with(Path::new("users").join("route.toml")));
    assert_eq!(common::get(&router.router(), "/users").await.1, "root users");
}

#[tokio::test]
async fn test_named_module_overlapping_directory_module() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "a.toml", &common::router_module_at("/b", "from a"));
    common::write(dir.path(), "a/b.toml", &common::router_module("from a/b"));

    // "a" sorts before "a.toml", so the nested module is registered first.
    let config = RouterConfig::new(dir.path()).with_sorted_entries(true);
    let err = DirectoryRouter::new(config.clone(), &StandardLoader::declarative_only()).unwrap_err();
    assert!(matches!(err, RouterError::RouteConflict { ref prefix, .. } if prefix == "/a"));

    let config = config.with_duplicate_policy(DuplicatePolicy::KeepFirst);
    let router = DirectoryRouter::new(config, &StandardLoader::declarative_only()).unwrap();
    assert_eq!(prefixes(&router), vec!["/a/b"]);
    assert!(router.skipped()[0].source.ends_with("a.toml"));
    assert_eq!(common::get(&router.router(), "/a/b").await.1, "from a/b");
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_unreadable_root_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("routes");
    common::write(&root, "route.toml", &common::router_module("home"));

    set_mode(&root, 0o000);
    if std::fs::read_dir(&root).is_ok() {
        // Permission bits do not bind a privileged user.
        set_mode(&root, 0o755);
        return;
    }

    let result = DirectoryRouter::new(RouterConfig::new(&root), &StandardLoader::declarative_only());
    set_mode(&root, 0o755);

    match result {
        Err(RouterError::Filesystem { path, .. }) => assert_eq!(path, root),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("unreadable root was accepted"),
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_aborts_walk() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "route.toml", &common::router_module("home"));
    common::write(dir.path(), "locked/route.toml", &common::router_module("locked"));
    let locked = dir.path().join("locked");

    set_mode(&locked, 0o000);
    if std::fs::read_dir(&locked).is_ok() {
        set_mode(&locked, 0o755);
        return;
    }

    let result = DirectoryRouter::new(RouterConfig::new(dir.path()), &StandardLoader::declarative_only());
    set_mode(&locked, 0o755);

    match result {
        Err(RouterError::Filesystem { path, .. }) => assert!(path.starts_with(&locked)),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("unreadable subdirectory was skipped"),
    }
}
