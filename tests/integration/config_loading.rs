//! Config precedence: defaults, global file, workspace files, environment

use crate::integration::test_utils::with_isolated_env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vsr_window::config::{global_config_path, ConfigLoader};
use vsr_window::error::ApiError;
use vsr_window::window::PaddingPolicy;

fn write_workspace_config(test_dir: &TempDir, file: &str, contents: &str) -> PathBuf {
    let dir = test_dir.path().join("workspace").join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), contents).unwrap();
    test_dir.path().join("workspace")
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let config = ConfigLoader::load(test_dir.path()).unwrap();
        assert_eq!(config.window.n_frames, 7);
        assert_eq!(config.window.padding, PaddingPolicy::Reflection);
        assert_eq!(config.data.data_dir, PathBuf::from("./dataset/train"));
        assert_eq!(config.runtime.seed, 123);
    });
}

#[test]
fn test_global_file_is_read() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let path = global_config_path().expect("config dir available");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[runtime]\nseed = 9\n").unwrap();

        let config = ConfigLoader::load(&test_dir.path().join("nowhere")).unwrap();
        assert_eq!(config.runtime.seed, 9);
    });
}

#[test]
fn test_workspace_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let path = global_config_path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[window]\npadding = \"circle\"\n[runtime]\nseed = 9\n").unwrap();
        let workspace =
            write_workspace_config(&test_dir, "config.toml", "[window]\npadding = \"new_info\"\n");

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.window.padding, PaddingPolicy::NewInfo);
        assert_eq!(config.runtime.seed, 9);
    });
}

#[test]
fn test_environment_file_layers_over_base() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        write_workspace_config(&test_dir, "config.toml", "[window]\nn_frames = 5\n");
        let workspace =
            write_workspace_config(&test_dir, "ci.toml", "[window]\nn_frames = 9\n");

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.window.n_frames, 5, "development.toml absent, base applies");

        std::env::set_var("VSR_WINDOW_ENV", "ci");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.window.n_frames, 9);
    });
}

#[test]
fn test_environment_variables_win() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace =
            write_workspace_config(&test_dir, "config.toml", "[window]\npadding = \"circle\"\n");
        std::env::set_var("VSR_WINDOW_WINDOW__PADDING", "replicate");
        std::env::set_var("VSR_WINDOW_RUNTIME__SEED", "77");

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.window.padding, PaddingPolicy::Replicate);
        assert_eq!(config.runtime.seed, 77);
    });
}

#[test]
fn test_unknown_policy_in_file_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace =
            write_workspace_config(&test_dir, "config.toml", "[window]\npadding = \"mirror\"\n");
        let err = ConfigLoader::load(&workspace).unwrap_err();
        assert!(matches!(err, ApiError::ConfigError(_)), "{:?}", err);
    });
}

#[test]
fn test_load_from_file() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let path = test_dir.path().join("run.toml");
        fs::write(
            &path,
            "[data]\nupscale_factor = 2\npatch_size = 32\n[window]\nn_frames = 3\n",
        )
        .unwrap();
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.data.upscale_factor, 2);
        assert_eq!(config.data.patch_size, 32);
        assert_eq!(config.window.n_frames, 3);

        let missing = ConfigLoader::load_from_file(&test_dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ApiError::ConfigError(_))));
    });
}

#[test]
fn test_validation_failure_lists_sections() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let path = test_dir.path().join("bad.toml");
        fs::write(
            &path,
            "[window]\nn_frames = 8\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();
        match ConfigLoader::load_from_file(&path) {
            Err(ApiError::ConfigError(msg)) => {
                assert!(msg.contains("window:"), "{}", msg);
                assert!(msg.contains("logging:"), "{}", msg);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    });
}
