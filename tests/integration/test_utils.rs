//! Shared test utilities for integration tests
//!
//! Environment isolation for config loading and a small on-disk dataset builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable access across tests in this binary
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TOUCHED_VARS: [&str; 5] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "VSR_WINDOW_ENV",
    "VSR_WINDOW_WINDOW__PADDING",
    "VSR_WINDOW_RUNTIME__SEED",
];

/// Environment variable state to restore after test
struct EnvState(Vec<(&'static str, Option<String>)>);

impl EnvState {
    fn capture() -> Self {
        Self(
            TOUCHED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        )
    }

    fn restore(self) {
        for (name, value) in self.0 {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and the
/// `VSR_WINDOW_*` overrides cleared. The environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let home = test_dir.path().join("home");
    let config_home = test_dir.path().join("xdg-config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();

    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    for name in &TOUCHED_VARS[2..] {
        std::env::remove_var(name);
    }

    let result = f();

    env_state.restore();
    result
}

/// Write a low-resolution video and its ground truth under `root`.
///
/// Frame files are empty; only names matter for planning.
pub fn write_video(root: &Path, name: &str, frames: usize) -> PathBuf {
    let lr = root.join(format!("{}_l", name));
    let gt = root.join(format!("{}_h_GT", name));
    fs::create_dir_all(&lr).unwrap();
    fs::create_dir_all(&gt).unwrap();
    for i in 0..frames {
        fs::write(lr.join(format!("{}_l_{}_{:02}_.npy", name, frames, i)), b"").unwrap();
        fs::write(gt.join(format!("{}_h_GT_{}_{:02}_.npy", name, frames, i)), b"").unwrap();
    }
    lr
}
