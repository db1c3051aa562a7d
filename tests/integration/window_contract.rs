//! Boundary behaviour of the public window API

use vsr_window::error::WindowError;
use vsr_window::naming::FrameName;
use vsr_window::window::{
    resolve_window, resolve_window_named, PaddingPolicy, WindowConfig, WindowResolver,
};

#[test]
fn test_reflection_at_start_of_eleven_frames() {
    let window = resolve_window(10, 0, 3, PaddingPolicy::Reflection).unwrap();
    assert_eq!(window, vec![3, 2, 1, 0, 1, 2, 3]);
}

#[test]
fn test_circle_at_start_of_eleven_frames() {
    let window = resolve_window(10, 0, 3, PaddingPolicy::Circle).unwrap();
    assert_eq!(window, vec![4, 5, 6, 0, 1, 2, 3]);
}

#[test]
fn test_each_policy_at_end_of_video() {
    let expected = [
        (PaddingPolicy::Replicate, vec![7, 8, 9, 10, 10, 10, 10]),
        (PaddingPolicy::Reflection, vec![7, 8, 9, 10, 9, 8, 7]),
        (PaddingPolicy::NewInfo, vec![7, 8, 9, 10, 6, 5, 4]),
        (PaddingPolicy::Circle, vec![7, 8, 9, 10, 4, 5, 6]),
    ];
    for (policy, indices) in expected {
        assert_eq!(resolve_window(10, 10, 3, policy).unwrap(), indices, "{}", policy);
    }
}

#[test]
fn test_four_frames_behave_as_replicate() {
    let baseline: Vec<Vec<i64>> = (0..=3)
        .map(|r| resolve_window(3, r, 3, PaddingPolicy::Replicate).unwrap())
        .collect();
    for policy in PaddingPolicy::ALL {
        for r in 0..=3 {
            assert_eq!(
                resolve_window(3, r, 3, policy).unwrap(),
                baseline[r as usize],
                "{} at {}",
                policy,
                r
            );
        }
    }
}

#[test]
fn test_unknown_policy_name_is_configuration_error() {
    let err = resolve_window_named(10, 0, 3, "wrap").unwrap_err();
    assert!(matches!(err, WindowError::Configuration(_)));
    assert_eq!(
        resolve_window_named(10, 0, 3, "new_info").unwrap(),
        resolve_window(10, 0, 3, PaddingPolicy::NewInfo).unwrap()
    );
}

#[test]
fn test_reference_outside_video_is_invalid_argument() {
    for r in [-1, 11, 100] {
        let err = resolve_window(10, r, 3, PaddingPolicy::Replicate).unwrap_err();
        assert!(matches!(err, WindowError::InvalidArgument(_)), "{}", r);
    }
}

#[test]
fn test_resolver_renders_sibling_names() {
    let resolver = WindowResolver::new(WindowConfig {
        n_frames: 5,
        padding: PaddingPolicy::Reflection,
    })
    .unwrap();
    let name = FrameName::parse("Youku_00042_l_250_249_.npy").unwrap();
    let resolved = resolver
        .resolve(name.video_length(), name.frame_index())
        .unwrap();
    assert_eq!(resolved.indices, vec![247, 248, 249, 248, 247]);
    assert_eq!(
        name.window_names(&resolved.indices),
        vec![
            "Youku_00042_l_250_247_.npy",
            "Youku_00042_l_250_248_.npy",
            "Youku_00042_l_250_249_.npy",
            "Youku_00042_l_250_248_.npy",
            "Youku_00042_l_250_247_.npy",
        ]
    );
}
