mod common;

use std::rc::Rc;

use winit::dpi::PhysicalSize;

use tricube_engine::config::WindowConfig;
use tricube_engine::coords::Viewport;
use tricube_engine::device::SetupError;
use tricube_engine::platform::{DisplayModeRequest, NativeWindow, WindowResources, WindowStyle};
use tricube_engine::scene::{Projection, ProjectionMode, RenderState, SCENE_CLIP, Scene};

use common::{Call, Script, ScriptedBackend, ScriptedPlatform, Step};

type Resources = WindowResources<ScriptedPlatform>;

fn demo() -> WindowConfig {
    WindowConfig::new("tricube", 800, 600, 32, false)
}

fn fullscreen_demo() -> WindowConfig {
    WindowConfig {
        fullscreen: true,
        ..demo()
    }
}

fn setup(
    script: &Rc<Script>,
    config: &WindowConfig,
    accept_windowed: bool,
) -> (Result<Resources, SetupError>, Scene, u32) {
    let mut backend = ScriptedBackend::new(script);
    let mut scene = Scene::new();
    let mut asked = 0;
    let mut prompt = |_: &DisplayModeRequest| {
        asked += 1;
        accept_windowed
    };

    let result = Resources::setup(&mut backend, config, &mut prompt, &mut scene, ProjectionMode::Perspective);
    (result, scene, asked)
}

#[test]
fn demo_window_comes_up_in_order() {
    let script = Script::new();
    let (result, scene, asked) = setup(&script, &demo(), true);
    let resources = result.unwrap();

    assert_eq!(asked, 0);
    assert!(!resources.is_fullscreen());
    assert!(scene.is_initialized());

    let window = resources.window().unwrap();
    assert!(window.visible);
    assert!(window.focused);
    assert_eq!(window.inner_size(), PhysicalSize::new(800, 600));

    let size = PhysicalSize::new(800, 600);
    let expected = vec![
        Call::RegisterClass,
        Call::CreateWindow {
            size,
            style: WindowStyle::for_fullscreen(false),
            exclusive: false,
        },
        Call::AcquireSurface,
        Call::ChoosePixelFormat(tricube_engine::device::PixelFormatRequest::new(32)),
        Call::SetPixelFormat,
        Call::CreateContext,
        Call::MakeCurrent(size),
        Call::ShowAndFocus,
        Call::SetViewport(Viewport::new(0, 0, 800, 600)),
        Call::SetProjection(Projection::Perspective(SCENE_CLIP)),
        Call::Initialize(RenderState::lit()),
    ];
    assert_eq!(script.calls(), expected);
}

#[test]
fn pixel_format_request_asks_for_depth_and_stencil() {
    let script = Script::new();
    let (result, ..) = setup(&script, &demo(), true);
    result.unwrap();

    let request = script
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::ChoosePixelFormat(r) => Some(r),
            _ => None,
        })
        .unwrap();

    assert_eq!(request.color_bits, 32);
    assert!(request.double_buffered);
    assert_eq!(request.depth_bits, 16);
    assert_eq!(request.stencil_bits, 8);
}

#[test]
fn kill_releases_in_reverse_order() {
    let script = Script::new();
    let (result, ..) = setup(&script, &demo(), true);
    let resources = result.unwrap();
    script.clear_calls();

    let report = resources.kill();
    assert!(report.is_clean());
    assert_eq!(
        script.calls(),
        vec![
            Call::ReleaseCurrent,
            Call::ReleaseContext,
            Call::ReleaseSurface,
            Call::ReleaseWindow,
            Call::ReleaseClass,
        ]
    );
}

#[test]
fn dropping_resources_tears_down() {
    let script = Script::new();
    {
        let (result, ..) = setup(&script, &demo(), true);
        let _resources = result.unwrap();
    }
    assert!(script.all_released());
    assert_eq!(script.calls().last(), Some(&Call::ReleaseClass));
}

#[test]
fn kill_then_setup_again_succeeds() {
    let script = Script::new();
    let config = demo();

    let (first, ..) = setup(&script, &config, true);
    assert!(first.unwrap().kill().is_clean());

    let (second, scene, _) = setup(&script, &config, true);
    let second = second.unwrap();
    assert!(scene.is_initialized());
    assert_eq!(script.count(|c| matches!(c, Call::RegisterClass)), 2);

    drop(second);
    assert!(script.all_released());
}

#[test]
fn fullscreen_uses_exclusive_borderless_window() {
    let script = Script::new();
    script.support_mode(800, 600, 32);

    let (result, _, asked) = setup(&script, &fullscreen_demo(), true);
    let resources = result.unwrap();

    assert_eq!(asked, 0);
    assert!(resources.is_fullscreen());
    assert!(script.calls().contains(&Call::CreateWindow {
        size: PhysicalSize::new(800, 600),
        style: WindowStyle {
            fullscreen: true,
            decorated: false,
            cursor_visible: false,
        },
        exclusive: true,
    }));

    script.clear_calls();
    assert!(resources.kill().is_clean());
    assert_eq!(script.calls().first(), Some(&Call::LeaveFullscreen));
}

#[test]
fn unsupported_fullscreen_declined_fails_without_window() {
    let script = Script::new();

    let (result, scene, asked) = setup(&script, &fullscreen_demo(), false);
    let err = result.err().unwrap();

    assert_eq!(asked, 1);
    assert!(matches!(
        err,
        SetupError::FullscreenDeclined {
            width: 800,
            height: 600,
            bits: 32
        }
    ));
    assert!(!scene.is_initialized());
    assert_eq!(script.count(|c| matches!(c, Call::CreateWindow { .. })), 0);
    assert!(script.all_released());
}

#[test]
fn unsupported_fullscreen_accepted_falls_back_to_windowed() {
    let script = Script::new();

    let (result, _, asked) = setup(&script, &fullscreen_demo(), true);
    let resources = result.unwrap();

    assert_eq!(asked, 1);
    assert!(!resources.is_fullscreen());
    assert!(script.calls().contains(&Call::CreateWindow {
        size: PhysicalSize::new(800, 600),
        style: WindowStyle::for_fullscreen(false),
        exclusive: false,
    }));

    script.clear_calls();
    resources.kill();
    assert!(!script.calls().contains(&Call::LeaveFullscreen));
}

#[test]
fn every_setup_step_failure_is_distinct_and_releases_everything() {
    let cases: [(Step, fn(&SetupError) -> bool); 8] = [
        (Step::RegisterClass, |e| matches!(e, SetupError::RegisterClass(_))),
        (Step::CreateWindow, |e| matches!(e, SetupError::CreateWindow(_))),
        (Step::AcquireSurface, |e| matches!(e, SetupError::AcquireSurface(_))),
        (Step::ChoosePixelFormat, |e| matches!(e, SetupError::ChoosePixelFormat(_))),
        (Step::SetPixelFormat, |e| matches!(e, SetupError::SetPixelFormat(_))),
        (Step::CreateContext, |e| matches!(e, SetupError::CreateContext(_))),
        (Step::MakeCurrent, |e| matches!(e, SetupError::ActivateContext(_))),
        (Step::Initialize, |e| matches!(e, SetupError::SceneInit(_))),
    ];

    for (step, is_expected) in cases {
        let script = Script::new();
        script.fail(step);

        let (result, ..) = setup(&script, &demo(), true);
        let err = result.err().unwrap();

        assert!(is_expected(&err), "{step:?} produced {err:?}");
        assert!(script.all_released(), "{step:?} leaked: {:?}", script.calls());
    }
}

#[test]
fn window_is_not_shown_when_context_fails() {
    let script = Script::new();
    script.fail(Step::CreateContext);

    let (result, ..) = setup(&script, &demo(), true);
    assert!(result.is_err());
    assert_eq!(script.count(|c| matches!(c, Call::ShowAndFocus)), 0);
}

#[test]
fn teardown_failures_do_not_stop_teardown() {
    let script = Script::new();
    script.support_mode(800, 600, 32);
    let (result, ..) = setup(&script, &fullscreen_demo(), true);
    let resources = result.unwrap();

    script.fail(Step::LeaveFullscreen);
    script.fail(Step::ReleaseContext);
    script.fail(Step::ReleaseWindow);
    script.clear_calls();

    let report = resources.kill();

    assert_eq!(report.failures.len(), 3);
    assert_eq!(
        script.calls(),
        vec![
            Call::LeaveFullscreen,
            Call::ReleaseCurrent,
            Call::ReleaseContext,
            Call::ReleaseSurface,
            Call::ReleaseWindow,
            Call::ReleaseClass,
        ]
    );
}
