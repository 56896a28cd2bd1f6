//! Integration tests for the preloader lifecycle.
//!
//! Time is always driven by hand, mostly in 60 Hz frames, so every run is
//! deterministic for a given seed. The tick-rate section replays the same
//! runs at other fixed steps.

use nexus_particles::prelude::*;
use nexus_particles::preloader::{Mode, State};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn counted(builder: nexus_particles::PreloaderBuilder) -> (Preloader, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    let preloader = builder
        .on_complete(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .activate();
    (preloader, count)
}

/// Steps of roughly 144 Hz, 60 Hz, 30 Hz, 10 Hz and 4 Hz.
const TICK_RATES: [Duration; 5] = [
    Duration::from_micros(6_944),
    FRAME,
    Duration::from_micros(33_333),
    Duration::from_millis(100),
    Duration::from_millis(250),
];

/// Tick at a fixed step until completion, returning the elapsed time of the
/// completing tick and the time of the first explode tick.
fn completion_at(preloader: &mut Preloader, step: Duration) -> (Duration, Option<Duration>) {
    let mut explode_at = None;
    loop {
        let frame = preloader.tick(step);
        if explode_at.is_none() && frame.phase == Phase::Explode {
            explode_at = Some(preloader.elapsed());
        }
        if frame.completed {
            return (preloader.elapsed(), explode_at);
        }
        assert!(preloader.elapsed() < ms(10_000), "no completion at {:?} steps", step);
    }
}

fn run_until(preloader: &mut Preloader, until: Duration) {
    while preloader.is_running() && preloader.elapsed() < until {
        preloader.tick(FRAME);
    }
}

/// Canvas that only counts calls.
#[derive(Default)]
struct CountingCanvas {
    calls: usize,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self, _color: Vec3) {
        self.calls += 1;
    }

    fn circle(&mut self, _: Vec2, _: f32, _: NeonColor, _: f32, _: f32) {
        self.calls += 1;
    }

    fn glyph(&mut self, _: Vec2, _: &str, _: f32, _: NeonColor, _: f32, _: f32) {
        self.calls += 1;
    }
}

// ============================================================================
// Phases
// ============================================================================

#[test]
fn test_phase_never_regresses() {
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(800.0, 600.0))
        .with_seed(1)
        .activate();

    let mut last = Phase::Scatter;
    let mut seen = vec![last];
    while preloader.is_running() {
        let frame = preloader.tick(FRAME);
        assert!(frame.phase >= last, "{} after {}", frame.phase, last);
        if frame.phase != last {
            seen.push(frame.phase);
        }
        last = frame.phase;
    }
    assert_eq!(seen, vec![Phase::Scatter, Phase::Converge, Phase::Hold, Phase::Explode]);
}

#[test]
fn test_phase_offsets() {
    let timeline = Timeline::default();
    assert_eq!(timeline.phase_at(ms(799)), Phase::Scatter);
    assert_eq!(timeline.phase_at(ms(800)), Phase::Converge);
    assert_eq!(timeline.phase_at(ms(2200)), Phase::Hold);
    assert_eq!(timeline.phase_at(ms(3200)), Phase::Explode);
    assert_eq!(timeline.phase_at(ms(60_000)), Phase::Explode);
}

// ============================================================================
// Forces
// ============================================================================

#[test]
fn test_opacity_only_falls_during_explode() {
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(1024.0, 768.0))
        .with_seed(5)
        .activate();
    run_until(&mut preloader, ms(3200));

    let mut previous: Vec<f32> = preloader.particles().iter().map(|p| p.opacity).collect();
    while preloader.is_running() {
        preloader.tick(FRAME);
        if !preloader.is_running() {
            break;
        }
        assert_eq!(preloader.phase(), Phase::Explode);
        for (p, before) in preloader.particles().iter().zip(&previous) {
            assert!(p.opacity <= *before);
            assert!(p.opacity >= 0.0);
        }
        previous = preloader.particles().iter().map(|p| p.opacity).collect();
    }
}

#[test]
fn test_particles_reach_targets_by_end_of_hold() {
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(1280.0, 720.0))
        .with_seed(21)
        .activate();

    // last frame before explode
    run_until(&mut preloader, ms(3200) - FRAME);
    assert_eq!(preloader.phase(), Phase::Hold);

    let worst = preloader
        .particles()
        .iter()
        .map(|p| p.distance_to_target())
        .fold(0.0f32, f32::max);
    assert!(worst < 10.0, "worst distance {}", worst);
}

#[test]
fn test_particle_on_pointer_stays_finite() {
    let pointer = Pointer::new();
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(640.0, 480.0))
        .with_pointer(pointer.clone())
        .with_seed(8)
        .activate();
    run_until(&mut preloader, ms(900));
    assert_eq!(preloader.phase(), Phase::Converge);

    // park the pointer exactly on a particle
    pointer.set(preloader.particles()[0].position);
    for _ in 0..5 {
        preloader.tick(FRAME);
        for p in preloader.particles() {
            assert!(p.position.is_finite());
            assert!(p.velocity.is_finite());
        }
    }
}

#[test]
fn test_pointer_pushes_particle_off_target() {
    let displacement = |with_pointer: bool| {
        let pointer = Pointer::new();
        let mut preloader = Preloader::builder()
            .with_viewport(Viewport::new(800.0, 600.0))
            .with_pointer(pointer.clone())
            .with_seed(13)
            .activate();
        run_until(&mut preloader, ms(2400));
        if with_pointer {
            pointer.set(preloader.particles()[0].position + Vec2::new(3.0, 0.0));
        }
        for _ in 0..20 {
            preloader.tick(FRAME);
        }
        preloader.particles()[0].distance_to_target()
    };

    let still = displacement(false);
    let pushed = displacement(true);
    assert!(pushed > still + 5.0, "pushed {} vs {}", pushed, still);
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_full_run_completes_once() {
    let (mut preloader, count) = counted(
        Preloader::builder()
            .with_viewport(Viewport::new(1920.0, 1080.0))
            .with_seed(300),
    );
    assert_eq!(preloader.particles().len(), 300);

    let mut completed_frames = 0;
    while preloader.elapsed() < ms(3800) {
        if preloader.tick(FRAME).completed {
            completed_frames += 1;
        }
    }
    assert!(preloader.is_complete());
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(completed_frames, 1);
    assert!(preloader.particles().iter().all(|p| p.opacity <= 0.0));

    // a finished preloader ignores further time
    for _ in 0..120 {
        preloader.tick(FRAME);
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fade_out_precedes_completion() {
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(640.0, 480.0))
        .activate();
    let mut fade_at = None;
    let mut complete_at = None;
    while preloader.is_running() {
        let frame = preloader.tick(FRAME);
        for signal in frame.signals {
            match signal {
                Signal::FadeOut => fade_at = Some(preloader.elapsed()),
                Signal::Complete => complete_at = Some(preloader.elapsed()),
                _ => {}
            }
        }
    }
    let (fade_at, complete_at) = (fade_at.unwrap(), complete_at.unwrap());
    assert!(fade_at >= ms(3100) && fade_at < ms(3200));
    assert!(complete_at >= ms(3800));
    assert!(complete_at - fade_at >= ms(600));
}

#[test]
fn test_reduced_motion_completes_without_drawing() {
    let (mut preloader, count) = counted(
        Preloader::builder()
            .with_viewport(Viewport::new(1920.0, 1080.0))
            .with_reduced_motion(true),
    );
    assert_eq!(preloader.mode(), Mode::Still);
    assert!(preloader.particles().is_empty());

    let mut canvas = CountingCanvas::default();
    let first = preloader.tick(FRAME);
    assert!(first.show_text);

    while preloader.is_running() {
        preloader.tick(FRAME);
        preloader.draw(&mut canvas);
    }
    assert!(preloader.elapsed() >= ms(2100));
    assert!(preloader.elapsed() < ms(2100) + FRAME * 2);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(canvas.calls, 0);
}

#[test]
fn test_teardown_mid_converge() {
    let (mut preloader, count) = counted(
        Preloader::builder()
            .with_viewport(Viewport::new(1920.0, 1080.0))
            .with_seed(4),
    );
    run_until(&mut preloader, ms(1000));
    assert_eq!(preloader.phase(), Phase::Converge);

    preloader.teardown();
    assert_eq!(preloader.state(), State::TornDown);
    assert!(preloader.particles().is_empty());

    let elapsed = preloader.elapsed();
    for _ in 0..600 {
        let frame = preloader.tick(FRAME);
        assert!(frame.signals.is_empty());
        assert!(!frame.completed);
    }
    assert_eq!(preloader.elapsed(), elapsed);
    assert_eq!(preloader.phase(), Phase::Converge);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_drop_never_fires() {
    let (mut preloader, count) = counted(
        Preloader::builder()
            .with_viewport(Viewport::new(320.0, 240.0))
            .with_seed(2),
    );
    run_until(&mut preloader, ms(3700));
    drop(preloader);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_instances_are_independent() {
    let (mut a, count_a) = counted(Preloader::builder().with_viewport(Viewport::new(400.0, 300.0)).with_seed(1));
    let (mut b, count_b) = counted(Preloader::builder().with_viewport(Viewport::new(400.0, 300.0)).with_seed(1));

    run_until(&mut a, ms(1500));
    b.teardown();
    run_until(&mut a, ms(4000));

    assert_eq!(count_a.load(Ordering::SeqCst), 1);
    assert_eq!(count_b.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_draw_skips_dead_particles() {
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(400.0, 300.0))
        .with_seed(17)
        .activate();

    let mut canvas = CountingCanvas::default();
    preloader.tick(FRAME);
    preloader.draw(&mut canvas);
    assert_eq!(canvas.calls, 1 + 300);

    run_until(&mut preloader, ms(3700));
    assert!(preloader.is_running());
    let alive = preloader.particles().iter().filter(|p| p.opacity > 0.0).count();
    let mut canvas = CountingCanvas::default();
    preloader.draw(&mut canvas);
    assert_eq!(canvas.calls, 1 + alive);
}

#[test]
fn test_raster_snapshot_of_hold_has_color() {
    let mut preloader = Preloader::builder()
        .with_viewport(Viewport::new(200.0, 200.0))
        .with_seed(6)
        .activate();
    run_until(&mut preloader, ms(3000));

    let mut canvas = RasterCanvas::new(200, 200);
    preloader.draw(&mut canvas);
    let background = canvas.image().get_pixel(0, 0).0;
    let lit = canvas.image().pixels().filter(|p| p.0 != background).count();
    assert!(lit > 100, "only {} lit pixels", lit);
}

// ============================================================================
// Tick Rates
// ============================================================================

#[test]
fn test_completion_offset_holds_at_any_tick_rate() {
    for step in TICK_RATES {
        let (mut preloader, count) = counted(
            Preloader::builder()
                .with_viewport(Viewport::new(1280.0, 720.0))
                .with_seed(11),
        );
        let (complete_at, explode_at) = completion_at(&mut preloader, step);

        assert!(
            complete_at >= ms(3800) && complete_at < ms(3800) + step,
            "completed at {:?} with {:?} steps",
            complete_at,
            step
        );
        let explode_at = explode_at.unwrap();
        assert!(
            explode_at >= ms(3200) && explode_at < ms(3200) + step,
            "exploded at {:?} with {:?} steps",
            explode_at,
            step
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_coarse_ticks_complete_on_schedule() {
    let (mut preloader, count) = counted(
        Preloader::builder()
            .with_viewport(Viewport::new(800.0, 600.0))
            .with_seed(3),
    );
    let mut ticks = 0;
    while preloader.is_running() {
        preloader.tick(ms(100));
        ticks += 1;
    }
    assert_eq!(ticks, 38);
    assert_eq!(preloader.elapsed(), ms(3800));
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let (mut still, count) = counted(Preloader::builder().with_reduced_motion(true));
    let mut ticks = 0;
    while still.is_running() {
        still.tick(ms(250));
        ticks += 1;
    }
    assert_eq!(ticks, 9);
    assert_eq!(still.elapsed(), ms(2250));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reduced_motion_offset_holds_at_any_tick_rate() {
    for step in TICK_RATES {
        let mut preloader = Preloader::builder().with_reduced_motion(true).activate();
        let (complete_at, _) = completion_at(&mut preloader, step);
        assert!(
            complete_at >= ms(2100) && complete_at < ms(2100) + step,
            "completed at {:?} with {:?} steps",
            complete_at,
            step
        );
    }
}

#[test]
fn test_convergence_holds_at_any_display_rate() {
    // 144 Hz, 60 Hz and 30 Hz; all below the integration cap
    for step in &TICK_RATES[..3] {
        let step = *step;
        let mut preloader = Preloader::builder()
            .with_viewport(Viewport::new(1280.0, 720.0))
            .with_seed(21)
            .activate();
        // last tick before explode
        while preloader.elapsed() + step < ms(3200) {
            preloader.tick(step);
        }
        assert_eq!(preloader.phase(), Phase::Hold);

        let worst = preloader
            .particles()
            .iter()
            .map(|p| p.distance_to_target())
            .fold(0.0f32, f32::max);
        assert!(worst < 10.0, "worst distance {} with {:?} steps", worst, step);
    }
}
