//! Integration tests for the star field.
//!
//! These drive the public API the way a host does: update, render, and
//! reconcile, checking the behavioral guarantees of each step.

use glam::Vec2;
use startravel::spawn::{MAX_SPEED, MIN_SPEED};
use startravel::{
    Bounds, Canvas, DrawPrimitive, FieldSettings, FrameConfig, Particle, ResizePolicy, Rgb,
    SpawnContext, SpeedRange, StarField,
};

const COLOR: Rgb = Rgb::new(180, 220, 255);

fn settings() -> FieldSettings {
    FieldSettings {
        bounds: Bounds::new(1200, 1200),
        color: Some(COLOR),
        seed: Some(1234),
        ..Default::default()
    }
}

fn field_with(count: usize) -> StarField {
    let s = settings();
    StarField::new(s, count, s.bounds.center())
}

fn parallax_on() -> FrameConfig {
    FrameConfig {
        parallax_enabled: true,
        ..Default::default()
    }
}

fn lines(prims: &[DrawPrimitive]) -> usize {
    prims.iter().filter(|p| p.is_line()).count()
}

// ============================================================================
// Spawning
// ============================================================================

#[test]
fn test_spawn_directions_are_uniform() {
    const BUCKETS: usize = 16;
    const SAMPLES: usize = 16_000;

    let mut ctx = SpawnContext::seeded(99, SpeedRange::default());
    let mut counts = [0usize; BUCKETS];
    for _ in 0..SAMPLES {
        let p = Particle::spawn(Vec2::ZERO, &mut ctx);
        let angle = p.velocity.y.atan2(p.velocity.x).rem_euclid(std::f32::consts::TAU);
        let bucket = ((angle / std::f32::consts::TAU) * BUCKETS as f32) as usize;
        counts[bucket.min(BUCKETS - 1)] += 1;
    }

    let expected = SAMPLES as f32 / BUCKETS as f32;
    let chi2: f32 = counts
        .iter()
        .map(|&c| {
            let d = c as f32 - expected;
            d * d / expected
        })
        .sum();

    // 15 degrees of freedom, p = 0.001
    assert!(chi2 < 37.7, "chi-squared {chi2} for buckets {counts:?}");
}

#[test]
fn test_spawn_speed_within_range() {
    let mut ctx = SpawnContext::seeded(5, SpeedRange::default());
    for _ in 0..10_000 {
        let p = Particle::spawn(Vec2::new(600.0, 600.0), &mut ctx);
        let speed = p.speed();
        assert!(
            speed >= MIN_SPEED - 1e-4 && speed <= MAX_SPEED + 1e-4,
            "speed {speed} out of range"
        );
        assert_eq!(p.position, Vec2::new(600.0, 600.0));
    }
}

// ============================================================================
// Motion
// ============================================================================

#[test]
fn test_acceleration_increases_speed() {
    let mut field = field_with(200);
    let config = FrameConfig {
        acceleration_percent: 50.0,
        ..Default::default()
    };

    let before: Vec<f32> = field.particles().iter().map(Particle::speed).collect();
    // One step cannot push a star from the center off a 1200px field
    field.update(&config, field.center());
    for (p, old) in field.particles().iter().zip(before) {
        assert!(p.speed() > old, "speed {} did not grow from {}", p.speed(), old);
    }
}

#[test]
fn test_zero_acceleration_keeps_velocity() {
    let mut field = field_with(200);
    let config = FrameConfig {
        acceleration_percent: 0.0,
        ..Default::default()
    };

    let before: Vec<Vec2> = field.particles().iter().map(|p| p.velocity).collect();
    for _ in 0..10 {
        field.update(&config, field.center());
    }
    for (p, old) in field.particles().iter().zip(before) {
        assert_eq!(p.velocity, old);
    }
}

#[test]
fn test_position_advances_by_velocity_before_scaling() {
    let mut p = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, 0.0));
    p.advance(100.0);
    assert_eq!(p.position, Vec2::new(12.0, 10.0));
    assert!((p.velocity.x - 2.2).abs() < 1e-5);
}

#[test]
fn test_star_leaving_screen_respawns_at_origin() {
    let mut field = field_with(10);
    field.particles_mut()[4] = Particle::new(Vec2::new(1201.0, 600.0), Vec2::new(1.0, 0.0));

    let origin = field.center();
    field.update(&FrameConfig::default(), origin);

    let p = field.particles()[4];
    assert_eq!(p.position, origin);
    assert!(SpeedRange::default().contains(p.speed()));
}

#[test]
fn test_stars_eventually_recycle() {
    let mut field = field_with(100);
    let config = FrameConfig::default();
    for _ in 0..2_000 {
        field.update(&config, field.center());
        assert!(field
            .particles()
            .iter()
            .all(|p| !p.is_out_of_bounds(field.bounds())));
    }
    assert_eq!(field.len(), 100);
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_count_invariant() {
    let config = FrameConfig {
        acceleration_percent: 100.0,
        ..Default::default()
    };
    for n in [10usize, 11, 500, 2999, 3000] {
        let mut field = field_with(n);
        for _ in 0..300 {
            field.update(&config, field.center());
        }
        assert_eq!(field.len(), n);
        assert_eq!(field.render(&config).iter().filter(|p| p.is_point()).count(), n);
    }
}

#[test]
fn test_reconcile_tracks_requested_count() {
    for policy in [ResizePolicy::Regenerate, ResizePolicy::Incremental] {
        let s = FieldSettings {
            resize: policy,
            ..settings()
        };
        let mut field = StarField::new(s, 100, s.bounds.center());
        for n in [3000usize, 10, 10, 777] {
            field.reconcile(n, field.center());
            assert_eq!(field.len(), n, "{policy:?}");
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_tail_is_capped() {
    let mut field = field_with(1);
    let config = FrameConfig {
        max_tail_length: 20.0,
        ..parallax_on()
    };
    // |v| = 50, so the uncapped tail would be 250
    field.particles_mut()[0] = Particle::new(Vec2::new(1100.0, 600.0), Vec2::new(30.0, 40.0));

    let tail = field.tail(&field.particles()[0], &config).unwrap();
    assert!((tail.length() - 20.0).abs() < 1e-3);

    let prims = field.render(&config);
    assert_eq!(
        prims,
        vec![
            DrawPrimitive::Point { x: 1100, y: 600, color: COLOR },
            DrawPrimitive::Line { x1: 1100, y1: 600, x2: 1088, y2: 584, color: COLOR },
        ]
    );
}

#[test]
fn test_short_tail_follows_speed() {
    let mut field = field_with(1);
    field.particles_mut()[0] = Particle::new(Vec2::new(1100.0, 600.0), Vec2::new(1.0, 0.0));
    let tail = field.tail(&field.particles()[0], &parallax_on()).unwrap();
    assert!((tail.length() - 5.0).abs() < 1e-4);
}

#[test]
fn test_no_tails_when_parallax_disabled() {
    let mut field = field_with(200);
    let config = FrameConfig::default();
    for _ in 0..300 {
        field.update(&config, field.center());
    }
    assert_eq!(lines(&field.render(&config)), 0);
}

#[test]
fn test_no_tails_inside_threshold() {
    let mut field = field_with(2);
    let config = parallax_on();
    let threshold = field.parallax_threshold(&config);
    let center = field.center();

    field.particles_mut()[0] = Particle::new(center + Vec2::new(threshold - 1.0, 0.0), Vec2::X);
    field.particles_mut()[1] = Particle::new(center + Vec2::new(0.0, threshold + 1.0), Vec2::Y);

    let prims = field.render(&config);
    assert_eq!(prims.len(), 3);
    assert_eq!(lines(&prims), 1);
}

#[test]
fn test_threshold_measured_from_center_when_following_pointer() {
    let mut field = field_with(1);
    let config = FrameConfig {
        origin_mode: startravel::OriginMode::FollowPointer,
        ..parallax_on()
    };
    // Right next to the pointer but far from the center
    let pointer = Vec2::new(1150.0, 1150.0);
    field.particles_mut()[0] = Particle::new(pointer + Vec2::ONE, Vec2::ONE);
    assert!(field.tail(&field.particles()[0], &config).is_some());
}

#[test]
fn test_stationary_star_has_no_tail() {
    let mut field = field_with(1);
    field.particles_mut()[0] = Particle::new(Vec2::new(1100.0, 600.0), Vec2::ZERO);

    let prims = field.render(&parallax_on());
    assert_eq!(prims, vec![DrawPrimitive::Point { x: 1100, y: 600, color: COLOR }]);
}

#[test]
fn test_render_is_idempotent() {
    let mut field = field_with(300);
    let config = parallax_on();
    for _ in 0..120 {
        field.update(&config, field.center());
    }
    let first = field.render(&config);
    let second = field.render(&config);
    assert_eq!(first, second);
    assert!(first.iter().all(|p| p.color() == COLOR));
}

#[test]
fn test_frame_rasterizes_onto_canvas() {
    let mut field = field_with(50);
    let config = parallax_on();
    for _ in 0..150 {
        field.update(&config, field.center());
    }

    let bounds = field.bounds();
    let mut canvas = Canvas::new(bounds.width, bounds.height);
    canvas.draw_all(&field.render(&config));

    for p in field.particles() {
        let x = p.position.x.round() as i32;
        let y = p.position.y.round() as i32;
        if let Some(color) = canvas.pixel(x, y) {
            assert_eq!(color, COLOR);
        }
    }
}
