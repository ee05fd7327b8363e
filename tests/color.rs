//! Validates RGBA arithmetic, HSL conversion round trips and circular
//! hue behavior

use rand::SeedableRng;
use rand::rngs::StdRng;
use rasterbloom::color::hsl::{self, Hsl, HslAverage};
use rasterbloom::color::rgba::{self, ColorAccumulator, Rgba, WHITE};

#[test]
fn test_average_of_empty_slice_is_none() {
    assert_eq!(rgba::average(&[]), None);
}

#[test]
fn test_average_is_componentwise_mean() {
    let colors = [Rgba::opaque(10, 20, 30), Rgba::opaque(30, 40, 50)];
    assert_eq!(rgba::average(&colors), Some(Rgba::opaque(20, 30, 40)));
}

#[test]
fn test_perturb_clamps_to_byte_range() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let low = rgba::perturb(Rgba::opaque(0, 0, 0), 100.0, &mut rng);
        let high = rgba::perturb(Rgba::opaque(255, 255, 255), 100.0, &mut rng);
        assert!(low.r <= 50 && low.g <= 50 && low.b <= 50);
        assert!(high.r >= 205 && high.g >= 205 && high.b >= 205);
    }
}

#[test]
fn test_perturb_with_zero_span_is_identity() {
    let mut rng = StdRng::seed_from_u64(6);
    let color = Rgba::opaque(120, 7, 250);
    assert_eq!(rgba::perturb(color, 0.0, &mut rng), color);
}

#[test]
fn test_mix_endpoints() {
    let a = Rgba::opaque(0, 100, 200);
    let b = Rgba::opaque(200, 100, 0);
    assert_eq!(rgba::mix(a, b, 0.0), a);
    assert_eq!(rgba::mix(a, b, 1.0), b);
    assert_eq!(rgba::mix(a, b, 0.5), Rgba::opaque(100, 100, 100));
}

#[test]
fn test_decay_pulls_toward_white() {
    let color = Rgba::opaque(55, 105, 155);
    assert_eq!(rgba::decay_toward_white(color, 1.0), color);
    assert_eq!(rgba::decay_toward_white(color, 0.0), WHITE);

    let halfway = rgba::decay_toward_white(color, 0.5);
    assert_eq!(halfway, Rgba::opaque(155, 180, 205));
}

#[test]
fn test_has_ink_detects_non_white() {
    assert!(!WHITE.has_ink());
    assert!(Rgba::opaque(254, 255, 255).has_ink());
    assert!(Rgba::opaque(0, 0, 0).has_ink());
}

#[test]
fn test_color_accumulator_weighted_mean() {
    let mut accumulator = ColorAccumulator::new();
    assert_eq!(accumulator.mean(), None);

    accumulator.add(Rgba::opaque(0, 0, 0), 1.0);
    accumulator.add(Rgba::opaque(90, 90, 90), 2.0);
    assert!((accumulator.total_weight() - 3.0).abs() < f64::EPSILON);
    assert_eq!(accumulator.mean(), Some(Rgba::opaque(60, 60, 60)));
}

#[test]
fn test_hsl_primaries_convert_exactly() {
    let red = hsl::hsl_to_rgba(Hsl {
        h: 0.0,
        s: 1.0,
        l: 0.5,
    });
    assert_eq!(red, Rgba::opaque(255, 0, 0));

    let green = hsl::hsl_to_rgba(Hsl {
        h: 120.0,
        s: 1.0,
        l: 0.5,
    });
    assert_eq!(green, Rgba::opaque(0, 255, 0));

    let blue = hsl::hsl_to_rgba(Hsl {
        h: 240.0,
        s: 1.0,
        l: 0.5,
    });
    assert_eq!(blue, Rgba::opaque(0, 0, 255));
}

#[test]
fn test_hsl_achromatic_round_trip() {
    let gray = hsl::rgba_to_hsl(Rgba::opaque(128, 128, 128));
    assert!(gray.s.abs() < 1e-9);
    assert!((gray.l - 128.0 / 255.0).abs() < 1e-9);

    let back = hsl::hsl_to_rgba(gray);
    assert_eq!(back, Rgba::opaque(128, 128, 128));
}

#[test]
fn test_hsl_round_trip_stays_close() {
    let samples = [
        Rgba::opaque(200, 30, 90),
        Rgba::opaque(12, 240, 100),
        Rgba::opaque(64, 64, 200),
        Rgba::opaque(255, 128, 0),
    ];
    for color in samples {
        let round_tripped = hsl::hsl_to_rgba(hsl::rgba_to_hsl(color));
        assert!(i16::from(round_tripped.r).abs_diff(i16::from(color.r)) <= 1);
        assert!(i16::from(round_tripped.g).abs_diff(i16::from(color.g)) <= 1);
        assert!(i16::from(round_tripped.b).abs_diff(i16::from(color.b)) <= 1);
    }
}

#[test]
fn test_wrap_hue_normalizes_into_circle() {
    assert!((hsl::wrap_hue(370.0) - 10.0).abs() < 1e-9);
    assert!((hsl::wrap_hue(-30.0) - 330.0).abs() < 1e-9);
    assert!(hsl::wrap_hue(360.0).abs() < 1e-9);
}

#[test]
fn test_blend_hue_takes_shorter_arc() {
    // 350 and 10 degrees meet at 0, not at 180
    let blended = hsl::blend_hue(350.0, 10.0, 0.5);
    assert!(blended < 1e-9 || blended > 359.0, "got {blended}");

    let forward = hsl::blend_hue(10.0, 350.0, 0.5);
    assert!(forward < 1e-9 || forward > 359.0, "got {forward}");

    let plain = hsl::blend_hue(40.0, 80.0, 0.5);
    assert!((plain - 60.0).abs() < 1e-9);
}

#[test]
fn test_circular_hue_mean_crosses_zero() {
    let mut average = HslAverage::default();
    average.add(Hsl {
        h: 350.0,
        s: 0.5,
        l: 0.5,
    });
    average.add(Hsl {
        h: 10.0,
        s: 0.7,
        l: 0.3,
    });

    let mean = average.mean().unwrap_or(Hsl {
        h: 180.0,
        s: 0.0,
        l: 0.0,
    });
    assert!(mean.h < 1e-6 || mean.h > 359.0, "got hue {}", mean.h);
    assert!((mean.s - 0.6).abs() < 1e-9);
    assert!((mean.l - 0.4).abs() < 1e-9);
    assert_eq!(average.count(), 2);
}
