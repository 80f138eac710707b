use approx::assert_relative_eq;
use qshift_quantile_map::{Inversion, QmConfig, QuantileMapError, QuantileMapper};
use qshift_spline::{Knot, MonotoneSpline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal as NormalSampler};
use statrs::distribution::{ContinuousCDF, Gamma, Normal};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// CDF knots on an even grid over `[lo, hi]`, pinned to exactly 0 and 1 at
/// the ends like a normalized cumulative histogram.
fn cdf_knots(cdf: impl Fn(f64) -> f64, lo: f64, hi: f64, n: usize) -> Vec<Knot> {
    (0..n)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / (n - 1) as f64;
            let y = match i {
                0 => 0.0,
                _ if i == n - 1 => 1.0,
                _ => cdf(x),
            };
            Knot::new(x, y)
        })
        .collect()
}

/// Normal CDF spline over mean ± 5 sd.
///
/// Knots sit at the same standardized positions for every (mean, sd), so the
/// exact mapping between two such splines is `x -> m2 + s2 * (x - m1) / s1`.
fn normal_cdf(mean: f64, sd: f64) -> MonotoneSpline {
    normal_cdf_with_knots(mean, sd, 101)
}

fn normal_cdf_with_knots(mean: f64, sd: f64, n: usize) -> MonotoneSpline {
    let dist = Normal::new(mean, sd).expect("valid normal");
    MonotoneSpline::new(cdf_knots(
        |x| dist.cdf(x),
        mean - 5.0 * sd,
        mean + 5.0 * sd,
        n,
    ))
    .expect("valid knots")
}

fn gamma_cdf(shape: f64, rate: f64, hi: f64) -> MonotoneSpline {
    let dist = Gamma::new(shape, rate).expect("valid gamma");
    MonotoneSpline::new(cdf_knots(|x| dist.cdf(x), 0.0, hi, 80)).expect("valid knots")
}

fn uniform_values(lo: f64, hi: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(lo..hi)).collect()
}

fn mean_and_sd(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

// ---------------------------------------------------------------------------
// 1. identity_round_trip
// ---------------------------------------------------------------------------
#[test]
fn identity_round_trip() {
    let mapper =
        QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(0.0, 1.0), QmConfig::new()).unwrap();

    let values = uniform_values(-4.5, 4.5, 500, 42);
    let errors: Vec<f64> = values
        .iter()
        .map(|&v| (mapper.shift(v) - v).abs())
        .collect();

    let mae = errors.iter().sum::<f64>() / errors.len() as f64;
    let max = errors.iter().cloned().fold(0.0, f64::max);
    assert!(mae < 1e-4, "identity mapping MAE too large: {mae}");
    assert!(max < 1e-3, "identity mapping max error too large: {max}");
}

// ---------------------------------------------------------------------------
// 2. affine_normal_mapping
// ---------------------------------------------------------------------------
#[test]
fn affine_normal_mapping() {
    let mapper =
        QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(1.0, 1.5), QmConfig::new()).unwrap();

    for v in uniform_values(-4.0, 4.0, 300, 7) {
        let expected = 1.0 + 1.5 * v;
        assert_relative_eq!(mapper.shift(v), expected, epsilon = 2e-3);
    }
}

// ---------------------------------------------------------------------------
// 3. corrected_samples_follow_target
// ---------------------------------------------------------------------------
#[test]
fn corrected_samples_follow_target() {
    let mapper =
        QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(1.0, 1.5), QmConfig::new()).unwrap();

    let mut rng = StdRng::seed_from_u64(123);
    let sampler = NormalSampler::new(0.0, 1.0).unwrap();
    let measured: Vec<f64> = (0..5000).map(|_| sampler.sample(&mut rng)).collect();

    let corrected = mapper.shift_all(&measured);
    let (mean, sd) = mean_and_sd(&corrected);

    assert!((mean - 1.0).abs() < 0.1, "corrected mean should be ~1.0, got {mean:.4}");
    assert!((sd - 1.5).abs() < 0.1, "corrected sd should be ~1.5, got {sd:.4}");
}

// ---------------------------------------------------------------------------
// 4. range_preservation
// ---------------------------------------------------------------------------
#[test]
fn range_preservation() {
    let target = gamma_cdf(2.0, 0.5, 30.0);
    let (t_min, t_max) = target.domain();

    for threshold in [0.0, 0.05] {
        let config = QmConfig::new().with_linear_interpolation_threshold(threshold);
        let mapper = QuantileMapper::new(normal_cdf(0.0, 1.0), target.clone(), config).unwrap();
        for v in uniform_values(-5.0, 5.0, 1000, 99) {
            let mapped = mapper.shift(v);
            assert!(
                (t_min..=t_max).contains(&mapped),
                "shift({v}) = {mapped} outside target domain [{t_min}, {t_max}] (threshold {threshold})"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// 5. out_of_domain_passthrough
// ---------------------------------------------------------------------------
#[test]
fn out_of_domain_passthrough() {
    let mapper =
        QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(1.0, 1.5), QmConfig::new()).unwrap();

    for v in [-5.000_001, -100.0, 5.000_001, 1e300, f64::NEG_INFINITY] {
        let s = mapper.map(v);
        assert_eq!(s.value, v);
        assert_eq!(s.inversion, Inversion::PassThrough);
    }
}

// ---------------------------------------------------------------------------
// 6. monotonicity
// ---------------------------------------------------------------------------
#[test]
fn monotonicity() {
    // Coarser knot grid than the source, so the mapping is not affine.
    let target = normal_cdf_with_knots(2.0, 0.7, 41);
    for config in [
        QmConfig::new(),
        QmConfig::new().with_use_bisect(true),
        QmConfig::new().with_linear_interpolation_threshold(0.02),
    ] {
        let mapper = QuantileMapper::new(normal_cdf(0.0, 1.0), target.clone(), config).unwrap();
        let grid: Vec<f64> = (0..=200).map(|i| -5.0 + 10.0 * i as f64 / 200.0).collect();
        let mapped = mapper.shift_all(&grid);
        for (i, pair) in mapped.windows(2).enumerate() {
            assert!(
                pair[0] <= pair[1],
                "rank violation at {}: shift({}) = {} > shift({}) = {}",
                i,
                grid[i],
                pair[0],
                grid[i + 1],
                pair[1]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// 7. bisection_agrees_with_newton
// ---------------------------------------------------------------------------
#[test]
fn bisection_agrees_with_newton() {
    let source = normal_cdf(0.0, 1.0);
    let target = normal_cdf(1.0, 1.5);
    let bracket_width = target.knot(1).x - target.knot(0).x;

    let newton = QuantileMapper::new(source.clone(), target.clone(), QmConfig::new()).unwrap();
    let bisect =
        QuantileMapper::new(source, target, QmConfig::new().with_use_bisect(true)).unwrap();

    for v in uniform_values(-4.5, 4.5, 400, 2024) {
        let n = newton.map(v);
        let b = bisect.map(v);
        assert_eq!(b.inversion, Inversion::Bisection);
        assert!(
            (n.value - b.value).abs() <= bracket_width / 32.0,
            "shift({v}): newton {} vs bisection {} differ by more than {}",
            n.value,
            b.value,
            bracket_width / 32.0
        );
    }
}

// ---------------------------------------------------------------------------
// 8. negative_threshold_rejected
// ---------------------------------------------------------------------------
#[test]
fn negative_threshold_rejected() {
    let mapper =
        QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(1.0, 1.5), QmConfig::new()).unwrap();
    let result = mapper.shift_with_threshold(0.3, -0.1);
    assert!(
        matches!(result, Err(QuantileMapError::InvalidThreshold { .. })),
        "expected InvalidThreshold, got {result:?}"
    );
}

// ---------------------------------------------------------------------------
// 9. three_knot_boundary_case
// ---------------------------------------------------------------------------
#[test]
fn three_knot_boundary_case() {
    let source = MonotoneSpline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.5, 1.0]).unwrap();
    let target = MonotoneSpline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.3, 1.0]).unwrap();
    assert_relative_eq!(source.evaluate(1.0), 0.5);

    let mapper = QuantileMapper::new(source, target, QmConfig::new()).unwrap();
    let s = mapper.map(1.0);

    assert_eq!(s.inversion, Inversion::Newton);
    assert!(s.value > 1.0 && s.value < 2.0, "got {}", s.value);
    assert_relative_eq!(mapper.target().evaluate(s.value), 0.5, epsilon = 1e-2);
}

// ---------------------------------------------------------------------------
// 10. tail_linearization_boundaries
// ---------------------------------------------------------------------------
#[test]
fn tail_linearization_boundaries() {
    let config = QmConfig::new().with_linear_interpolation_threshold(0.05);
    let mapper = QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(1.0, 1.5), config).unwrap();

    let low = mapper.map(-5.0);
    assert_eq!(low.inversion, Inversion::TailLinear);
    assert_eq!(low.value, -6.5);

    let high = mapper.map(5.0);
    assert_eq!(high.inversion, Inversion::TailLinear);
    assert_eq!(high.value, 8.5);

    // Centre of the distribution still uses the cubic inversion.
    assert_eq!(mapper.map(0.2).inversion, Inversion::Newton);
}

// ---------------------------------------------------------------------------
// 11. zero_threshold_reproduces_plain_mapping
// ---------------------------------------------------------------------------
#[test]
fn zero_threshold_reproduces_plain_mapping() {
    let plain =
        QuantileMapper::new(normal_cdf(0.0, 1.0), gamma_cdf(2.0, 0.5, 30.0), QmConfig::new())
            .unwrap();

    for v in uniform_values(-5.0, 5.0, 200, 5) {
        let s = plain.map(v);
        assert_ne!(s.inversion, Inversion::TailLinear);
        assert_eq!(plain.shift_with_threshold(v, 0.0).unwrap(), s.value);
    }
}

// ---------------------------------------------------------------------------
// 12. concurrent_shifts_match_sequential
// ---------------------------------------------------------------------------
#[test]
fn concurrent_shifts_match_sequential() {
    let mapper =
        QuantileMapper::new(normal_cdf(0.0, 1.0), normal_cdf(1.0, 1.5), QmConfig::new()).unwrap();
    let values = uniform_values(-6.0, 6.0, 4000, 31);
    let sequential: Vec<f64> = values.iter().map(|&v| mapper.shift(v)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = values
            .chunks(1000)
            .map(|chunk| scope.spawn(|| chunk.iter().map(|&v| mapper.shift(v)).collect::<Vec<_>>()))
            .collect();
        let threaded: Vec<f64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker panicked"))
            .collect();
        assert_eq!(threaded, sequential);
    });

    assert_eq!(mapper.shift_all(&values), sequential);
}
