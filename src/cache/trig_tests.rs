use super::*;

const EPSILON: f64 = 1e-10;

fn assert_feq(a: f64, b: f64) {
    assert!((a - b).abs() < EPSILON, "Float mismatch: {} vs {}", a, b);
}

#[test]
fn test_twiddles_8() {
    // k=1: exp(-j*pi/4) = sqrt(2)/2 - j*sqrt(2)/2
    // k=3: exp(-j*3*pi/4) = -sqrt(2)/2 - j*sqrt(2)/2
    let sqrt2_2 = core::f64::consts::FRAC_1_SQRT_2;
    let (c, s) = twiddle(1, 8);
    assert_feq(c, sqrt2_2);
    assert_feq(s, -sqrt2_2);
    let (c, s) = twiddle(3, 8);
    assert_feq(c, -sqrt2_2);
    assert_feq(s, -sqrt2_2);
}

#[test]
fn test_quarter_turns_are_exact() {
    let cache = TrigFactorCache::default();
    for n in [4usize, 8, 64, 4096, 1 << 14] {
        for forward in [true, false] {
            assert_eq!(cache.get_cos(n, 0, forward), 1.0);
            assert_eq!(cache.get_sin(n, 0, forward), 0.0);
            assert_eq!(cache.get_cos(n, n / 2, forward), -1.0);
            assert_eq!(cache.get_sin(n, n / 2, forward), 0.0);
            assert_eq!(cache.get_cos(n, n / 4, forward), 0.0);
        }
        assert_eq!(cache.get_sin(n, n / 4, true), -1.0);
        assert_eq!(cache.get_sin(n, n / 4, false), 1.0);
    }
}

#[test]
fn test_cached_values_match_direct_evaluation() {
    let cache = TrigFactorCache::default();
    for &n in &cache.config().hot_sizes.clone() {
        assert!(cache.is_precomputed(n));
        for k in 0..n {
            let angle = 2.0 * core::f64::consts::PI * (k as f64) / (n as f64);
            assert_feq(cache.get_cos(n, k, true), (-angle).cos());
            assert_feq(cache.get_sin(n, k, true), (-angle).sin());
            assert_feq(cache.get_cos(n, k, false), angle.cos());
            assert_feq(cache.get_sin(n, k, false), angle.sin());
        }
    }
}

#[test]
fn test_conjugate_symmetry_and_periodicity() {
    let table = TrigTable::new(256);
    for k in 1..256 {
        assert_eq!(table.cos(256 - k), table.cos(k));
        assert_eq!(table.sin(256 - k), -table.sin(k));
        assert_eq!(table.cos(k + 256), table.cos(k));
        assert_eq!(table.sin(k + 3 * 256), table.sin(k));
    }
}

#[test]
fn test_direction_flips_sine_only() {
    let twiddles = Twiddles::Table(Arc::new(TrigTable::new(32)));
    for k in 0..32 {
        assert_eq!(twiddles.cos(k, true), twiddles.cos(k, false));
        assert_eq!(twiddles.sin(k, true), -twiddles.sin(k, false));
        assert_eq!(twiddles.factor(k, false), twiddles.factor(k, true).conj());
    }
}

#[test]
fn test_uncached_sizes_fall_back_to_identical_values() {
    let uncached = TrigFactorCache::new(CacheConfig::uncached());
    let cached = TrigFactorCache::default();

    let direct = uncached.factors(512);
    assert!(!direct.is_table());
    assert!(!uncached.is_precomputed(512));

    let table = cached.factors(512);
    assert!(table.is_table());
    for k in 0..512 {
        assert_eq!(direct.factor(k, true), table.factor(k, true));
    }
}

#[test]
fn test_lazy_sizes_are_cached_on_first_use() {
    let cache = TrigFactorCache::default();
    assert!(!cache.is_precomputed(1 << 13));
    let _ = cache.get_cos(1 << 13, 5, true);
    assert!(cache.is_precomputed(1 << 13));
}

#[test]
fn test_get_is_total() {
    let cache = TrigFactorCache::default();
    // Non-power-of-two sizes are evaluated directly and never cached.
    assert_feq(cache.get_cos(12, 3, true), 0.0);
    assert_feq(cache.get_sin(12, 3, true), -1.0);
    assert!(!cache.is_precomputed(12));
    assert_eq!(cache.get_cos(0, 7, true), 1.0);
    assert_eq!(cache.get_sin(0, 7, false), 0.0);
}

#[test]
fn test_clear_and_init() {
    let cache = TrigFactorCache::default();
    assert!(cache.is_precomputed(8));
    cache.clear();
    assert!(!cache.is_precomputed(8));
    assert_eq!(cache.stats().total(), 0);
    cache.init();
    assert!(cache.is_precomputed(4096));
}

#[test]
fn test_empty_table_matches_zero_size_twiddle() {
    let table = TrigTable::new(0);
    assert!(table.is_empty());
    assert_eq!((table.cos(3), table.sin(3)), twiddle(3, 0));

    let twiddles = Twiddles::Table(Arc::new(table));
    assert_eq!(twiddles.factor(5, false), Complex64::new(1.0, -0.0));
}
