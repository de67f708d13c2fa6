use rand_mt::Mt;

/// Generates pseudo-random numbers with the same stream as numpy's legacy `RandomState`
///
/// The bit generator is the 32-bit Mersenne Twister (MT19937) initialized with
/// `init_genrand(seed)`. Uniform values use 53 random bits built from two 32-bit words
/// and normal values use the polar (Marsaglia) method, caching the second variate.
///
/// Thus, a network or a run seeded here with `seed` reproduces the numbers drawn after
/// `numpy.random.seed(seed)` by `numpy.random.rand()` and `numpy.random.normal()`.
pub struct LegacyRandom {
    /// Holds the Mersenne Twister
    mt: Mt,

    /// Holds the second variate of the last polar draw, if not consumed yet
    gauss: Option<f64>,
}

impl LegacyRandom {
    /// Allocates a new instance
    pub fn new(seed: u32) -> Self {
        LegacyRandom {
            mt: Mt::new(seed),
            gauss: None,
        }
    }

    /// Returns a uniform value in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        let a = (self.mt.next_u32() >> 5) as f64;
        let b = (self.mt.next_u32() >> 6) as f64;
        (a * 67108864.0 + b) / 9007199254740992.0
    }

    /// Returns a value from the standard normal distribution
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(value) = self.gauss.take() {
            return value;
        }
        loop {
            let x1 = 2.0 * self.uniform() - 1.0;
            let x2 = 2.0 * self.uniform() - 1.0;
            let r2 = x1 * x1 + x2 * x2;
            if r2 < 1.0 && r2 != 0.0 {
                let f = f64::sqrt(-2.0 * f64::ln(r2) / r2);
                self.gauss = Some(f * x1);
                return f * x2;
            }
        }
    }

    /// Returns a value from the normal distribution N(mean, std_dev²)
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LegacyRandom;
    use russell_chk::assert_vec_approx_eq;

    #[test]
    fn uniform_works() {
        let mut rng = LegacyRandom::new(0);
        let values: Vec<_> = (0..3).map(|_| rng.uniform()).collect();
        assert_vec_approx_eq!(values, &[0.5488135039273248, 0.7151893663724195, 0.6027633760716439], 1e-15);

        let mut rng = LegacyRandom::new(5);
        let values: Vec<_> = (0..3).map(|_| rng.uniform()).collect();
        assert_vec_approx_eq!(values, &[0.22199317108973948, 0.8707323061773764, 0.20671915533942642], 1e-15);
    }

    #[test]
    fn standard_normal_works() {
        let mut rng = LegacyRandom::new(123);
        let values: Vec<_> = (0..4).map(|_| rng.standard_normal()).collect();
        assert_vec_approx_eq!(
            values,
            &[-1.0856306033005612, 0.9973454465835858, 0.28297849805199204, -1.506294713918092],
            1e-14
        );
    }

    #[test]
    fn normal_works() {
        let mut rng = LegacyRandom::new(123);
        let values: Vec<_> = (0..2).map(|_| rng.normal(0.0002, 0.00005)).collect();
        assert_vec_approx_eq!(values, &[0.00014571846983497196, 0.0002498672723291793], 1e-18);
    }

    #[test]
    fn reseeding_reproduces_the_stream() {
        let mut a = LegacyRandom::new(340995);
        let mut b = LegacyRandom::new(340995);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }
}
