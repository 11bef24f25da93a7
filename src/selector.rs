use rand::rngs::OsRng;
use rand::Rng;

/// Uniform sample of up to `n` ids from `pool`, without replacement.
///
/// Backed by the OS random source so assignment cannot be predicted (or
/// gamed) from observable state like the clock. A Fisher-Yates partial
/// shuffle fills the first `n` slots; each element of the pool is equally
/// likely to land in each slot.
pub fn pick_n(pool: &[String], n: usize) -> Vec<String> {
    if n == 0 || pool.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<String> = pool.to_vec();
    if out.len() <= n {
        return out;
    }
    let mut rng = OsRng;
    for i in 0..n {
        let j = rng.gen_range(i..out.len());
        out.swap(i, j);
    }
    out.truncate(n);
    out
}
