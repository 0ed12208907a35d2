use num::Float;

/// L2ノルム
///
/// # Arguments
/// * `vec` - dense vector
///
/// # Returns
/// * `N` - euclidean length, 0 for the empty or zero vector
#[inline]
pub fn l2_norm<N>(vec: &[N]) -> N
where
    N: Float,
{
    vec.iter()
        .fold(N::zero(), |acc, &v| acc + v * v)
        .sqrt()
}

/// Scale a vector to unit length in place.
/// A zero vector is left untouched.
///
/// # Returns
/// * `N` - the norm before scaling
#[inline]
pub fn normalize<N>(vec: &mut [N]) -> N
where
    N: Float,
{
    let norm = l2_norm(vec);
    if norm > N::zero() {
        vec.iter_mut().for_each(|v| *v = *v / norm);
    }
    norm
}

/// ドット積
///
/// The shorter vector is treated as zero-padded, so only the common prefix contributes.
#[inline]
pub fn dot<N>(a: &[N], b: &[N]) -> N
where
    N: Float,
{
    a.iter()
        .zip(b.iter())
        .fold(N::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Cosine similarity
///
/// Vectors of different length are compared as if the shorter one were zero-padded,
/// e.g. vectors embedded before and after a refit.
///
/// # Returns
/// * `N` - in `[-1, 1]`, 0 when either side is a zero vector
#[inline]
pub fn cosine_similarity<N>(a: &[N], b: &[N]) -> N
where
    N: Float,
{
    let denom = l2_norm(a) * l2_norm(b);
    if denom > N::zero() {
        dot(a, b) / denom
    } else {
        N::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_of_3_4_is_5() {
        assert_eq!(l2_norm(&[3.0f64, 4.0]), 5.0);
        assert_eq!(l2_norm::<f32>(&[]), 0.0);
    }

    #[test]
    fn normalize_makes_unit_length() {
        let mut v = vec![3.0f32, 0.0, 4.0];
        let before = normalize(&mut v);
        assert_eq!(before, 5.0);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[2] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_leaves_zero_vector() {
        let mut v = vec![0.0f64; 4];
        assert_eq!(normalize(&mut v), 0.0);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn cosine_basics() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 2.0];
        let c = [2.0f32, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert!((cosine_similarity(&a, &c) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0]), 0.0);
        assert_eq!(dot(&a, &c), 2.0);
    }

    #[test]
    fn mismatched_lengths_compare_as_zero_padded() {
        let long = [1.0f32, 0.0, 0.0];
        let short = [1.0f32, 0.0];
        assert_eq!(dot(&long, &short), 1.0);
        assert!((cosine_similarity(&long, &short) - 1.0).abs() < 1e-6);

        // the extra component only adds to the longer side's norm
        let a = [3.0f64, 4.0];
        let b = [3.0f64];
        assert_eq!(dot(&a, &b), 9.0);
        assert!((cosine_similarity(&a, &b) - 0.6).abs() < 1e-12);
        assert_eq!(cosine_similarity::<f64>(&[], &[1.0]), 0.0);
    }
}
