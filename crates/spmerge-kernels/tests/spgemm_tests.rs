use spmerge_core::{Csr, Error};
use spmerge_kernels::*;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * (1.0 + a.abs().max(b.abs()))
}

fn dense_matmul(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut c = vec![0.0f64; m * n];
    for i in 0..m {
        for p in 0..k {
            let aip = a[i * k + p];
            if aip == 0.0 {
                continue;
            }
            for j in 0..n {
                c[i * n + j] += aip * b[p * n + j];
            }
        }
    }
    c
}

fn assert_sorted_unique(c: &Csr<f64, i64>) {
    for i in 0..c.nrows {
        let (cols, _) = c.row(i);
        assert!(cols.windows(2).all(|w| w[0] < w[1]), "row {i} not strictly increasing: {cols:?}");
    }
}

fn simple_pair() -> (Csr<f64, i64>, Csr<f64, i64>) {
    // A = [[2,0,3],
    //      [0,0,0],
    //      [0,1,0]]
    let a = Csr::from_parts(3, 3, vec![0i64, 2, 2, 3], vec![0i64, 2, 1], vec![2.0, 3.0, 1.0], true).unwrap();
    // B = [[0,5,0,0],
    //      [7,0,0,0],
    //      [0,4,0,1]]
    let b = Csr::from_parts(3, 4, vec![0i64, 1, 2, 4], vec![1i64, 0, 1, 3], vec![5.0, 7.0, 4.0, 1.0], true).unwrap();
    (a, b)
}

#[test]
fn test_spgemm_basic() {
    let (a, b) = simple_pair();
    let c = spgemm_f64_i64(&a, &b).unwrap();
    assert_eq!(c.shape(), (3, 4));
    assert_eq!(c.indptr, vec![0i64, 2, 2, 3]);
    assert_eq!(c.indices, vec![1i64, 3, 0]);
    assert_eq!(c.data, vec![22.0, 3.0, 7.0]);
    assert!(c.validate().is_ok());
}

#[test]
fn test_spgemm_shape_mismatch() {
    let (a, _) = simple_pair();
    let b = Csr::zeros(4, 2);
    let err = spgemm_f64_i64(&a, &b).unwrap_err();
    assert_eq!(err, Error::ShapeMismatch { lhs: (3, 3), rhs: (4, 2) });
}

#[test]
fn test_spgemm_validation_rejects_bad_operand() {
    let (a, _) = simple_pair();
    // unsorted row slipped past an unchecked constructor
    let b = Csr::from_parts(3, 4, vec![0i64, 2, 2, 2], vec![3i64, 1], vec![1.0, 1.0], false).unwrap();
    let cfg = SpgemmConfig::default().with_validation(true);
    let err = spgemm_with_config_f64_i64(&a, &b, &cfg).unwrap_err();
    assert_eq!(err, Error::UnsortedColumns { row: 0 });
}

#[test]
fn test_spgemm_empty_operands() {
    let a = Csr::zeros(5, 3);
    let b = Csr::zeros(3, 7);
    let c = spgemm_f64_i64(&a, &b).unwrap();
    assert_eq!(c.shape(), (5, 7));
    assert_eq!(c.nnz(), 0);
    assert_eq!(c.indptr, vec![0i64; 6]);

    let z = spgemm_f64_i64(&Csr::zeros(0, 0), &Csr::zeros(0, 0)).unwrap();
    assert_eq!(z.indptr, vec![0i64]);
}

#[test]
fn test_symbolic_then_numeric() {
    let (a, b) = simple_pair();
    let cfg = SpgemmConfig::sequential();
    let indptr = spgemm_symbolic_f64_i64(&a, &b, &cfg).unwrap();
    assert_eq!(indptr, vec![0i64, 2, 2, 3]);
    let c = spgemm_numeric_f64_i64(&a, &b, indptr, &cfg).unwrap();
    assert_eq!(c, spgemm_f64_i64(&a, &b).unwrap());
}

#[test]
fn test_numeric_rejects_malformed_indptr() {
    let (a, b) = simple_pair();
    let cfg = SpgemmConfig::default();
    let err = spgemm_numeric_f64_i64(&a, &b, vec![0i64, 2], &cfg).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { what: "indptr", .. }));
    let err = spgemm_numeric_f64_i64(&a, &b, vec![0i64, 2, 1, 3], &cfg).unwrap_err();
    assert!(err.to_string().contains("non-decreasing"));
}

#[test]
#[should_panic(expected = "merged length disagrees")]
fn test_numeric_panics_on_stale_indptr() {
    let (a, b) = simple_pair();
    let _ = spgemm_numeric_f64_i64(&a, &b, vec![0i64, 3, 3, 4], &SpgemmConfig::sequential());
}

fn banded(n: usize, half_width: usize, seed: u64) -> Csr<f64, i64> {
    let mut state = seed;
    let mut indptr = vec![0i64];
    let mut indices = Vec::new();
    let mut data = Vec::new();
    for i in 0..n {
        let lo = i.saturating_sub(half_width);
        let hi = (i + half_width + 1).min(n);
        for j in lo..hi {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            if (state >> 33) % 3 != 0 {
                indices.push(j as i64);
                data.push(((state >> 40) % 7) as f64 - 3.0);
            }
        }
        indptr.push(indices.len() as i64);
    }
    Csr::from_parts(n, n, indptr, indices, data, true).unwrap()
}

#[test]
fn test_parallel_matches_sequential_and_dense() {
    let a = banded(300, 6, 0xC0FF_EE42);
    let b = banded(300, 4, 0xBADC_0FFE);
    let seq = spgemm_with_config_f64_i64(&a, &b, &SpgemmConfig::sequential()).unwrap();
    let par = spgemm_with_config_f64_i64(&a, &b, &SpgemmConfig::parallel()).unwrap();
    assert_eq!(seq, par);
    assert_sorted_unique(&par);

    let dense = dense_matmul(&a.to_dense(), &b.to_dense(), 300, 300, 300);
    for (x, y) in par.to_dense().iter().zip(&dense) {
        assert!(approx_eq(*x, *y), "{x} vs {y}");
    }
}

#[test]
fn test_identity_is_neutral() {
    let a = banded(40, 3, 7);
    let n = 40usize;
    let eye = Csr::from_parts(
        n,
        n,
        (0..=n as i64).collect(),
        (0..n as i64).collect(),
        vec![1.0; n],
        true,
    )
    .unwrap();
    assert_eq!(spgemm_f64_i64(&a, &eye).unwrap(), a);
    assert_eq!(spgemm_f64_i64(&eye, &a).unwrap(), a);
}

#[test]
fn test_config_thresholds() {
    let cfg = SpgemmConfig::default().with_sequential_rows(10).with_sequential_nnz(100);
    assert!(cfg.runs_sequential(10, 1_000));
    assert!(cfg.runs_sequential(1_000, 50));
    assert!(!cfg.runs_sequential(11, 101));
    assert!(!SpgemmConfig::parallel().runs_sequential(1, 1));
    assert!(SpgemmConfig::sequential().runs_sequential(usize::MAX, usize::MAX));
}
