//! 公共接口的参考值与性质测试

use approx::assert_relative_eq;
use ndarray::{Array1, Axis};
use qensmodels::models::distribution::SAMPLE_COUNT;
use qensmodels::{
    hwhm_equivalent_sites_circle, hwhm_jump_sites_log_norm_dist, sqw_jump_sites_log_norm_dist,
    EquivalentSitesCircle, JumpSitesLogNormDist, Profile, QensError, QensModel,
};

#[test]
fn sqw_two_q_values_matches_reference() {
    let params = JumpSitesLogNormDist::new(5, 1.0, 1.0, 1.0);
    let sqw = sqw_jump_sites_log_norm_dist(
        vec![1.0, 2.0, 3.0],
        vec![0.3, 0.4],
        Profile::new(1.0, 0.0),
        &params,
    )
    .unwrap();

    let rows = sqw.as_grid().unwrap();
    let rounded: Vec<f64> = rows.iter().map(|v| (v * 1e4).round() / 1e4).collect();
    assert_eq!(rounded, vec![0.0035, 0.0014, 0.0008, 0.0061, 0.0025, 0.0014]);
}

#[test]
fn sqw_single_point_is_flattened() {
    let params = JumpSitesLogNormDist::new(4, 1.0, 1.0, 1.0);
    let sqw = sqw_jump_sites_log_norm_dist(1.0, 1.0, Profile::default(), &params).unwrap();
    assert_eq!(sqw.shape(), &[1]);
    assert_relative_eq!(sqw.get(0, 0).unwrap(), 0.0344, epsilon = 5e-5);
}

#[test]
fn single_q_gives_rank_one_output() {
    let params = JumpSitesLogNormDist::default();
    let w = Array1::linspace(-5.0, 5.0, 101);
    let sqw = sqw_jump_sites_log_norm_dist(&w, [0.8], Profile::default(), &params).unwrap();
    assert_eq!(sqw.ndim(), 1);
    assert_eq!(sqw.shape(), &[101]);
}

#[test]
fn widths_have_documented_shapes() {
    let params = JumpSitesLogNormDist::new(3, 0.5, 1.5, 1.0);
    let widths = hwhm_jump_sites_log_norm_dist([1.0, 2.0], &params).unwrap();
    assert_eq!(widths.hwhm.shape(), &[2, 3, SAMPLE_COUNT]);
    assert_eq!(widths.eisf.shape(), &[2]);
    assert_eq!(widths.qisf.shape(), &[2, 2, SAMPLE_COUNT]);

    // 弹性占位宽度为 0
    assert!(widths.hwhm.index_axis(Axis(1), 0).iter().all(|v| *v == 0.0));
}

#[test]
fn distribution_preserves_total_weight() {
    for n in [2, 3, 5, 8] {
        let params = JumpSitesLogNormDist::new(n, 1.0, 1.0, 0.7);
        let widths = hwhm_jump_sites_log_norm_dist([0.0, 0.5, 1.5, 3.0], &params).unwrap();
        let total = &widths.eisf + &widths.qisf.sum_axis(Axis(2)).sum_axis(Axis(1));
        for t in total.iter() {
            assert_relative_eq!(*t, 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn eisf_independent_of_sigma() {
    let narrow = hwhm_jump_sites_log_norm_dist([0.4, 1.2], &JumpSitesLogNormDist::new(4, 1.0, 1.0, 0.1))
        .unwrap();
    let wide = hwhm_jump_sites_log_norm_dist([0.4, 1.2], &JumpSitesLogNormDist::new(4, 1.0, 1.0, 3.0))
        .unwrap();
    let base = hwhm_equivalent_sites_circle([0.4, 1.2], &EquivalentSitesCircle::new(4, 1.0, 1.0)).unwrap();
    assert_eq!(narrow.eisf, wide.eisf);
    assert_eq!(narrow.eisf, base.eisf);
}

#[test]
fn invalid_parameters_are_rejected_before_evaluation() {
    let cases = [
        (JumpSitesLogNormDist::new(0, 1.0, 1.0, 1.0), "n_sites"),
        (JumpSitesLogNormDist::new(1, 1.0, 1.0, 1.0), "n_sites"),
        (JumpSitesLogNormDist::new(3, 0.0, 1.0, 1.0), "radius"),
        (JumpSitesLogNormDist::new(3, -1.0, 1.0, 1.0), "radius"),
        (JumpSitesLogNormDist::new(3, 1.0, -0.1, 1.0), "res_time"),
        (JumpSitesLogNormDist::new(3, 1.0, 1.0, -1.0), "sigma"),
    ];
    for (params, name) in cases {
        match hwhm_jump_sites_log_norm_dist(1.0, &params) {
            Err(QensError::InvalidParameter { name: got, .. }) => assert_eq!(got, name),
            other => panic!("{:?} should fail on {}, got {:?}", params, name, other),
        }
    }
}

#[test]
fn q_must_be_non_empty_and_non_negative() {
    let params = JumpSitesLogNormDist::default();
    let empty: Vec<f64> = Vec::new();
    assert!(matches!(
        hwhm_jump_sites_log_norm_dist(empty, &params),
        Err(QensError::ShapeMismatch(_))
    ));
    assert!(hwhm_jump_sites_log_norm_dist([-0.5, 1.0], &params)
        .unwrap_err()
        .is_invalid_parameter());
}

#[test]
fn scale_is_linear() {
    let params = JumpSitesLogNormDist::new(3, 1.2, 0.9, 0.5);
    let w = Array1::linspace(-2.0, 2.0, 81);
    let one = sqw_jump_sites_log_norm_dist(&w, [0.5, 1.0], Profile::new(1.0, 0.0), &params).unwrap();
    let three = sqw_jump_sites_log_norm_dist(&w, [0.5, 1.0], Profile::new(3.0, 0.0), &params).unwrap();
    for (a, b) in one.rows().iter().zip(three.rows().iter()) {
        assert_relative_eq!(3.0 * a, *b, max_relative = 1e-12);
    }
}

#[test]
fn center_shifts_the_spectrum() {
    let params = JumpSitesLogNormDist::default();
    let w = Array1::linspace(-3.0, 3.0, 61);
    let centered = sqw_jump_sites_log_norm_dist(&w, 1.0, Profile::new(1.0, 0.0), &params).unwrap();
    let shifted = sqw_jump_sites_log_norm_dist(&w, 1.0, Profile::new(1.0, 0.5), &params).unwrap();

    let centered = centered.as_flat().unwrap();
    let shifted = shifted.as_flat().unwrap();
    // w[35] - 0.5 = w[30]
    assert_relative_eq!(shifted[35], centered[30], max_relative = 1e-9);
    assert_relative_eq!(shifted[40], centered[35], max_relative = 1e-9);
}

#[test]
fn trait_object_matches_free_function() {
    let params = JumpSitesLogNormDist::new(6, 0.8, 2.0, 0.3);
    let w = Array1::linspace(-1.0, 1.0, 21);
    let q = ndarray::array![0.2, 0.9, 1.6];

    let model: Box<dyn QensModel> = Box::new(params);
    let via_trait = model.sqw(&w, &q, Profile::default()).unwrap();
    let direct = sqw_jump_sites_log_norm_dist(&w, &q, Profile::default(), &params).unwrap();
    assert_eq!(via_trait, direct);
}
