
use cev_lib::{mass_zero, mass_zero_with_config, CevInputs, CevModel, DomainError};
use test_utils::{load_mass_cases, rel_diff};

#[test]
fn test_reference_masses() {
    let cases = load_mass_cases();
    assert!(!cases.is_empty(), "No reference rows loaded");

    for case in &cases {
        let got = mass_zero(&case.inputs()).expect("reference inputs are valid")[0];
        assert!(
            rel_diff(got, case.mass, 1e-300) < 1e-9,
            "{:?}: expected {}, got {}",
            case,
            case.mass,
            got
        );
    }
}

#[test]
fn test_mass_is_a_probability() {
    for &beta in &[0.05, 0.3, 0.5, 0.8, 0.99] {
        for &spot in &[0.01, 0.5, 5.0, 100.0] {
            for &texp in &[0.1, 1.0, 10.0] {
                let mass = mass_zero(&CevInputs::new(texp, 1.0).spot(spot).beta(beta)).unwrap()[0];
                assert!(
                    (0.0..=1.0).contains(&mass),
                    "mass {} out of [0, 1] for beta {} spot {} texp {}",
                    mass,
                    beta,
                    spot,
                    texp
                );
            }
        }
    }
}

#[test]
fn test_mass_decreases_with_forward() {
    let forwards = vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0];
    let masses = mass_zero(&CevInputs::new(2.0, 0.8).forward(forwards.clone()).beta(0.4)).unwrap();
    assert_eq!(masses.len(), forwards.len());
    for i in 1..masses.len() {
        assert!(
            masses[i] < masses[i - 1],
            "mass rose from {} to {} between forwards {} and {}",
            masses[i - 1],
            masses[i],
            forwards[i - 1],
            forwards[i]
        );
    }
}

#[test]
fn test_mass_grows_with_time() {
    let masses = mass_zero(&CevInputs::new(vec![0.25, 1.0, 4.0, 16.0], 0.8).spot(1.0).beta(0.5)).unwrap();
    for pair in masses.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn test_non_positive_beta_has_zero_mass() {
    let masses = mass_zero(&CevInputs::new(5.0, 3.0).spot(0.5).beta(vec![0.0, -0.25, -2.0])).unwrap();
    assert_eq!(masses, vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_mass_ignores_strike_and_cp() {
    let plain = mass_zero(&CevInputs::new(3.0, 0.8).spot(1.0)).unwrap();
    let with_contract = mass_zero(
        &CevInputs::new(3.0, 0.8)
            .spot(1.0)
            .strike(vec![1.0, 2.0, 3.0])
            .cp(0.0),
    )
    .unwrap();
    assert_eq!(plain, with_contract);
}

#[test]
fn test_forward_override_and_rates() {
    // With the forward given explicitly the spot and rates no longer matter
    let direct = mass_zero(&CevInputs::new(2.0, 1.2).forward(5.0).beta(0.25)).unwrap()[0];
    let overridden = mass_zero(
        &CevInputs::new(2.0, 1.2)
            .spot(1000.0)
            .intr(0.2)
            .divr(0.1)
            .forward(5.0)
            .beta(0.25),
    )
    .unwrap()[0];
    assert_eq!(direct, overridden);

    // The rate-derived forward is higher, so absorption is less likely
    let carried = mass_zero(&CevInputs::new(2.0, 1.2).spot(5.0).intr(0.05).beta(0.25)).unwrap()[0];
    assert!(carried < direct);
}

#[test]
fn test_scalar_model_matches_vectorized() {
    let model = CevModel::new(0.8, 0.5).unwrap();
    let scalar = model.mass_zero(1.0, 3.0).unwrap();
    let vectorized = mass_zero(&CevInputs::new(3.0, 0.8).forward(1.0).beta(0.5)).unwrap()[0];
    assert_eq!(scalar, vectorized);
    assert!((scalar - 0.3528660814588489).abs() < 1e-12);
}

#[test]
fn test_config_default_beta_applies() {
    let mut config = cev_lib::default_configs::standard();
    config.defaults.beta = 0.3;
    let got = mass_zero_with_config(&CevInputs::new(5.0, 0.5).spot(10.0), &config).unwrap()[0];
    assert!(rel_diff(got, 4.0578308588581414e-10, 1e-300) < 1e-9, "got {}", got);
}

#[test]
fn test_mass_domain_errors() {
    assert_eq!(
        mass_zero(&CevInputs::new(1.0, 0.5).spot(1.0).beta(1.0)),
        Err(DomainError::BetaOutOfRange { beta: 1.0 })
    );
    assert!(matches!(
        mass_zero(&CevInputs::new(1.0, 0.5).spot(0.0)),
        Err(DomainError::NonPositive { name: "spot", .. })
    ));
    assert!(matches!(
        mass_zero(&CevInputs::new(1.0, 0.0).spot(1.0)),
        Err(DomainError::NonPositive { name: "sigma", .. })
    ));
    assert!(matches!(
        mass_zero(&CevInputs::new(-1.0, 0.5).spot(1.0).beta(-0.5)),
        Err(DomainError::NonPositive { name: "texp", .. })
    ));
}
