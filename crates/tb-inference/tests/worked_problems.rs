//! End-to-end updates on the classic small problems.

use approx::assert_relative_eq;
use rand::SeedableRng;
use tb_core::{CredibleInterval, Error, Likelihood, Result};
use tb_inference::Suite;
use tb_prob::{Beta, Pmf};

fn dice_likelihood(data: &i64, hypo: &i64) -> f64 {
    if hypo < data { 0.0 } else { 1.0 / *hypo as f64 }
}

/// Coin with bias `hypo` percent heads.
struct Euro;

impl Likelihood<char, i64> for Euro {
    fn likelihood(&self, data: &char, hypo: &i64) -> Result<f64> {
        let x = *hypo as f64 / 100.0;
        match data {
            'H' => Ok(x),
            'T' => Ok(1.0 - x),
            other => Err(Error::Validation(format!("unknown outcome {other:?}"))),
        }
    }
}

fn euro_data() -> Vec<char> {
    std::iter::repeat_n('H', 140).chain(std::iter::repeat_n('T', 110)).collect()
}

#[test]
fn cookie_problem() {
    let mixes = |data: &str, hypo: &&str| match (*hypo, data) {
        ("Bowl 1", "vanilla") => 0.75,
        ("Bowl 1", _) => 0.25,
        _ => 0.5,
    };
    let mut suite = Suite::new(["Bowl 1", "Bowl 2"]).with_likelihood(mixes);
    let evidence = suite.update("vanilla").unwrap();
    assert_relative_eq!(evidence, 0.625, epsilon = 1e-12);
    assert_relative_eq!(suite.prob(&"Bowl 1"), 0.6, epsilon = 1e-12);
    assert_relative_eq!(suite.prob(&"Bowl 2"), 0.4, epsilon = 1e-12);
}

#[test]
fn dice_problem_sequential() {
    let mut suite = Suite::new([4i64, 6, 8, 12, 20]).with_likelihood(dice_likelihood);
    suite.update(&6).unwrap();
    for roll in [6, 8, 7, 7, 5, 4] {
        suite.update(&roll).unwrap();
    }

    assert_eq!(suite.prob(&4), 0.0);
    assert_eq!(suite.prob(&6), 0.0);
    assert_relative_eq!(suite.prob(&8), 0.943248453672, epsilon = 1e-6);
    assert_relative_eq!(suite.prob(&12), 0.0552061280613, epsilon = 1e-6);
    assert_relative_eq!(suite.prob(&20), 0.0015454182665, epsilon = 1e-6);
    assert_eq!(suite.maximum_likelihood().unwrap(), 8);
}

#[test]
fn batch_update_matches_sequential() {
    let rolls = [6i64, 6, 8, 7, 7, 5, 4];

    let mut sequential = Suite::new([4i64, 6, 8, 12, 20]).with_likelihood(dice_likelihood);
    let mut joint = 1.0;
    for roll in &rolls {
        joint *= sequential.update(roll).unwrap();
    }

    let mut batch = Suite::new([4i64, 6, 8, 12, 20]).with_likelihood(dice_likelihood);
    let evidence = batch.update_set(&rolls).unwrap();

    for hypo in [4, 6, 8, 12, 20] {
        assert_relative_eq!(batch.prob(&hypo), sequential.prob(&hypo), epsilon = 1e-12);
    }
    // Per-step constants multiply up to the joint evidence.
    assert_relative_eq!(evidence, joint, max_relative = 1e-9);
}

#[test]
fn train_problem() {
    let mut suite = Suite::new(1i64..=1000).with_likelihood(dice_likelihood);
    suite.update(&60).unwrap();

    assert_relative_eq!(suite.mean().unwrap(), 333.41989326371095, epsilon = 1e-6);
    assert_eq!(suite.mode().unwrap(), 60);
    assert_eq!(suite.credible_interval(90.0).unwrap(), CredibleInterval::new(69, 869));
}

#[test]
fn euro_problem_uniform_prior() {
    let mut suite = Suite::new(0i64..=100).with_likelihood(Euro);
    suite.update_set(&euro_data()).unwrap();

    assert_eq!(suite.maximum_likelihood().unwrap(), 56);
    assert_eq!(suite.median().unwrap(), 56);
    assert_relative_eq!(suite.mean().unwrap(), 55.95238095238095, epsilon = 1e-6);
    assert_eq!(suite.credible_interval(90.0).unwrap(), CredibleInterval::new(51, 61));
    assert_relative_eq!(suite.prob(&50), 0.02097652612954467, epsilon = 1e-9);
}

#[test]
fn euro_problem_triangle_prior() {
    let prior: Pmf<i64> = (0i64..=100).map(|x| (x, x.min(100 - x) as f64)).collect();
    let mut suite = Suite::from_pmf(prior).with_likelihood(Euro);
    suite.normalize().unwrap();
    suite.update_set(&euro_data()).unwrap();

    // The data swamps the prior.
    assert_eq!(suite.maximum_likelihood().unwrap(), 56);
    assert_relative_eq!(suite.mean().unwrap(), 55.743499438595066, epsilon = 1e-6);
    assert_eq!(suite.credible_interval(90.0).unwrap(), CredibleInterval::new(51, 61));
}

#[test]
fn euro_matches_beta_conjugate() {
    let mut beta = Beta::default();
    beta.update(140.0, 110.0);
    assert_relative_eq!(beta.mean(), 141.0 / 252.0, epsilon = 1e-15);

    let mut suite = Suite::new(0i64..=100).with_likelihood(Euro);
    suite.update_set(&euro_data()).unwrap();
    assert_relative_eq!(suite.mean().unwrap() / 100.0, beta.mean(), epsilon = 1e-6);
}

#[test]
fn unrecognized_data_propagates_and_keeps_prior() {
    let mut suite = Suite::new(0i64..=100).with_likelihood(Euro);
    let err = suite.update_set(&['H', 'X']).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_relative_eq!(suite.prob(&50), 1.0 / 101.0, epsilon = 1e-15);
}

#[test]
fn zero_evidence_propagates() {
    let mut suite = Suite::new([4i64, 6, 8]).with_likelihood(dice_likelihood);
    assert_eq!(suite.update(&10), Err(Error::TotalProbabilityZero));
    assert_eq!(suite.update_set(&[2, 10]), Err(Error::TotalProbabilityZero));
    assert_relative_eq!(suite.prob(&6), 1.0 / 3.0, epsilon = 1e-15);
}

#[test]
fn unset_likelihood_is_an_error() {
    let mut suite: Suite<char, i64> = Suite::new(0..=100);
    assert_eq!(suite.update(&'H'), Err(Error::UnimplementedLikelihood));
}

#[test]
fn posterior_becomes_next_prior() {
    let mut first = Suite::new([4i64, 6, 8, 12, 20]).with_likelihood(dice_likelihood);
    first.update(&6).unwrap();

    let mut second = Suite::from_pmf(first.into_pmf()).with_likelihood(dice_likelihood);
    second.update(&8).unwrap();
    assert_eq!(second.prob(&6), 0.0);
    assert!(second.prob(&8) > second.prob(&12));
}

#[test]
fn draws_from_posterior_respect_evidence() {
    let mut suite = Suite::new([4i64, 6, 8, 12, 20]).with_likelihood(dice_likelihood);
    suite.update_set(&[6, 8, 7, 7, 5, 4]).unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(17);
    let cdf = suite.make_cdf().unwrap();
    let draws = cdf.sample(1000, &mut rng).unwrap();
    // Dice with fewer than 8 sides were ruled out by the 8.
    assert!(draws.iter().all(|d| *d >= 8));
    let eights = draws.iter().filter(|&&d| d == 8).count();
    assert!(eights > 850, "8 drawn {} times", eights);

    for _ in 0..100 {
        assert!(suite.random(&mut rng).unwrap() >= 8);
    }
}
