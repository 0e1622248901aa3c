//! End-to-end checks of the Monte Carlo engine against analytic benchmarks.

use risk_core::SimRng;
use risk_engine::{
    ConvergenceStudy, ExerciseStyle, McOptionEngine, OptionContract, PositionSide,
    SimulationConfig,
};
use risk_models::{CreditParams, CreditPortfolio, GbmParams, OptionKind};

fn atm_call_engine(n_paths: usize, seed: u64) -> McOptionEngine {
    let params = GbmParams::new(100.0, 0.05, 0.0, 0.2).unwrap();
    let contract = OptionContract::new(
        OptionKind::Call,
        ExerciseStyle::European,
        100.0,
        1.0,
        PositionSide::Long,
    )
    .unwrap();
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(8)
        .seed(seed)
        .build()
        .unwrap();
    McOptionEngine::new(params, contract, config)
}

#[test]
fn european_call_estimate_brackets_black_scholes() {
    let engine = atm_call_engine(50_000, 20240615);
    let summary = engine.run();
    let reference = engine.reference_price().unwrap();

    // ~10.45 for these terms; the estimate should sit within a slightly
    // widened 95% interval of the analytic price.
    assert!((reference - 10.4506).abs() < 1e-3);
    let tolerance = 3.5 * summary.standard_error;
    assert!(
        (summary.estimate - reference).abs() < tolerance,
        "estimate {} vs reference {} (tolerance {})",
        summary.estimate,
        reference,
        tolerance
    );
}

#[test]
fn put_estimate_brackets_black_scholes() {
    let params = GbmParams::new(100.0, 0.05, 0.02, 0.25).unwrap();
    let contract = OptionContract::new(
        OptionKind::Put,
        ExerciseStyle::European,
        105.0,
        0.5,
        PositionSide::Long,
    )
    .unwrap();
    let config = SimulationConfig::builder()
        .n_paths(50_000)
        .n_steps(8)
        .seed(99)
        .build()
        .unwrap();
    let engine = McOptionEngine::new(params, contract, config);

    let summary = engine.run();
    let reference = engine.reference_price().unwrap();
    assert!((summary.estimate - reference).abs() < 3.5 * summary.standard_error);
}

#[test]
fn convergence_tightens_the_interval() {
    let engine = atm_call_engine(20_000, 7);
    let study = ConvergenceStudy::run(&engine, &[500, 2_000, 8_000, 20_000]).unwrap();

    assert_eq!(study.points.len(), 4);
    let first = &study.points[0];
    let last = study.points.last().unwrap();
    assert!(last.standard_error < first.standard_error / 3.0);

    let reference = engine.reference_price().unwrap();
    assert!((last.estimate - reference).abs() < 3.5 * last.standard_error);
}

#[test]
fn credit_stress_orders_losses() {
    let params = CreditParams::new(0.05, 0.6, 0.1, 0.2).unwrap();
    let portfolio = CreditPortfolio::new(vec![1_000_000.0; 1000], params).unwrap();
    let mut rng = SimRng::from_seed(314159);

    let mut base_rate = 0.0;
    let mut stressed_rate = 0.0;
    let runs = 20;
    for _ in 0..runs {
        let scenarios = portfolio.stress_scenarios(&[-3.0], &mut rng);
        base_rate += scenarios[0].default_rate;
        stressed_rate += scenarios[1].default_rate;
    }
    base_rate /= runs as f64;
    stressed_rate /= runs as f64;

    // Conditional on F = 0 the default rate is ~3.3%; at F = -3 it is ~37%.
    assert!((0.02..0.05).contains(&base_rate), "base rate {base_rate}");
    assert!(
        (0.30..0.45).contains(&stressed_rate),
        "stressed rate {stressed_rate}"
    );
}

#[test]
fn asian_call_is_cheaper_than_european() {
    let params = GbmParams::new(100.0, 0.05, 0.0, 0.2).unwrap();
    let config = SimulationConfig::builder()
        .n_paths(30_000)
        .n_steps(64)
        .seed(55)
        .build()
        .unwrap();

    let european = OptionContract::new(
        OptionKind::Call,
        ExerciseStyle::European,
        100.0,
        1.0,
        PositionSide::Long,
    )
    .unwrap();
    let asian = OptionContract::new(
        OptionKind::Call,
        ExerciseStyle::Asian,
        100.0,
        1.0,
        PositionSide::Long,
    )
    .unwrap();

    let european_price = McOptionEngine::new(params.clone(), european, config).run().estimate;
    let asian_price = McOptionEngine::new(params, asian, config).run().estimate;

    // Averaging damps volatility, so the Asian option is worth less.
    assert!(asian_price < european_price);
    assert!(asian_price > 0.0);
}

#[test]
fn knock_out_plus_knock_in_equals_vanilla() {
    let params = GbmParams::new(100.0, 0.05, 0.0, 0.2).unwrap();
    let config = SimulationConfig::builder()
        .n_paths(10_000)
        .n_steps(32)
        .seed(8080)
        .build()
        .unwrap();

    let barrier = |knock| {
        OptionContract::new(
            OptionKind::Call,
            ExerciseStyle::Barrier {
                level: 130.0,
                direction: risk_engine::BarrierDirection::Up,
                knock,
            },
            100.0,
            1.0,
            PositionSide::Long,
        )
        .unwrap()
    };
    let vanilla = OptionContract::new(
        OptionKind::Call,
        ExerciseStyle::European,
        100.0,
        1.0,
        PositionSide::Long,
    )
    .unwrap();

    let knock_out = McOptionEngine::new(params.clone(), barrier(risk_engine::BarrierKnock::Out), config)
        .run()
        .estimate;
    let knock_in = McOptionEngine::new(params.clone(), barrier(risk_engine::BarrierKnock::In), config)
        .run()
        .estimate;
    let plain = McOptionEngine::new(params, vanilla, config).run().estimate;

    // Same seed means identical paths, so the in/out split is exact.
    assert!((knock_out + knock_in - plain).abs() < 1e-9);
}
