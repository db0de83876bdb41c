//! Plan invariants over a range of problem sizes.

use rstest::rstest;
use transplan::prelude::*;

const TOL: f64 = 1e-4;

/// Deterministic instance with `m` centers and `n` stores; supply always covers demand.
fn instance(m: usize, n: usize) -> TransportProblem {
    let supply: Vec<_> = (0..m)
        .map(|i| SupplyPoint::new(format!("CD_{}", i + 1), 50 * n as u64 + 10 * i as u64))
        .collect();
    let demand: Vec<_> = (0..n)
        .map(|j| DemandPoint::new(format!("Store_{}", j + 1), 20 + 5 * j as u64))
        .collect();
    let grid: Vec<Vec<f64>> = (0..m)
        .map(|i| (0..n).map(|j| ((i * 7 + j * 3) % 11 + 1) as f64).collect())
        .collect();
    let costs = CostMatrix::from_grid(&supply, &demand, &grid).expect("grid");
    TransportProblem::new(supply, demand, &costs).expect("valid")
}

#[rstest]
#[case(1, 1)]
#[case(1, 5)]
#[case(2, 3)]
#[case(3, 4)]
#[case(4, 2)]
#[case(5, 5)]
fn test_plan_invariants(#[case] m: usize, #[case] n: usize) {
    let problem = instance(m, n);
    let plan = TransportPlanner::default()
        .solve_problem(&problem)
        .expect("feasible");

    // demand met exactly
    for (j, d) in problem.demand().iter().enumerate() {
        assert!((plan.received_by(j) - d.required as f64).abs() < TOL);
    }
    // stock respected
    for (i, s) in problem.supply().iter().enumerate() {
        assert!(plan.shipped_from(i) <= s.available as f64 + TOL);
    }
    // no negative shipments
    assert!(plan.quantities().iter().all(|&q| q >= 0.0));

    plan.verify(&problem, TOL).expect("verified");
}

#[rstest]
#[case(1, 5)]
#[case(3, 4)]
#[case(5, 5)]
fn test_cost_not_above_greedy(#[case] m: usize, #[case] n: usize) {
    let problem = instance(m, n);
    let plan = TransportPlanner::default()
        .solve_problem(&problem)
        .expect("feasible");

    // greedy: fill each store from the cheapest centers with stock left
    let mut left: Vec<f64> = problem.supply().iter().map(|s| s.available as f64).collect();
    let mut greedy_cost = 0.0;
    for (j, d) in problem.demand().iter().enumerate() {
        let mut need = d.required as f64;
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by(|&a, &b| problem.unit_cost(a, j).total_cmp(&problem.unit_cost(b, j)));
        for i in order {
            let q = need.min(left[i]);
            left[i] -= q;
            need -= q;
            greedy_cost += q * problem.unit_cost(i, j);
        }
        assert_eq!(need, 0.0);
    }

    assert!(plan.total_cost() <= greedy_cost + TOL);
}

#[rstest]
#[case(&[10], &[11])]
#[case(&[10, 10], &[5, 5, 11])]
#[case(&[0], &[1])]
fn test_shortfall_rejected(#[case] stock: &[u64], #[case] required: &[u64]) {
    let supply: Vec<_> = stock
        .iter()
        .enumerate()
        .map(|(i, &q)| SupplyPoint::new(format!("CD_{}", i), q))
        .collect();
    let demand: Vec<_> = required
        .iter()
        .enumerate()
        .map(|(j, &q)| DemandPoint::new(format!("S_{}", j), q))
        .collect();
    let grid = vec![vec![1.0; demand.len()]; supply.len()];
    let costs = CostMatrix::from_grid(&supply, &demand, &grid).expect("grid");

    let err = TransportPlanner::default()
        .solve(&supply, &demand, &costs)
        .unwrap_err();
    assert!(err.is_infeasible(), "got {}", err);
}

#[rstest]
#[case::balanced(100, 100)]
#[case::surplus(150, 100)]
fn test_rounding_keeps_invariants(#[case] stock: u64, #[case] required: u64) {
    let supply = [SupplyPoint::new("CD_1", stock / 2), SupplyPoint::new("CD_2", stock - stock / 2)];
    let demand = [
        DemandPoint::new("A", required / 4),
        DemandPoint::new("B", required - required / 4),
    ];
    let costs = CostMatrix::new()
        .with("CD_1", "A", 3.0)
        .with("CD_1", "B", 5.0)
        .with("CD_2", "A", 6.0)
        .with("CD_2", "B", 2.0);
    let problem = TransportProblem::new(supply.to_vec(), demand.to_vec(), &costs).expect("valid");

    let plan = TransportPlanner::new(PlannerConfig::default().with_rounding(true))
        .solve_problem(&problem)
        .expect("feasible");
    assert!(plan.quantities().iter().all(|q| q.fract() == 0.0));
    plan.verify(&problem, 0.0).expect("exact");
}
