//! Distribution Planning Example
//!
//! Three distribution centers supply four stores. Each store must receive its
//! weekly demand exactly and no center may ship more than it holds.
//!
//! minimize    sum cost[i,j] * x[i,j]
//! subject to  sum_j x[i,j] <= stock[i]
//!             sum_i x[i,j] == demand[j]
//!             x >= 0
//!
//! Run with `RUST_LOG=transplan=debug` to see the solver steps.

use tracing_subscriber::EnvFilter;
use transplan::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("transplan=info")),
        )
        .init();

    println!("=== Distribution Planning ===\n");

    let supply = vec![
        SupplyPoint::new("CD_1", 602),
        SupplyPoint::new("CD_2", 935),
        SupplyPoint::new("CD_3", 770),
    ];
    let demand = vec![
        DemandPoint::new("Loja_A", 406),
        DemandPoint::new("Loja_B", 520),
        DemandPoint::new("Loja_C", 330),
        DemandPoint::new("Loja_D", 287),
    ];
    let costs = CostMatrix::from_grid(
        &supply,
        &demand,
        &[
            vec![12.0, 8.0, 15.0, 6.0],
            vec![9.0, 17.0, 7.0, 11.0],
            vec![14.0, 5.0, 10.0, 13.0],
        ],
    )?;

    println!("Stock:");
    for s in &supply {
        println!("  {}: {}", s.id, s.available);
    }
    println!("Demand:");
    for d in &demand {
        println!("  {}: {}", d.id, d.required);
    }
    println!();

    let problem = TransportProblem::new(supply, demand, &costs)?;
    let planner = TransportPlanner::new(PlannerConfig::default().with_rounding(true));
    let plan = planner.solve_problem(&problem)?;

    let report = TableReport::default().with_currency("R$");
    println!("{}", report.render(&problem, &plan));

    if let Some(duals) = plan.duals() {
        println!("Marginal cost of one more unit per store:");
        for (d, price) in problem.demand().iter().zip(&duals.demand_marginal_costs) {
            println!("  {}: {:.2}", d.id, price);
        }
    }

    Ok(())
}
