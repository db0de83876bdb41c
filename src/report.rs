//! Plain-text presentation of shipment plans.
//!
//! Rendering is kept apart from planning: anything implementing
//! [`PlanReporter`] can present a plan, and the planner never prints.

use crate::model::{ShipmentPlan, TransportProblem};

/// Turns a plan into text for display.
pub trait PlanReporter {
    /// Render `plan`, computed for `problem`.
    fn render(&self, problem: &TransportProblem, plan: &ShipmentPlan) -> String;
}

/// Fixed-width table of quantities followed by a list of recommendations.
#[derive(Debug, Clone, Default)]
pub struct TableReport {
    /// Decimal places for quantities.
    pub precision: usize,
    /// Currency label placed before costs.
    pub currency: String,
}

impl TableReport {
    /// Builder: set the decimal places for quantities.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder: set the currency label.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    fn write_table(&self, out: &mut String, plan: &ShipmentPlan) {
        let label_width = plan
            .supply_ids()
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(6);
        let col_width = plan
            .demand_ids()
            .iter()
            .map(String::len)
            .chain(plan.quantities().iter().map(|q| format!("{:.*}", self.precision, q).len()))
            .max()
            .unwrap_or(0)
            + 2;

        out.push_str(&format!("{:<label_width$}", ""));
        for id in plan.demand_ids() {
            out.push_str(&format!("{:>col_width$}", id));
        }
        out.push('\n');

        for (i, id) in plan.supply_ids().iter().enumerate() {
            out.push_str(&format!("{:<label_width$}", id));
            for q in plan.quantities().row(i).iter() {
                out.push_str(&format!("{:>col_width$.prec$}", q, prec = self.precision));
            }
            out.push('\n');
        }
    }
}

impl PlanReporter for TableReport {
    fn render(&self, problem: &TransportProblem, plan: &ShipmentPlan) -> String {
        let mut out = String::new();

        out.push_str("Shipment plan (units)\n");
        self.write_table(&mut out, plan);
        out.push_str(&format!(
            "\nTotal cost: {}{:.2}\n",
            self.currency,
            plan.total_cost()
        ));

        out.push_str("\nRecommendations:\n");
        let min_quantity = 0.5 * 10f64.powi(-(self.precision as i32));
        for s in plan.shipments(min_quantity) {
            out.push_str(&format!(
                "  - Ship {:.*} units from {} to {} (cost {}{:.2})\n",
                self.precision, s.quantity, s.from, s.to, self.currency, s.cost
            ));
        }
        for (i, s) in problem.supply().iter().enumerate() {
            let left = (s.available as f64 - plan.shipped_from(i)).max(0.0);
            out.push_str(&format!(
                "  - {} keeps {:.*} units in stock\n",
                s.id, self.precision, left
            ));
        }

        out
    }
}
