use std::fmt::Write;

use serde::Serialize;

use crate::grid::{Action, Coord};
use crate::search::{SearchResult, Strategy};
use crate::solve::{DeliveryPlan, StrategySummary};

/// Presentation style for plans and path queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Semicolon-delimited lines, one per delivery.
    Legacy,
    /// Human-readable summary.
    Text,
}

/// Serializable outcome of a single path query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub strategy: Strategy,
    pub start: Coord,
    pub goal: Coord,
    pub found: bool,
    pub actions: Vec<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    pub nodes_expanded: usize,
}

impl PathSummary {
    pub fn new(strategy: Strategy, start: Coord, goal: Coord, result: &SearchResult<Action>) -> Self {
        Self {
            strategy,
            start,
            goal,
            found: result.is_found(),
            actions: result.actions.clone(),
            cost: result.integer_cost(),
            nodes_expanded: result.nodes_expanded,
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::Legacy => match self.cost {
                Some(cost) => format!(
                    "{};{};{}",
                    join_actions(&self.actions),
                    cost,
                    self.nodes_expanded
                ),
                None => "no path;0;0".to_string(),
            },
            RenderMode::Text => {
                let mut buffer = String::new();
                let _ = writeln!(
                    buffer,
                    "Path: {} -> {} (strategy: {})",
                    self.start,
                    self.goal,
                    self.strategy.display_name()
                );
                match self.cost {
                    Some(cost) => {
                        let _ = writeln!(buffer, "  actions: {}", join_actions(&self.actions));
                        let _ = writeln!(buffer, "  cost: {cost}");
                    }
                    None => {
                        let _ = writeln!(buffer, "  no path");
                    }
                }
                let _ = writeln!(buffer, "  nodes expanded: {}", self.nodes_expanded);
                buffer
            }
        }
    }
}

/// Render a plan in the requested textual mode.
pub fn render_plan(plan: &DeliveryPlan, mode: RenderMode) -> String {
    match mode {
        RenderMode::Legacy => render_plan_legacy(plan),
        RenderMode::Text => render_plan_text(plan),
    }
}

fn render_plan_legacy(plan: &DeliveryPlan) -> String {
    plan.deliveries
        .iter()
        .map(|delivery| {
            format!(
                "(Store{},Customer{});{};{};{}",
                delivery.truck,
                delivery.customer,
                join_actions(&delivery.actions),
                delivery.cost,
                delivery.nodes_expanded
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_plan_text(plan: &DeliveryPlan) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Plan: {} deliveries (strategy: {}, policy: {})",
        plan.deliveries.len(),
        plan.strategy.display_name(),
        plan.policy
    );
    for delivery in &plan.deliveries {
        let _ = writeln!(
            buffer,
            "  truck {} -> customer {}: cost {}, {} nodes expanded",
            delivery.truck, delivery.customer, delivery.cost, delivery.nodes_expanded
        );
        let _ = writeln!(buffer, "    {}", join_actions(&delivery.actions));
    }
    for warning in &plan.warnings {
        let _ = writeln!(buffer, "warning: {warning}");
    }
    let _ = writeln!(buffer, "{}", plan.stats);
    buffer
}

/// Fixed-width table of per-strategy totals.
pub fn render_comparison(summaries: &[StrategySummary]) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{:<4} {:<24} {:<8} {:>10} {:>10} {:>10} {:>8}",
        "code", "strategy", "kind", "deliveries", "cost", "nodes", "warnings"
    );
    for summary in summaries {
        let kind = if summary.strategy.is_informed() {
            "informed"
        } else {
            "blind"
        };
        let _ = writeln!(
            buffer,
            "{:<4} {:<24} {:<8} {:>10} {:>10} {:>10} {:>8}",
            summary.strategy.code(),
            summary.strategy.display_name(),
            kind,
            summary.deliveries,
            summary.total_cost,
            summary.nodes_expanded,
            summary.warnings
        );
    }
    buffer
}

fn join_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|action| action.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
