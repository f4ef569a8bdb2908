//! The pure analytics computation.

use numo_shared::types::Cents;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{
    ActualTotals, AnalyticsReport, PeriodEntries, PlannedTotals, Projections, Trend, Trends,
    Variance,
};
use crate::budget::BudgetPlan;
use crate::ledger::EntryKind;

/// Months in a projection year.
const MONTHS_PER_YEAR: i64 = 12;

/// Relative change beyond which a metric is trending (5%).
fn trend_threshold() -> Decimal {
    Decimal::new(5, 2)
}

/// Analytics engine. Stateless; every method is a pure function.
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Compares a plan against the current and previous period's entries.
    ///
    /// Tombstoned entries never contribute. The month index used for the
    /// projection is the plan's month. Totals saturate rather than wrap when
    /// stored rows exceed the input bounds.
    #[must_use]
    pub fn compute_report(
        plan: &BudgetPlan,
        current: &PeriodEntries,
        previous: &PeriodEntries,
    ) -> AnalyticsReport {
        let revenue = current.live_total(EntryKind::Revenue);
        let expenses = current.live_total(EntryKind::Expense);
        let previous_revenue = previous.live_total(EntryKind::Revenue);
        let previous_expenses = previous.live_total(EntryKind::Expense);

        let planned = PlannedTotals {
            revenue: plan.planned_revenue,
            expenses: plan.planned_expenses_total(),
        };
        let month = plan.period.month();

        AnalyticsReport {
            actual: ActualTotals {
                revenue,
                expenses,
                balance: revenue - expenses,
            },
            planned,
            variance: Variance {
                revenue: revenue - planned.revenue,
                expenses: expenses - planned.expenses,
            },
            trends: Trends {
                revenue: Self::calculate_trend(revenue, previous_revenue),
                expenses: Self::calculate_trend(expenses, previous_expenses),
            },
            projections: Projections {
                revenue: Self::calculate_projection(revenue, month),
                expenses: Self::calculate_projection(expenses, month),
            },
        }
    }

    /// Classifies the change from `previous` to `current`.
    ///
    /// A previous value of zero is always `Stable`. Exactly ±5% is `Stable`.
    #[must_use]
    pub fn calculate_trend(current: Cents, previous: Cents) -> Trend {
        if previous.is_zero() {
            return Trend::Stable;
        }

        let previous = Decimal::from(previous.value());
        let change = (Decimal::from(current.value()) - previous) / previous;
        let threshold = trend_threshold();

        if change > threshold {
            Trend::Up
        } else if change < -threshold {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Projects a year-end total from `month` months of activity.
    ///
    /// Returns zero when `month` is zero. Non-divisible results round to the
    /// nearest cent, midpoint away from zero.
    #[must_use]
    pub fn calculate_projection(actual: Cents, month: u32) -> Cents {
        if month == 0 {
            return Cents::ZERO;
        }

        let projected = (Decimal::from(actual.value()) * Decimal::from(MONTHS_PER_YEAR)
            / Decimal::from(month))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let value = projected.to_i64().unwrap_or(if projected.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        });
        Cents::new(value)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::analytics::types::PeriodEntry;
    use crate::budget::PlannedExpense;
    use chrono::Utc;
    use numo_shared::types::{AbstractId, AccountId, CategoryId, Period};

    fn plan(month: u32, planned_revenue: i64, planned_expenses: &[i64]) -> BudgetPlan {
        BudgetPlan {
            id: AbstractId::new(),
            account_id: AccountId::new(),
            name: "plan".to_string(),
            period: Period::new(month, 2024).unwrap(),
            planned_revenue: Cents::new(planned_revenue),
            planned_expenses: planned_expenses
                .iter()
                .map(|&p| PlannedExpense {
                    category_id: CategoryId::new(),
                    planned: Cents::new(p),
                })
                .collect(),
            notes: crate::budget::Notes::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entries(month: u32, revenue: i64, expenses: i64) -> PeriodEntries {
        PeriodEntries::new(
            Period::new(month, 2024).unwrap(),
            vec![
                PeriodEntry::revenue(Cents::new(revenue)),
                PeriodEntry::expense(Cents::new(expenses)),
            ],
        )
    }

    #[test]
    fn test_june_scenario() {
        let plan = plan(6, 500_000, &[200_000]);
        let report = AnalyticsEngine::compute_report(
            &plan,
            &entries(6, 550_000, 210_000),
            &entries(5, 500_000, 250_000),
        );

        assert_eq!(report.actual.revenue, Cents::new(550_000));
        assert_eq!(report.actual.expenses, Cents::new(210_000));
        assert_eq!(report.actual.balance, Cents::new(340_000));
        assert_eq!(report.planned.revenue, Cents::new(500_000));
        assert_eq!(report.planned.expenses, Cents::new(200_000));
        assert_eq!(report.variance.revenue, Cents::new(50_000));
        assert_eq!(report.variance.expenses, Cents::new(10_000));
        assert_eq!(report.trends.revenue, Trend::Up);
        assert_eq!(report.trends.expenses, Trend::Down);
        assert_eq!(report.projections.revenue, Cents::new(1_100_000));
        assert_eq!(report.projections.expenses, Cents::new(420_000));
    }

    #[test]
    fn test_planned_expenses_sum_all_categories() {
        let plan = plan(3, 0, &[100, 250, 650]);
        let report = AnalyticsEngine::compute_report(
            &plan,
            &PeriodEntries::empty(plan.period),
            &PeriodEntries::empty(plan.period.previous()),
        );
        assert_eq!(report.planned.expenses, Cents::new(1000));
        assert_eq!(report.variance.expenses, Cents::new(-1000));
    }

    #[test]
    fn test_tombstoned_entries_are_ignored() {
        let plan = plan(6, 0, &[]);
        let current = PeriodEntries::new(
            plan.period,
            vec![
                PeriodEntry::revenue(Cents::new(1000)),
                PeriodEntry::revenue(Cents::new(9000)).deleted(),
                PeriodEntry::expense(Cents::new(400)).deleted(),
            ],
        );
        let report = AnalyticsEngine::compute_report(
            &plan,
            &current,
            &PeriodEntries::empty(plan.period.previous()),
        );
        assert_eq!(report.actual.revenue, Cents::new(1000));
        assert_eq!(report.actual.expenses, Cents::ZERO);
    }

    #[test]
    fn test_near_limit_amounts_saturate() {
        let plan = plan(6, i64::MAX, &[i64::MAX, 1]);
        let current = PeriodEntries::new(
            plan.period,
            vec![
                PeriodEntry::revenue(Cents::new(i64::MAX)),
                PeriodEntry::revenue(Cents::new(1)),
                PeriodEntry::expense(Cents::new(i64::MAX)),
            ],
        );
        let report = AnalyticsEngine::compute_report(
            &plan,
            &current,
            &PeriodEntries::empty(plan.period.previous()),
        );

        assert_eq!(report.actual.revenue, Cents::new(i64::MAX));
        assert_eq!(report.actual.expenses, Cents::new(i64::MAX));
        assert_eq!(report.actual.balance, Cents::ZERO);
        assert_eq!(report.planned.expenses, Cents::new(i64::MAX));
        assert_eq!(report.variance.revenue, Cents::ZERO);
        assert_eq!(report.projections.revenue, Cents::new(i64::MAX));
    }

    #[test]
    fn test_negative_balance_does_not_wrap() {
        let plan = plan(6, 0, &[]);
        let current = PeriodEntries::new(
            plan.period,
            vec![
                PeriodEntry::expense(Cents::new(i64::MAX)),
                PeriodEntry::expense(Cents::new(i64::MAX)),
            ],
        );
        let report = AnalyticsEngine::compute_report(
            &plan,
            &current,
            &PeriodEntries::empty(plan.period.previous()),
        );
        assert_eq!(report.actual.expenses, Cents::new(i64::MAX));
        assert_eq!(report.actual.balance, Cents::new(-i64::MAX));
        assert!(report.actual.balance.is_negative());
    }

    #[test]
    fn test_trend_from_zero_is_stable() {
        assert_eq!(
            AnalyticsEngine::calculate_trend(Cents::new(1000), Cents::ZERO),
            Trend::Stable
        );
    }

    #[test]
    fn test_trend_boundaries() {
        let prev = Cents::new(10_000);
        assert_eq!(AnalyticsEngine::calculate_trend(Cents::new(10_500), prev), Trend::Stable);
        assert_eq!(AnalyticsEngine::calculate_trend(Cents::new(9_500), prev), Trend::Stable);
        assert_eq!(AnalyticsEngine::calculate_trend(Cents::new(10_501), prev), Trend::Up);
        assert_eq!(AnalyticsEngine::calculate_trend(Cents::new(9_499), prev), Trend::Down);
    }

    #[test]
    fn test_projection() {
        assert_eq!(AnalyticsEngine::calculate_projection(Cents::new(1200), 6), Cents::new(2400));
        assert_eq!(AnalyticsEngine::calculate_projection(Cents::new(1200), 0), Cents::ZERO);
        // 100 * 12 / 7 = 171.43
        assert_eq!(AnalyticsEngine::calculate_projection(Cents::new(100), 7), Cents::new(171));
        // 1 * 12 / 8 = 1.5
        assert_eq!(AnalyticsEngine::calculate_projection(Cents::new(1), 8), Cents::new(2));
    }
}
