//! Text summary of a plan comparison

use super::model::PlanComparison;
use crate::model::{PhaseName, Plan};

fn plan_label(plan: &Plan) -> String {
    format!(
        "{} (v{}) - {}",
        plan.plan_type,
        plan.version,
        plan.created_at.format("%b %-d, %Y")
    )
}

fn field_value(plan: &Plan, path: &str) -> String {
    let Some((phase, field)) = path.split_once('.') else {
        return "-".to_string();
    };
    let Some(phase) = phase.parse::<PhaseName>().ok().and_then(|p| plan.phases.get(p)) else {
        return "-".to_string();
    };
    let value = match field {
        "startDate" => phase.start_date.map(|d| d.format("%b %-d, %Y").to_string()),
        "endDate" => phase.end_date.map(|d| d.format("%b %-d, %Y").to_string()),
        "status" => Some(phase.status.to_string()),
        _ => None,
    };
    value.unwrap_or_else(|| "-".to_string())
}

/// Render a comparison as Markdown-flavoured text
///
/// Changed fields are listed in a three-column table with the value from
/// each plan.
pub fn render_comparison_summary(plan1: &Plan, plan2: &Plan, comparison: &PlanComparison) -> String {
    let mut out = String::new();

    out.push_str("## Plan Comparison\n\n");
    out.push_str(&format!(
        "**Plan 1**: {}  \n**Plan 2**: {}\n\n",
        plan_label(plan1),
        plan_label(plan2)
    ));

    if comparison.is_empty() {
        out.push_str("_No differences in phase dates or status._\n");
        return out;
    }

    if !comparison.added.is_empty() {
        out.push_str(&format!(
            "- **Added phases** ({}): {}\n",
            comparison.added.len(),
            comparison.added.join(", ")
        ));
    }
    if !comparison.removed.is_empty() {
        out.push_str(&format!(
            "- **Removed phases** ({}): {}\n",
            comparison.removed.len(),
            comparison.removed.join(", ")
        ));
    }

    if !comparison.changed.is_empty() {
        out.push_str("\n| Field | Plan 1 | Plan 2 |\n|---|---|---|\n");
        for path in &comparison.changed {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                path,
                field_value(plan1, path),
                field_value(plan2, path)
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compare_phases;
    use crate::model::{NewPlan, PlanPhase, PlanPhases, PlanType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn plan(id: &str, phases: PlanPhases) -> Plan {
        Plan::from_new(
            id.to_string(),
            NewPlan {
                capability_id: "c1".to_string(),
                plan_type: PlanType::Implementation,
                phases,
            },
            "1",
            Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_summary_lists_changed_values() {
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let a = plan(
            "a",
            PlanPhases::default().with(
                PhaseName::Cst,
                PlanPhase::scheduled(start, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()),
            ),
        );
        let b = plan(
            "b",
            PlanPhases::default().with(
                PhaseName::Cst,
                PlanPhase::scheduled(start, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()),
            ),
        );

        let comparison = compare_phases(&a.phases, &b.phases);
        let text = render_comparison_summary(&a, &b, &comparison);

        assert!(text.contains("implementation (v1) - Jan 5, 2025"));
        assert!(text.contains("| cst.endDate | Feb 28, 2025 | Mar 14, 2025 |"));
    }

    #[test]
    fn test_summary_for_identical_plans() {
        let a = plan("a", PlanPhases::default());
        let text = render_comparison_summary(&a, &a, &PlanComparison::default());
        assert!(text.contains("No differences"));
    }
}
