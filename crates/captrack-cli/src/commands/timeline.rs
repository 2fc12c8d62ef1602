//! Timeline command
//!
//! Usage: captrack timeline [--granularity <weekly|monthly|quarterly>]
//!
//! Renders every plan as a text Gantt chart. Bar positions come from
//! `captrack_core::timeline`, scaled to a fixed character width.

use chrono::Utc;
use clap::Args;

use captrack_core::model::{Plan, PlanType};
use captrack_core::queries::{gantt_rows, GanttPhase};
use captrack_core::timeline::{headers, phase_bar, Granularity, TimelineBar, TimelineWindow};

use super::{CmdResult, Context};

const CHART_WIDTH: usize = 60;

struct TimelineRow {
    plan_id: String,
    capability: String,
    plan_type: PlanType,
    version: u32,
    bars: Vec<(GanttPhase, Option<TimelineBar>)>,
}

#[derive(Debug, Args)]
pub struct TimelineArgs {
    #[arg(long, default_value_t = Granularity::default())]
    pub granularity: Granularity,

    /// Months of padding around the dated phases (default from config)
    #[arg(long)]
    pub padding: Option<u32>,

    /// Only plans of this capability
    #[arg(long)]
    pub capability: Option<String>,

    /// Only plans of this type
    #[arg(long = "type")]
    pub plan_type: Option<PlanType>,

    /// Print window, columns and bars as JSON
    #[arg(long)]
    pub json: bool,
}

/// Character span of a bar on a chart `width` characters wide
///
/// Bars are clipped to the window; a bar wholly outside it has length 0.
fn bar_span(bar: &TimelineBar, width: usize) -> (usize, usize) {
    let right = bar.left + bar.width;
    if right <= 0.0 || bar.left >= 100.0 {
        return (0, 0);
    }
    let scale = width as f64 / 100.0;
    let last = width.saturating_sub(1) as f64;
    let start = (bar.left.max(0.0) * scale).round().min(last) as usize;
    let end = (right.min(100.0) * scale).round() as usize;
    let room = width.saturating_sub(start);
    (start, end.saturating_sub(start).max(1).min(room))
}

fn render_bar(bar: &TimelineBar, width: usize) -> String {
    let (start, len) = bar_span(bar, width);
    let mut line = " ".repeat(start.min(width));
    line.push_str(&"█".repeat(len));
    let rendered = start + len;
    if rendered < width {
        line.push_str(&" ".repeat(width - rendered));
    }
    line
}

/// Execute timeline command
pub fn execute(args: TimelineArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let selected = |plan: &Plan| {
        args.capability
            .as_deref()
            .map_or(true, |id| plan.capability_id == id)
            && args.plan_type.map_or(true, |t| plan.plan_type == t)
    };
    let plans: Vec<&Plan> = store.plans().iter().filter(|p| selected(*p)).collect();

    let padding = args
        .padding
        .unwrap_or(ctx.config.timeline_padding_months);
    let window = TimelineWindow::from_plans(plans.iter().copied(), Utc::now(), padding);
    let columns = headers(&window, args.granularity);

    let rows: Vec<TimelineRow> = gantt_rows(store)
        .into_iter()
        .filter_map(|row| {
            let plan = *plans.iter().find(|p| p.id == row.id)?;
            let bars = row
                .phases
                .into_iter()
                .map(|gantt| {
                    let bar = plan
                        .phases
                        .get(gantt.phase)
                        .and_then(|phase| phase_bar(&window, phase));
                    (gantt, bar)
                })
                .collect();
            Some(TimelineRow {
                plan_id: row.id,
                capability: row.capability,
                plan_type: plan.plan_type,
                version: plan.version,
                bars,
            })
        })
        .collect();

    if args.json {
        let json_rows: Vec<_> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "planId": row.plan_id,
                    "capability": row.capability,
                    "planType": row.plan_type,
                    "version": row.version,
                    "phases": row
                        .bars
                        .iter()
                        .map(|(gantt, bar)| serde_json::json!({ "phase": gantt, "bar": bar }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        let view = serde_json::json!({
            "window": window,
            "granularity": args.granularity,
            "headers": columns,
            "rows": json_rows,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "Timeline {} .. {} ({}, today {})",
        window.start, window.end, args.granularity, window.current
    );
    let labels: Vec<String> = columns
        .iter()
        .map(|c| {
            let marker = if c.is_current { "*" } else { "" };
            format!("{} {}{}", c.label, c.sublabel, marker)
        })
        .collect();
    println!("Columns: {}", labels.join(" | "));

    if rows.is_empty() {
        println!("No plans to show");
        return Ok(());
    }
    for row in rows {
        println!();
        println!("{} ({} v{})", row.capability, row.plan_type, row.version);
        for (gantt, bar) in row.bars {
            let dates = match (gantt.start, gantt.end) {
                (Some(start), Some(end)) => format!("{} .. {}", start, end),
                _ => "unscheduled".to_string(),
            };
            let chart = bar
                .map(|b| render_bar(&b, CHART_WIDTH))
                .unwrap_or_else(|| " ".repeat(CHART_WIDTH));
            println!(
                "  {}  |{}|  {:<24}  {} {}%",
                gantt.phase.short_label(),
                chart,
                dates,
                gantt.status,
                gantt.progress
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(left: f64, width: f64) -> TimelineBar {
        TimelineBar {
            left,
            width,
            raw_width: width,
        }
    }

    #[test]
    fn test_bar_span_scales_percentages() {
        assert_eq!(bar_span(&bar(50.0, 10.0), 60), (30, 6));
    }

    #[test]
    fn test_bar_span_stays_inside_chart() {
        assert_eq!(bar_span(&bar(95.0, 20.0), 60), (57, 3));
        assert_eq!(bar_span(&bar(-10.0, 20.0), 60), (0, 6));
    }

    #[test]
    fn test_bar_outside_window_is_blank() {
        assert_eq!(bar_span(&bar(-10.0, 5.0), 60), (0, 0));
        assert_eq!(bar_span(&bar(100.0, 5.0), 60), (0, 0));
        assert_eq!(bar_span(&bar(120.0, 5.0), 60), (0, 0));

        let line = render_bar(&bar(-10.0, 5.0), 20);
        assert_eq!(line, " ".repeat(20));
    }

    #[test]
    fn test_render_bar_is_fixed_width() {
        let line = render_bar(&bar(25.0, 50.0), 20);
        assert_eq!(line.chars().count(), 20);
        assert_eq!(line.trim(), "██████████");
    }
}
