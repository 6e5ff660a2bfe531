//! Plain-text rendering of dashboards and the partition catalog.

use std::fmt::Write;

use databarn_core::{Dimension, PartitionCatalog, RankedSlice};
use databarn_runner::{Dashboard, Report};

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Races indexed: {}", dashboard.races_indexed);
    for report in &dashboard.reports {
        out.push('\n');
        render_report(&mut out, report);
    }
    out
}

fn render_report(out: &mut String, report: &Report) {
    let _ = writeln!(out, "== {} ==", report.party());
    for dimension in Dimension::ALL {
        let mut slices = report.dimension(dimension).peekable();
        if slices.peek().is_none() {
            continue;
        }
        let _ = writeln!(out, "{dimension}");
        for entry in slices {
            let _ = writeln!(out, "  {}", entry.slice.label);
            render_ranking(out, &entry.ranking);
        }
    }
}

fn render_ranking(out: &mut String, ranking: &RankedSlice) {
    if ranking.is_empty() {
        let _ = writeln!(out, "    (no wins)");
        return;
    }
    for (place, bucket) in ranking.buckets().iter().enumerate() {
        let names: Vec<String> = bucket.members.iter().map(ToString::to_string).collect();
        let noun = if bucket.win_count == 1 { "win" } else { "wins" };
        let _ = writeln!(
            out,
            "    {}. {} {noun}: {}",
            place + 1,
            bucket.win_count,
            names.join(", ")
        );
    }
}

pub fn render_catalog(catalog: &PartitionCatalog) -> String {
    let mut out = String::new();
    for entry in catalog.entries() {
        let predicate = serde_json::to_string(&entry.predicate)
            .unwrap_or_else(|_| String::from("<unprintable>"));
        let _ = writeln!(out, "{:<24} {predicate}", entry.slice.to_string());
    }
    out
}
