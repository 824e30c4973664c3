//! Chart.js configuration for the faction bar chart.
//!
//! Only `data.labels` and `data.datasets[0].data` carry meaning; the rest is
//! the fixed look of the faction page.

use serde::Serialize;
use serde_json::{Value, json};

use super::faction::FactionSeries;

pub const DATASET_LABEL: &str = "Miembros de cada Facción";

const BAR_FILL: &str = "rgba(255, 99, 132, 0.6)";
const BAR_BORDER: &str = "rgba(255, 99, 132, 1)";
const BAR_HOVER: &str = "rgba(255, 54, 54, 0.8)";
const WHITE: &str = "rgba(255, 255, 255, 1)";
const BLACK: &str = "rgba(0, 0, 0, 1)";
const RED: &str = "rgba(255, 0, 0, 1)";

#[derive(Debug, Clone, Serialize)]
pub struct BarChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: &'static str,
    pub data: Vec<u64>,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
    pub border_radius: u32,
    pub hover_background_color: &'static str,
    pub bar_percentage: f64,
    pub datalabels: Value,
}

/// Build the bar chart for a faction series.
pub fn bar_chart(series: &FactionSeries) -> BarChartConfig {
    BarChartConfig {
        kind: "bar",
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![BarDataset {
                label: DATASET_LABEL,
                data: series.counts.clone(),
                background_color: BAR_FILL,
                border_color: BAR_BORDER,
                border_width: 2,
                border_radius: 12,
                hover_background_color: BAR_HOVER,
                bar_percentage: 0.6,
                datalabels: json!({
                    "color": WHITE,
                    "textStrokeColor": BLACK,
                    "textStrokeWidth": 2,
                }),
            }],
        },
        options: chart_options(),
    }
}

fn chart_options() -> Value {
    let ticks = json!({
        "color": WHITE,
        "textStrokeColor": BLACK,
        "textStrokeWidth": 2,
    });
    json!({
        "responsive": true,
        "scales": {
            "y": {
                "beginAtZero": true,
                "grid": { "color": "rgba(255, 255, 255, 0.5)" },
                "ticks": ticks.clone(),
            },
            "x": {
                "grid": { "display": false },
                "ticks": ticks,
            },
        },
        "plugins": {
            "legend": {
                "labels": {
                    "color": WHITE,
                    "font": { "size": 14 },
                    "textStrokeColor": BLACK,
                    "textStrokeWidth": 2,
                    "textShadowColor": "rgba(0, 0, 0, 0.5)",
                    "textShadowBlur": 4,
                },
            },
            "tooltip": {
                "backgroundColor": "rgba(255, 255, 255, 0.9)",
                "titleColor": RED,
                "bodyColor": RED,
                "borderColor": RED,
                "borderWidth": 1,
            },
        },
        "animation": {
            "duration": 800,
            "easing": "easeOutBounce",
        },
    })
}
