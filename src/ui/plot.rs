use eframe::egui::{Align2, Color32, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::stat_color;
use crate::data::model::{PokemonRecord, Stat};

// ---------------------------------------------------------------------------
// StatChart – what the chart shows, independent of rendering
// ---------------------------------------------------------------------------

/// A single bar of the stat chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBar {
    pub stat: Stat,
    pub value: u32,
    pub color: Color32,
}

/// Bar chart of one Pokémon's six base stats.
#[derive(Debug, Clone, PartialEq)]
pub struct StatChart {
    pub title: String,
    pub bars: Vec<StatBar>,
}

impl StatChart {
    pub fn for_record(record: &PokemonRecord) -> Self {
        StatChart::from_values(&record.names.english, record.stats.values())
    }

    /// Build from a title and the six values in [`Stat::ALL`] order.
    pub fn from_values(title: &str, values: [u32; 6]) -> Self {
        let bars = Stat::ALL
            .iter()
            .zip(values)
            .map(|(&stat, value)| StatBar {
                stat,
                value,
                color: stat_color(stat),
            })
            .collect();
        StatChart {
            title: title.to_string(),
            bars,
        }
    }

    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.value).collect()
    }
}

// ---------------------------------------------------------------------------
// Stat plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart: one bar per stat with its value printed above.
pub fn stat_plot(ui: &mut Ui, chart: &StatChart) {
    ui.heading(chart.title.as_str());

    let labels: Vec<&'static str> = chart.bars.iter().map(|b| b.stat.label()).collect();
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, f64::from(b.value))
                .name(b.stat.label())
                .fill(b.color)
                .width(0.6)
        })
        .collect();

    Plot::new("stat_plot")
        .x_axis_label("Attribute")
        .y_axis_label("Value")
        .include_y(0.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > f64::EPSILON || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).map(|l| l.to_string()).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            for (i, b) in chart.bars.iter().enumerate() {
                let label = Text::new(
                    PlotPoint::new(i as f64, f64::from(b.value) + 1.0),
                    b.value.to_string(),
                )
                .anchor(Align2::CENTER_BOTTOM);
                plot_ui.text(label);
            }
        });
}
