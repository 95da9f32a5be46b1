use eframe::egui;

use crate::ui::plot::{self, StatChart};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StatChartApp {
    pub chart: StatChart,
}

impl StatChartApp {
    pub fn new(chart: StatChart) -> Self {
        Self { chart }
    }
}

impl eframe::App for StatChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Central panel: bar chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::stat_plot(ui, &self.chart);
        });
    }
}

/// Open the chart window and block until it is closed.
pub fn run_chart_window(chart: StatChart) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 560.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    let title = format!("Pokédex – {}", chart.title);
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(StatChartApp::new(chart)))),
    )
}
