use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, HLine, Legend, LineStyle, Plot};

use crate::color::SeriesColors;
use crate::predict::batch::{BatchPrediction, BENZOATE_PPM, SORBATE_PPM};
use crate::predict::safety::SafetyThresholds;

const BAR_WIDTH: f64 = 0.4;

// ---------------------------------------------------------------------------
// Grouped bar chart (benzoate vs sorbate per row)
// ---------------------------------------------------------------------------

/// One bar per value, offset so the two series sit side by side around
/// each row position.
fn series_bars(values: &[f64], offset: f64) -> Vec<Bar> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Bar::new(i as f64 + offset, v).width(BAR_WIDTH))
        .collect()
}

/// Render the comparison chart, in row order.
pub fn preservative_chart(ui: &mut Ui, prediction: &BatchPrediction, thresholds: &SafetyThresholds) {
    let colors = SeriesColors::default();

    let benzoate = BarChart::new(series_bars(&prediction.benzoate_ppm, -BAR_WIDTH / 2.0))
        .name(BENZOATE_PPM)
        .color(colors.benzoate);
    let sorbate = BarChart::new(series_bars(&prediction.sorbate_ppm, BAR_WIDTH / 2.0))
        .name(SORBATE_PPM)
        .color(colors.sorbate);

    Plot::new("preservative_chart")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label("Row")
        .y_axis_label("ppm")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(benzoate);
            plot_ui.bar_chart(sorbate);
            plot_ui.hline(
                HLine::new(thresholds.benzoate_ppm)
                    .name("benzoate limit")
                    .color(colors.benzoate)
                    .style(LineStyle::dashed_loose()),
            );
            plot_ui.hline(
                HLine::new(thresholds.sorbate_ppm)
                    .name("sorbate limit")
                    .color(colors.sorbate)
                    .style(LineStyle::dashed_loose()),
            );
        });
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn series_are_offset_around_row_positions() {
        let left = series_bars(&[10.0, 20.0], -BAR_WIDTH / 2.0);
        let right = series_bars(&[1.0, 2.0], BAR_WIDTH / 2.0);
        assert_eq!(left.len(), 2);
        assert_relative_eq!(left[1].argument, 0.8);
        assert_eq!(left[1].value, 20.0);
        assert_relative_eq!(right[0].argument, 0.2);
    }
}
