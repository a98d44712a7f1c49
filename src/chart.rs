//! Composition chart: light and dark counts per generation over the
//! backdrop bands.

use crate::environment::EnvironmentInterval;
use crate::snapshot::HistorySnapshot;
use crate::stats::CompositionHistory;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

/// Default PNG size in pixels
pub const CHART_SIZE: (u32, u32) = (1200, 700);

/// Series and shading ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub population_size: usize,
    pub light: Vec<(f64, f64)>,
    pub dark: Vec<(f64, f64)>,
    pub bands: Vec<EnvironmentInterval>,
}

impl ChartData {
    pub fn new(history: &CompositionHistory, bands: Vec<EnvironmentInterval>) -> Self {
        let to_points = |series: Vec<(usize, usize)>| -> Vec<(f64, f64)> {
            series
                .into_iter()
                .map(|(g, count)| (g as f64, count as f64))
                .collect()
        };

        Self {
            population_size: history.population_size,
            light: to_points(history.light_series()),
            dark: to_points(history.dark_series()),
            bands,
        }
    }

    pub fn from_snapshot(snapshot: &HistorySnapshot) -> Self {
        Self::new(&snapshot.composition, snapshot.bands.clone())
    }

    /// Generations covered by the series and the bands
    pub fn x_range(&self) -> Range<f64> {
        let last_band = self.bands.last().map_or(0, |b| b.end_generation);
        let x_max = last_band.max(self.light.len()).max(1);
        0.0..x_max as f64
    }

    /// Counts are bounded by the population size
    pub fn y_range(&self) -> Range<f64> {
        0.0..self.population_size.max(1) as f64
    }

    /// Band rectangles as `[(x0, y0), (x1, y1)]` with their fill color
    pub fn band_rects(&self) -> Vec<([(f64, f64); 2], (u8, u8, u8))> {
        let top = self.y_range().end;
        self.bands
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| {
                (
                    [
                        (b.start_generation as f64, 0.0),
                        (b.end_generation as f64, top),
                    ],
                    b.backdrop.color(),
                )
            })
            .collect()
    }
}

/// Render the chart to a PNG file
pub fn render_png<P: AsRef<Path>>(data: &ChartData, path: P) -> Result<(), Box<dyn Error>> {
    render_png_sized(data, path, CHART_SIZE)
}

pub fn render_png_sized<P: AsRef<Path>>(
    data: &ChartData,
    path: P,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path.as_ref(), size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Population composition", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(data.x_range(), data.y_range())?;

    for ([p0, p1], (r, g, b)) in data.band_rects() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [p0, p1],
            RGBColor(r, g, b).filled(),
        )))?;
    }

    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Population size")
        .draw()?;

    chart
        .draw_series(LineSeries::new(data.light.iter().copied(), &BLUE))?
        .label("light")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart.draw_series(
        data.light
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(data.dark.iter().copied(), &RED))?
        .label("dark")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart.draw_series(
        data.dark
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, RED.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    log::debug!("Chart written to {:?}", path.as_ref());
    Ok(())
}
