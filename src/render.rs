use std::{error::Error, path::Path};

use nalgebra::Point2;
use plotters::{
    coord::Shift,
    prelude::{
        ChartBuilder, Circle, DrawingArea, DrawingAreaErrorKind, DrawingBackend, IntoDrawingArea,
        LabelAreaPosition, PathElement, SVGBackend,
    },
    series::LineSeries,
    style::{Color, RGBColor, BLACK, BLUE, GREEN, RED, WHITE},
};

use crate::{
    boundary::Boundary,
    perceptron::Label,
    report::SuccessSample,
    trainer::{ClassificationObserver, COORDINATE_RANGE, VERIFICATION_SAMPLES},
};

const AXIS_COLOR: RGBColor = RGBColor(211, 211, 211);
const POINT_RADIUS: i32 = 5;

/// Affine map from the sampling domain onto a pixel surface, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMapping {
    width: u32,
    height: u32,
}

impl ScreenMapping {
    pub fn new((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }

    fn domain() -> (f64, f64) {
        (
            f64::from(*COORDINATE_RANGE.start()),
            f64::from(*COORDINATE_RANGE.end()),
        )
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn to_screen(&self, x: f64, y: f64) -> (i32, i32) {
        let (low, high) = Self::domain();
        let span = high - low;
        let width = f64::from(self.width);
        let height = f64::from(self.height);

        let screen_x = width * (x - low) / span;
        let screen_y = height - height * (y - low) / span;

        (screen_x.round() as i32, screen_y.round() as i32)
    }

    /// End points of `y = slope*x + intercept` across the whole domain.
    pub fn line(&self, slope: f64, intercept: f64) -> [(i32, i32); 2] {
        let (low, high) = Self::domain();

        [
            self.to_screen(low, slope * low + intercept),
            self.to_screen(high, slope * high + intercept),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottedPoint {
    pub point: Point2<i32>,
    pub label: Label,
}

/// Records what the trainer classifies so it can be drawn afterwards.
/// Points are coloured by the perceptron's answer: red for 1, blue for 0.
#[derive(Debug, Default)]
pub struct PlotRenderer {
    points: Vec<PlottedPoint>,
    boundary: Option<Boundary>,
}

impl ClassificationObserver for PlotRenderer {
    fn on_boundary(&mut self, boundary: &Boundary) {
        self.boundary = Some(*boundary);
    }

    fn on_classification(&mut self, point: &Point2<i32>, predicted: Label, _expected: Label) {
        self.points.push(PlottedPoint {
            point: *point,
            label: predicted,
        });
    }
}

impl PlotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PlottedPoint] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Draws axes, recorded points, the true boundary and, if given, the
    /// learned line as `(slope, intercept)`.
    pub fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        learned_line: Option<(f64, f64)>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let size = area.dim_in_pixel();
        let mapping = ScreenMapping::new(size);
        let width = i32::try_from(size.0).unwrap_or(i32::MAX);
        let height = i32::try_from(size.1).unwrap_or(i32::MAX);

        area.fill(&WHITE)?;

        area.draw(&PathElement::new(vec![(width / 2, 0), (width / 2, height)], AXIS_COLOR))?;
        area.draw(&PathElement::new(vec![(0, height / 2), (width, height / 2)], AXIS_COLOR))?;

        for plotted in &self.points {
            let center = mapping.to_screen(f64::from(plotted.point.x), f64::from(plotted.point.y));
            let color = if plotted.label > 0 { RED } else { BLUE };

            area.draw(&Circle::new(center, POINT_RADIUS, color.filled()))?;
        }

        if let Some(boundary) = self.boundary {
            let line = mapping.line(f64::from(boundary.slope()), f64::from(boundary.intercept()));
            area.draw(&PathElement::new(line.to_vec(), BLACK))?;
        }

        if let Some((slope, intercept)) = learned_line {
            area.draw(&PathElement::new(mapping.line(slope, intercept).to_vec(), GREEN))?;
        }

        Ok(())
    }

    pub fn render_to_svg<P: AsRef<Path>>(
        &self,
        file_path: P,
        size: (u32, u32),
        learned_line: Option<(f64, f64)>,
    ) -> Result<(), Box<dyn Error>> {
        let root_area = SVGBackend::new(file_path.as_ref(), size).into_drawing_area();

        self.render(&root_area, learned_line)?;
        root_area.present()?;

        Ok(())
    }
}

pub fn plot_success_rates<P: AsRef<Path>>(
    file_path: P,
    series: &[SuccessSample],
) -> Result<(), Box<dyn Error>> {
    let max_round = series.iter().map(|sample| sample.round).max().unwrap_or(1);

    let root_area = SVGBackend::new(file_path.as_ref(), (1024, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root_area)
        .set_label_area_size(LabelAreaPosition::Left, 40)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .caption("Success rate", ("sans-serif", 30))
        .build_cartesian_2d(1..max_round.max(2), 0..VERIFICATION_SAMPLES)?;

    ctx.configure_mesh().draw()?;

    ctx.draw_series(LineSeries::new(
        series.iter().map(|sample| (sample.round, sample.correct)),
        &GREEN,
    ))?;

    root_area.present()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_covers_surface() {
        let mapping = ScreenMapping::new((200, 400));

        assert_eq!(mapping.to_screen(-100.0, -100.0), (0, 400));
        assert_eq!(mapping.to_screen(100.0, 100.0), (200, 0));
        assert_eq!(mapping.to_screen(0.0, 0.0), (100, 200));
        assert_eq!(mapping.to_screen(50.0, -50.0), (150, 300));
    }

    #[test]
    fn line_spans_domain() {
        let mapping = ScreenMapping::new((200, 200));

        assert_eq!(mapping.line(1.0, 0.0), [(0, 200), (200, 0)]);
        assert_eq!(mapping.line(0.0, 50.0), [(0, 50), (200, 50)]);
    }

    #[test]
    fn renderer_records_predicted_labels() {
        let mut renderer = PlotRenderer::new();

        renderer.on_boundary(&Boundary::new(1, 0));
        renderer.on_classification(&Point2::new(3, 4), 0, 1);
        renderer.on_classification(&Point2::new(-3, 4), 1, 1);

        assert_eq!(
            renderer.points(),
            &[
                PlottedPoint {
                    point: Point2::new(3, 4),
                    label: 0
                },
                PlottedPoint {
                    point: Point2::new(-3, 4),
                    label: 1
                },
            ]
        );

        renderer.clear();
        assert!(renderer.points().is_empty());
    }

    #[test]
    fn renders_one_circle_per_point() {
        let mut renderer = PlotRenderer::new();
        renderer.on_boundary(&Boundary::new(-2, 10));
        for x in [-90, -10, 0, 25, 80] {
            renderer.on_classification(&Point2::new(x, x / 2), u8::from(x > 0), 0);
        }

        let mut svg = String::new();
        {
            let root_area = SVGBackend::with_string(&mut svg, (200, 200)).into_drawing_area();
            renderer.render(&root_area, Some((0.5, 3.0))).unwrap();
            root_area.present().unwrap();
        }

        assert_eq!(svg.matches("<circle").count(), 5);
    }
}
