use std::fmt::Display;
use std::io::Cursor;

use image::{ImageOutputFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::internal_error::{InternalError, InternalResult};
use crate::records::data::WeeklyStats;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 600;

static BAR_COLORS: [RGBColor; 3] = [
    RGBColor(0x34, 0x98, 0xdb),
    RGBColor(0x2e, 0xcc, 0x71),
    RGBColor(0xe7, 0x4c, 0x3c),
];

fn draw_error(e: impl Display) -> InternalError {
    InternalError::from(format!("Failed to draw chart: {}", e))
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Renders the weekly summary as a three-bar PNG, one bar each for
/// completed tasks, achieved goals and study hours.
pub fn render_weekly_chart(stats: &WeeklyStats) -> InternalResult<Vec<u8>> {
    let series = [
        ("Completed tasks", stats.tasks_completed as f64),
        ("Completed goals", stats.goals_completed as f64),
        ("Study hours", stats.study_hours),
    ];

    let max_value = series
        .iter()
        .map(|(_, value)| *value)
        .fold(1.0_f64, f64::max);

    let mut rgb_buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb_buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Your productivity this week", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..3.0, 0.0..max_value * 1.2)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_desc("Count")
            .draw()
            .map_err(draw_error)?;

        for (index, ((label, value), color)) in series.iter().zip(BAR_COLORS.iter()).enumerate() {
            let x = index as f64;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x + 0.2, 0.0), (x + 0.8, *value)],
                    color.filled(),
                )))
                .map_err(draw_error)?
                .label(*label)
                .legend(move |(lx, ly)| {
                    Rectangle::new([(lx, ly - 5), (lx + 10, ly + 5)], color.filled())
                });

            let label_style = TextStyle::from(("sans-serif", 20))
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart
                .draw_series(std::iter::once(Text::new(
                    format_value(*value),
                    (x + 0.5, *value),
                    label_style,
                )))
                .map_err(draw_error)?;
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    let img = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, rgb_buf)
        .ok_or_else(|| InternalError::from("Chart buffer has unexpected size"))?;

    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageOutputFormat::Png)?;

    Ok(png.into_inner())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::format_value;

    #[rstest]
    #[case(3.0, "3")]
    #[case(0.0, "0")]
    #[case(2.5, "2.5")]
    #[case(7.25, "7.2")]
    fn bar_labels_drop_trailing_zeros(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_value(value), expected);
    }
}
