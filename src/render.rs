use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use crate::color::SeriesColor;
use crate::figure::{Figure, Series};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported image format for {} (expected .png or .svg)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("could not create output directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drawing '{title}' failed: {message}")]
    Draw { title: String, message: String },

    #[error("could not encode {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Render `figure` into `dir/<file_name>`, creating missing directories.
/// Returns the path written.
pub fn save_figure(figure: &Figure, dir: &Path) -> Result<PathBuf, RenderError> {
    let path = dir.join(&figure.file_name);
    save_figure_as(figure, &path)?;
    Ok(path)
}

/// Render `figure` to an explicit path; the format follows the extension.
pub fn save_figure_as(figure: &Figure, path: &Path) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match format {
        ImageFormat::Png => render_png(figure, path),
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure).map_err(|e| draw_error(figure, e))?;
            root.present().map_err(|e| draw_error(figure, e))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Draw into an RGB buffer, then hand the pixels to the `image` encoder.
fn render_png(figure: &Figure, path: &Path) -> Result<(), RenderError> {
    let (w, h) = figure.size;
    let mut buffer = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
        draw_figure(&root, figure).map_err(|e| draw_error(figure, e))?;
        root.present().map_err(|e| draw_error(figure, e))?;
    }

    let image = image::RgbImage::from_raw(w, h, buffer).ok_or_else(|| RenderError::Draw {
        title: figure.title.clone(),
        message: "pixel buffer does not match the figure size".to_string(),
    })?;
    image.save(path).map_err(|source| RenderError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

fn draw_error(figure: &Figure, err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw {
        title: figure.title.clone(),
        message: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    if figure.is_3d() {
        draw_3d(root, figure)
    } else {
        draw_2d(root, figure)
    }
}

fn legend_entry(color: RGBColor) -> impl Fn((i32, i32)) -> PathElement<(i32, i32)> {
    move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
}

const CHART_MARGIN: u32 = 15;
const Y_LABEL_AREA: u32 = 70;
const X_LABEL_AREA: u32 = 45;

/// Pixel height of the 13 px category font, and a rough per-character advance.
const CATEGORY_FONT_HEIGHT: u32 = 13;
const CATEGORY_CHAR_WIDTH: u32 = 7;
/// Space under the tick labels for the axis title.
const AXIS_TITLE_ROOM: u32 = 32;

/// How category names are laid out under a categorical x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CategoryAxis {
    /// Names read top to bottom because they would not fit in their slot.
    rotated: bool,
    /// Height of the x label area, tick labels and axis title included.
    label_area: u32,
}

fn category_axis(figure: &Figure) -> CategoryAxis {
    let longest = figure
        .categories
        .iter()
        .map(|c| c.chars().count() as u32)
        .max()
        .unwrap_or(0);
    let text_width = longest * CATEGORY_CHAR_WIDTH;
    let plot_width = figure.size.0.saturating_sub(Y_LABEL_AREA + 2 * CHART_MARGIN);
    let slot = plot_width / figure.categories.len().max(1) as u32;

    if text_width < slot {
        CategoryAxis {
            rotated: false,
            label_area: CATEGORY_FONT_HEIGHT + 10 + AXIS_TITLE_ROOM,
        }
    } else {
        CategoryAxis {
            rotated: true,
            label_area: text_width + 10 + AXIS_TITLE_ROOM,
        }
    }
}

fn draw_2d<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> DrawResult<DB> {
    let bounds = figure.bounds();
    let categorical = !figure.categories.is_empty();
    let axis = category_axis(figure);

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", 24))
        .margin(CHART_MARGIN)
        .x_label_area_size(if categorical { axis.label_area } else { X_LABEL_AREA })
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)?;

    let category_formatter = |x: &f64| figure.category_label(*x);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .light_line_style(TRANSPARENT);
        if !figure.grid {
            mesh.bold_line_style(TRANSPARENT);
        }
        if categorical {
            let font = ("sans-serif", 13).into_font();
            // Rotated names hang down from their tick, starting just below the axis.
            let style: TextStyle = if axis.rotated {
                TextStyle::from(font.transform(FontTransform::Rotate90)).pos(Pos::new(HPos::Left, VPos::Center))
            } else {
                font.into()
            };
            mesh.x_labels(figure.categories.len() * 2 + 1)
                .x_label_formatter(&category_formatter)
                .x_label_style(style);
        }
        mesh.draw()?;
    }

    let colors = figure.series_colors();
    let mut bar_group = 0;
    for (series, color) in figure.series.iter().zip(colors) {
        let rgb = color.to_plotters();
        match series {
            Series::Line { name, points, markers } => {
                let anno = chart.draw_series(LineSeries::new(points.iter().copied(), rgb.stroke_width(2)))?;
                if let Some(name) = name {
                    anno.label(figure.legend_label(name)).legend(legend_entry(rgb));
                }
                if *markers {
                    chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, rgb.filled())))?;
                }
            }
            Series::Band { name, x, lower, upper, opacity } => {
                let outline: Vec<(f64, f64)> = x
                    .iter()
                    .zip(upper)
                    .map(|(&x, &y)| (x, y))
                    .chain(x.iter().zip(lower).rev().map(|(&x, &y)| (x, y)))
                    .collect();
                let style = rgb.mix(*opacity).filled();
                let anno = chart.draw_series(std::iter::once(Polygon::new(outline, style)))?;
                if let Some(name) = name {
                    anno.label(figure.legend_label(name))
                        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], style));
                }
            }
            Series::Histogram { name, histogram } => {
                let fill = rgb.mix(0.8).filled();
                let anno = chart.draw_series(
                    histogram
                        .bins()
                        .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], fill)),
                )?;
                if let Some(name) = name {
                    anno.label(figure.legend_label(name))
                        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
                }
                // Bin outlines.
                chart.draw_series(
                    histogram
                        .bins()
                        .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], BLACK.stroke_width(1))),
                )?;
            }
            Series::Bars { name, values } => {
                let offset = figure.bar_offset(bar_group);
                let half = figure.bar_width() / 2.0;
                bar_group += 1;
                let fill = rgb.filled();
                let anno = chart.draw_series(values.iter().map(|&(i, v)| {
                    let center = i as f64 + offset;
                    Rectangle::new([(center - half, 0.0), (center + half, v)], fill)
                }))?;
                if let Some(name) = name {
                    anno.label(figure.legend_label(name))
                        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
                }
            }
            Series::Line3d { .. } => {}
        }
    }

    draw_legend(&mut chart, figure)
}

fn draw_legend<'a, DB, CT>(chart: &mut ChartContext<'a, DB, CT>, figure: &Figure) -> DrawResult<DB>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate,
{
    if !figure.legend || figure.series.iter().all(|s| s.name().is_none()) {
        return Ok(());
    }
    let position = if figure.legend_on_left() {
        SeriesLabelPosition::UpperLeft
    } else {
        SeriesLabelPosition::UpperRight
    };
    let mut labels = chart.configure_series_labels();
    labels
        .position(position)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 14));
    labels.draw()
}

fn draw_3d<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> DrawResult<DB> {
    let bounds = figure.bounds();
    let z = figure.z_bounds();

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", 24))
        .margin(20)
        .build_cartesian_3d(bounds.x.0..bounds.x.1, z.0..z.1, bounds.y.0..bounds.y.1)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(4)
        .draw()?;

    let titles = [&figure.x_label, &figure.y_label, &figure.z_label];
    let anchors = axis_title_anchors(bounds.x, bounds.y, z);
    for (title, anchor) in titles.into_iter().zip(anchors) {
        if !title.is_empty() {
            chart.draw_series(std::iter::once(Text::new(title.clone(), anchor, ("sans-serif", 15))))?;
        }
    }

    let colors: Vec<SeriesColor> = figure.series_colors();
    for (series, color) in figure.series.iter().zip(colors) {
        if let Series::Line3d { name, points } = series {
            let rgb = color.to_plotters();
            // plotters' 3D y axis is vertical; data z goes there.
            let anno = chart.draw_series(LineSeries::new(
                points.iter().map(|&(x, y, z)| (x, z, y)),
                rgb.stroke_width(2),
            ))?;
            if let Some(name) = name {
                anno.label(figure.legend_label(name)).legend(legend_entry(rgb));
            }
        }
    }

    draw_legend(&mut chart, figure)
}

/// Where the x, y and z axis titles go, in plotters' `(x, vertical, depth)`
/// order: just outside the data box, next to the middle of each axis.
fn axis_title_anchors(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> [(f64, f64, f64); 3] {
    let mid = |(lo, hi): (f64, f64)| (lo + hi) / 2.0;
    let out = |(lo, hi): (f64, f64)| (hi - lo) * 0.12;
    [
        (mid(x), z.0, y.0 - out(y)),
        (x.1 + out(x), z.0, mid(y)),
        (x.0 - out(x), mid(z), y.0),
    ]
}

/// Whether text can be rasterised here; drawing needs a system sans-serif font.
#[cfg(test)]
pub(crate) fn fonts_available() -> bool {
    ("sans-serif", 12).into_font().box_size("Ag").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::summary::Histogram;

    fn sample_figure(file: &str) -> Figure {
        Figure::new("Sample", file)
            .labels("x", "y")
            .with_grid()
            .with_legend()
            .series(Series::marker_line("data", vec![(0.0, 1.0), (1.0, 0.0)]))
    }

    #[test]
    fn unknown_extension_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_figure(&sample_figure("plot.pdf"), dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(!dir.path().join("plot.pdf").exists());
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(ImageFormat::from_path(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("b.svg")).unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn png_and_svg_are_written_into_nested_directories() {
        if !fonts_available() {
            eprintln!("skipping: no sans-serif font");
            return;
        }
        let dir = tempfile::tempdir().unwrap();

        let png = save_figure(&sample_figure("images/plot.png"), dir.path()).unwrap();
        assert!(png.is_file());
        let decoded = image::open(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 600));

        let svg = save_figure(&sample_figure("plot.svg"), dir.path()).unwrap();
        let text = std::fs::read_to_string(svg).unwrap();
        assert!(text.contains("<svg"));
    }

    #[test]
    fn every_series_kind_renders() {
        if !fonts_available() {
            eprintln!("skipping: no sans-serif font");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let fig = Figure::new("All", "all.png")
            .categories(vec!["a".into(), "b".into()])
            .legend_title("Function")
            .series(Series::Bars { name: Some("f".into()), values: vec![(0, 1.0), (1, 2.0)] })
            .series(Series::Bars { name: Some("g".into()), values: vec![(0, 0.5)] });
        save_figure(&fig, dir.path()).unwrap();

        let hist = Figure::new("Hist", "hist.png").series(Series::Histogram {
            name: None,
            histogram: Histogram::from_values(&[1.0, 2.0, 2.5, 3.0], 3),
        });
        save_figure(&hist, dir.path()).unwrap();

        let band = Figure::new("Band", "band.png")
            .with_legend()
            .series(Series::marker_line("mean", vec![(1.0, 1.0), (2.0, 2.0)]))
            .series(Series::spread_band("sd", &[1.0, 2.0], &[1.0, 2.0], &[0.1, 0.2]));
        save_figure(&band, dir.path()).unwrap();

        let line3d = Figure::new("3D", "3d.png").series(Series::Line3d {
            name: Some("path".into()),
            points: vec![(0.0, 0.0, 0.0), (1.0, 2.0, 3.0)],
        });
        save_figure(&line3d, dir.path()).unwrap();

        for f in ["all.png", "hist.png", "band.png", "3d.png"] {
            assert!(dir.path().join(f).is_file(), "{f} missing");
        }
    }

    #[test]
    fn short_category_names_stay_horizontal() {
        let fig = Figure::new("t", "t.png")
            .size(1000, 600)
            .categories(vec!["Non-Adaptive Simpson".into(), "Adaptive Trapezoidal".into()]);
        let axis = category_axis(&fig);
        assert!(!axis.rotated);
        // Tick labels plus the axis title.
        assert!(axis.label_area >= CATEGORY_FONT_HEIGHT + AXIS_TITLE_ROOM);
    }

    #[test]
    fn crowded_category_names_are_rotated_with_room_for_the_title() {
        let names: Vec<String> = (0..12).map(|i| format!("Integration method {i}")).collect();
        let fig = Figure::new("t", "t.png").size(800, 600).categories(names);
        let axis = category_axis(&fig);
        assert!(axis.rotated);
        let longest = "Integration method 10".len() as u32 * CATEGORY_CHAR_WIDTH;
        assert!(axis.label_area >= longest + AXIS_TITLE_ROOM);
    }

    #[test]
    fn axis_titles_sit_outside_the_data_box() {
        let [x, y, z] = axis_title_anchors((0.0, 10.0), (-1.0, 1.0), (0.0, 4.0));
        // x title: middle of x, in front of the box.
        assert_eq!(x.0, 5.0);
        assert!(x.2 < -1.0);
        // y title: middle of y (depth), right of the box.
        assert_eq!(y.2, 0.0);
        assert!(y.0 > 10.0);
        // z title: middle of the vertical axis, left of the box.
        assert_eq!(z.1, 2.0);
        assert!(z.0 < 0.0);
    }
}
