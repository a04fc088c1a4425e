use std::path::PathBuf;

use crate::color::{SeriesColor, generate_palette};
use crate::data::summary::{Histogram, min_max};

// ---------------------------------------------------------------------------
// Series – one drawable layer of a chart
// ---------------------------------------------------------------------------

/// A single layer of a chart. Colours are assigned by the owning [`Figure`].
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Polyline through `points`, optionally with a circle at every point.
    Line {
        name: Option<String>,
        points: Vec<(f64, f64)>,
        markers: bool,
    },
    /// Filled region between `lower` and `upper` over `x`.
    Band {
        name: Option<String>,
        x: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        opacity: f64,
    },
    Histogram {
        name: Option<String>,
        histogram: Histogram,
    },
    /// One bar per category index; bars of different `Bars` series sharing
    /// a category are drawn side by side.
    Bars {
        name: Option<String>,
        values: Vec<(usize, f64)>,
    },
    Line3d {
        name: Option<String>,
        points: Vec<(f64, f64, f64)>,
    },
}

impl Series {
    pub fn line(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Series::Line {
            name: Some(name.into()),
            points,
            markers: false,
        }
    }

    pub fn marker_line(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Series::Line {
            name: Some(name.into()),
            points,
            markers: true,
        }
    }

    /// `center ± spread` band, the usual way of showing a standard deviation.
    pub fn spread_band(name: impl Into<String>, x: &[f64], center: &[f64], spread: &[f64]) -> Self {
        Series::Band {
            name: Some(name.into()),
            x: x.to_vec(),
            lower: center.iter().zip(spread).map(|(c, s)| c - s).collect(),
            upper: center.iter().zip(spread).map(|(c, s)| c + s).collect(),
            opacity: 0.2,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Series::Line { name, .. }
            | Series::Band { name, .. }
            | Series::Histogram { name, .. }
            | Series::Bars { name, .. }
            | Series::Line3d { name, .. } => name.as_deref(),
        }
    }

    pub fn is_3d(&self) -> bool {
        matches!(self, Series::Line3d { .. })
    }

    /// Every `(x, y)` the series touches; 3D series report their x–y projection.
    fn extent_points(&self) -> Vec<(f64, f64)> {
        match self {
            Series::Line { points, .. } => points.clone(),
            Series::Band { x, lower, upper, .. } => x
                .iter()
                .zip(lower)
                .map(|(&x, &y)| (x, y))
                .chain(x.iter().zip(upper).map(|(&x, &y)| (x, y)))
                .collect(),
            Series::Histogram { histogram, .. } => histogram
                .bins()
                .flat_map(|(l, r, c)| [(l, c as f64), (r, 0.0)])
                .collect(),
            Series::Bars { values, .. } => values
                .iter()
                .flat_map(|&(i, v)| [(i as f64, v), (i as f64, 0.0)])
                .collect(),
            Series::Line3d { points, .. } => points.iter().map(|&(x, y, _)| (x, y)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Figure – one chart, saved to one file
// ---------------------------------------------------------------------------

/// Axis-aligned bounds of a chart's data area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Vertical axis title of 3D charts.
    pub z_label: String,
    /// Pixel size of bitmap output (and nominal size of vector output).
    pub size: (u32, u32),
    pub grid: bool,
    pub legend: bool,
    pub legend_title: Option<String>,
    /// Names of the x positions `0, 1, …` for categorical charts.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Output path relative to the output directory.
    pub file_name: PathBuf,
}

/// Fraction of the data span added on each side of an axis.
const MARGIN: f64 = 0.05;

/// Total width of a category slot shared by grouped bars.
const GROUP_WIDTH: f64 = 0.8;

impl Figure {
    pub fn new(title: impl Into<String>, file_name: impl Into<PathBuf>) -> Self {
        Figure {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            z_label: String::new(),
            size: (800, 600),
            grid: false,
            legend: false,
            legend_title: None,
            categories: Vec::new(),
            series: Vec::new(),
            file_name: file_name.into(),
        }
    }

    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn z_label(mut self, z: impl Into<String>) -> Self {
        self.z_label = z.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }

    pub fn with_legend(mut self) -> Self {
        self.legend = true;
        self
    }

    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend = true;
        self.legend_title = Some(title.into());
        self
    }

    pub fn categories(mut self, names: Vec<String>) -> Self {
        self.categories = names;
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn is_3d(&self) -> bool {
        self.series.iter().any(Series::is_3d)
    }

    /// One colour per series, in series order.
    ///
    /// A band drawn right after a line reuses the line's colour, so the
    /// spread reads as belonging to its mean.
    pub fn series_colors(&self) -> Vec<SeriesColor> {
        let distinct = self
            .series
            .iter()
            .enumerate()
            .filter(|(i, s)| !self.band_follows_line(*i, s))
            .count();
        let palette = generate_palette(distinct);

        let mut next = 0;
        let mut colors: Vec<SeriesColor> = Vec::with_capacity(self.series.len());
        for (i, s) in self.series.iter().enumerate() {
            if self.band_follows_line(i, s) {
                colors.push(colors[i - 1]);
            } else {
                colors.push(palette[next]);
                next += 1;
            }
        }
        colors
    }

    fn band_follows_line(&self, i: usize, s: &Series) -> bool {
        i > 0 && matches!(s, Series::Band { .. }) && matches!(self.series[i - 1], Series::Line { .. })
    }

    /// Legend text of a series; prefixed with the legend title when set.
    pub fn legend_label(&self, name: &str) -> String {
        match &self.legend_title {
            Some(title) => format!("{title}: {name}"),
            None => name.to_string(),
        }
    }

    /// Whether the legend belongs in the upper left corner: true when the
    /// tallest bar stands in the right half of a categorical chart.
    pub fn legend_on_left(&self) -> bool {
        let n = self.categories.len();
        let tallest = self
            .series
            .iter()
            .filter_map(|s| match s {
                Series::Bars { values, .. } => Some(values),
                _ => None,
            })
            .flatten()
            .copied()
            .filter(|(_, v)| v.is_finite())
            .max_by(|a, b| a.1.total_cmp(&b.1));
        match tallest {
            Some((slot, _)) if n > 1 => slot as f64 >= n as f64 / 2.0,
            _ => false,
        }
    }

    /// Number of `Bars` series, i.e. bars per category slot.
    pub fn bar_groups(&self) -> usize {
        self.series
            .iter()
            .filter(|s| matches!(s, Series::Bars { .. }))
            .count()
    }

    /// Width of a single bar in x units.
    pub fn bar_width(&self) -> f64 {
        GROUP_WIDTH / self.bar_groups().max(1) as f64
    }

    /// Centre offset of bar group `group` within its category slot.
    pub fn bar_offset(&self, group: usize) -> f64 {
        let n = self.bar_groups().max(1) as f64;
        let width = GROUP_WIDTH / n;
        -GROUP_WIDTH / 2.0 + width * (group as f64 + 0.5)
    }

    /// Data bounds across every series, padded and never degenerate.
    pub fn bounds(&self) -> Bounds {
        let points: Vec<(f64, f64)> = self.series.iter().flat_map(Series::extent_points).collect();

        let x = min_max(points.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));
        let y_data = min_max(points.iter().map(|p| p.1)).unwrap_or((0.0, 1.0));

        // Bars and histograms stand on the x axis.
        let mut y = pad(y_data);
        let has_bars = self
            .series
            .iter()
            .any(|s| matches!(s, Series::Histogram { .. } | Series::Bars { .. }));
        if has_bars && y_data.0 >= 0.0 {
            y.0 = 0.0;
        }

        if !self.categories.is_empty() {
            return Bounds {
                x: (-0.5, self.categories.len() as f64 - 0.5),
                y,
            };
        }
        Bounds { x: pad(x), y }
    }

    /// Bounds of the z axis for 3D figures.
    pub fn z_bounds(&self) -> (f64, f64) {
        let zs = self.series.iter().flat_map(|s| match s {
            Series::Line3d { points, .. } => points.iter().map(|p| p.2).collect::<Vec<_>>(),
            _ => Vec::new(),
        });
        pad(min_max(zs).unwrap_or((0.0, 1.0)))
    }

    /// Label for a categorical x position, empty between categories.
    pub fn category_label(&self, x: f64) -> String {
        category_at(&self.categories, x)
    }
}

/// Name of the category at integer position `x`, empty anywhere else.
pub fn category_at(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        let half = if lo == 0.0 { 1.0 } else { lo.abs() * 0.5 };
        return (lo - half, hi + half);
    }
    (lo - span * MARGIN, hi + span * MARGIN)
}
