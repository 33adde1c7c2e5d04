use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write as _;

use crate::score::parse_attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Fsi,
    Mpi,
    Pti,
    Tmi,
    Rri,
    Pi,
}

impl Axis {
    pub const ALL: [Self; 6] = [
        Self::Fsi,
        Self::Mpi,
        Self::Pti,
        Self::Tmi,
        Self::Rri,
        Self::Pi,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fsi => "FSI",
            Self::Mpi => "MPI",
            Self::Pti => "PTI",
            Self::Tmi => "TMI",
            Self::Rri => "RRI",
            Self::Pi => "PI",
        }
    }

    /// Lowercase key of the `data-*` attribute holding this axis' value.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fsi => "fsi",
            Self::Mpi => "mpi",
            Self::Pti => "pti",
            Self::Tmi => "tmi",
            Self::Rri => "rri",
            Self::Pi => "pi",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Fsi => 0,
            Self::Mpi => 1,
            Self::Pti => 2,
            Self::Tmi => 3,
            Self::Rri => 4,
            Self::Pi => 5,
        }
    }

    /// Screen angle in radians: axis 0 points up, the rest follow clockwise.
    pub fn angle(self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / Self::ALL.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let offset = self.index() as f64 * step;
        offset - FRAC_PI_2
    }
}

pub const MAX_VALUE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadarValues([f64; 6]);

impl RadarValues {
    pub const fn new(values: [f64; 6]) -> Self {
        Self(values)
    }

    /// Reads every axis through `lookup`, which receives the lowercase axis key.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut values = [0.0; 6];
        for axis in Axis::ALL {
            values[axis.index()] = parse_attribute(lookup(axis.key()).as_deref());
        }
        Self::new(values)
    }

    pub const fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarGeometry {
    pub size: f64,
    pub radius: f64,
    pub rings: u32,
    pub label_offset: f64,
}

impl Default for RadarGeometry {
    fn default() -> Self {
        Self {
            size: 300.0,
            radius: 110.0,
            rings: 5,
            label_offset: 14.0,
        }
    }
}

impl RadarGeometry {
    pub fn center(&self) -> Point {
        Point {
            x: self.size / 2.0,
            y: self.size / 2.0,
        }
    }

    pub fn point_at(&self, axis: Axis, radius: f64) -> Point {
        let center = self.center();
        let angle = axis.angle();
        Point {
            x: angle.cos().mul_add(radius, center.x),
            y: angle.sin().mul_add(radius, center.y),
        }
    }

    pub fn ring_radii(&self) -> Vec<f64> {
        (1..=self.rings)
            .map(|ring| self.radius * f64::from(ring) / f64::from(self.rings.max(1)))
            .collect()
    }

    pub fn ring(&self, radius: f64) -> Vec<Point> {
        Axis::ALL
            .iter()
            .map(|axis| self.point_at(*axis, radius))
            .collect()
    }

    pub fn data_polygon(&self, values: &RadarValues) -> Vec<Point> {
        Axis::ALL
            .iter()
            .map(|axis| self.point_at(*axis, self.radius * (values.get(*axis) / MAX_VALUE)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub width: u32,
}

pub const GRID_STROKE: Stroke = Stroke {
    fill: "none",
    stroke: "#e5e7eb",
    width: 1,
};

pub const DATA_STROKE: Stroke = Stroke {
    fill: "#0f172a22",
    stroke: "#0f172a",
    width: 2,
};

pub const LABEL_FILL: &str = "#64748b";
pub const LABEL_FONT_SIZE: u32 = 10;

/// Drawing surface for the radar. Implemented over an `<svg>` element in the
/// browser and by recorders in tests.
pub trait ChartCanvas {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn polygon(&mut self, points: &[Point], style: Stroke) -> Result<(), Self::Error>;
    fn line(&mut self, from: Point, to: Point, style: Stroke) -> Result<(), Self::Error>;
    fn text(&mut self, at: Point, content: &str) -> Result<(), Self::Error>;
}

/// Clears the canvas and draws rings, spokes, labels and the data polygon.
pub fn draw_radar<C: ChartCanvas>(
    canvas: &mut C,
    geometry: &RadarGeometry,
    values: &RadarValues,
) -> Result<(), C::Error> {
    canvas.clear()?;

    for radius in geometry.ring_radii() {
        canvas.polygon(&geometry.ring(radius), GRID_STROKE)?;
    }

    let center = geometry.center();
    for axis in Axis::ALL {
        canvas.line(center, geometry.point_at(axis, geometry.radius), GRID_STROKE)?;
        let label_at = geometry.point_at(axis, geometry.radius + geometry.label_offset);
        canvas.text(label_at, axis.label())?;
    }

    canvas.polygon(&geometry.data_polygon(values), DATA_STROKE)
}

/// Formats points the way the SVG `points` attribute expects them.
pub fn points_attribute(points: &[Point]) -> String {
    let mut out = String::new();
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", point.x, point.y);
    }
    out
}
