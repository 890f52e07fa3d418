//! Scene model of the wheel: two concentric rings and two axes grouped under
//! one scale and rotation.
//!
//! Shapes are addressed by [`ShapeId`], never by position, so restyling and
//! resizing keep working if shapes are added or reordered. Coordinates are in
//! pixels, screen convention (y down, positive angles turn clockwise), with the
//! wheel centred on the origin. Drawing is left to whatever renderer consumes
//! the scene.

use palette::named;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use crate::config;
use crate::error::{WheelError, WheelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeId {
    OuterRing,
    InnerRing,
    VerticalAxis,
    HorizontalAxis,
}

impl ShapeId {
    pub const ALL: [ShapeId; 4] = [
        ShapeId::OuterRing,
        ShapeId::InnerRing,
        ShapeId::VerticalAxis,
        ShapeId::HorizontalAxis,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Ring { radius: f32 },
    Segment { from: Vec2, to: Vec2 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Srgb<u8>,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub pen: Pen,
}

/// User-adjustable appearance of the wheel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneProperties {
    /// Scale applied to the whole wheel group
    pub scale: f32,
    /// Pen width for every shape
    pub thickness: f32,
    /// Inner ring radius in pixels
    pub inner_radius_px: f32,
    /// Dark strokes on a light background instead of the default light on dark
    pub inverted: bool,
}

impl Default for SceneProperties {
    fn default() -> Self {
        Self {
            scale: config::DEFAULT_SCALE,
            thickness: config::DEFAULT_THICKNESS,
            inner_radius_px: config::DEFAULT_INNER_RADIUS_PX,
            inverted: false,
        }
    }
}

impl SceneProperties {
    pub fn validate(&self) -> WheelResult<()> {
        let fields = [
            ("scale", self.scale),
            ("thickness", self.thickness),
            ("inner_radius_px", self.inner_radius_px),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(WheelError::InvalidConfig(format!(
                    "scene.{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// (background, foreground)
    pub fn colors(&self) -> (Srgb<u8>, Srgb<u8>) {
        if self.inverted {
            (named::WHITE, named::BLACK)
        } else {
            (named::BLACK, named::WHITE)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelScene {
    outer_ring: Shape,
    inner_ring: Shape,
    vertical_axis: Shape,
    horizontal_axis: Shape,
    background: Srgb<u8>,
    properties: SceneProperties,
    rotation_deg: f64,
}

impl WheelScene {
    pub fn new(properties: SceneProperties) -> Self {
        let outer = config::OUTER_RADIUS_PX;
        let (background, foreground) = properties.colors();
        let pen = Pen {
            color: foreground,
            width: properties.thickness,
        };
        Self {
            outer_ring: Shape {
                geometry: Geometry::Ring { radius: outer },
                pen,
            },
            inner_ring: Shape {
                geometry: Geometry::Ring {
                    radius: properties.inner_radius_px,
                },
                pen,
            },
            vertical_axis: Shape {
                geometry: Geometry::Segment {
                    from: Vec2::new(0.0, -outer),
                    to: Vec2::new(0.0, outer),
                },
                pen,
            },
            horizontal_axis: Shape {
                geometry: Geometry::Segment {
                    from: Vec2::new(-outer, 0.0),
                    to: Vec2::new(outer, 0.0),
                },
                pen,
            },
            background,
            properties,
            rotation_deg: 0.0,
        }
    }

    /// Restyle every shape, resize the inner ring and rescale the group.
    pub fn apply_properties(&mut self, properties: SceneProperties) {
        let (background, foreground) = properties.colors();
        self.background = background;
        for id in ShapeId::ALL {
            let shape = self.shape_mut(id);
            shape.pen = Pen {
                color: foreground,
                width: properties.thickness,
            };
        }
        self.inner_ring.geometry = Geometry::Ring {
            radius: properties.inner_radius_px,
        };
        self.properties = properties;
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        match id {
            ShapeId::OuterRing => &self.outer_ring,
            ShapeId::InnerRing => &self.inner_ring,
            ShapeId::VerticalAxis => &self.vertical_axis,
            ShapeId::HorizontalAxis => &self.horizontal_axis,
        }
    }

    fn shape_mut(&mut self, id: ShapeId) -> &mut Shape {
        match id {
            ShapeId::OuterRing => &mut self.outer_ring,
            ShapeId::InnerRing => &mut self.inner_ring,
            ShapeId::VerticalAxis => &mut self.vertical_axis,
            ShapeId::HorizontalAxis => &mut self.horizontal_axis,
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        ShapeId::ALL.into_iter().map(move |id| (id, self.shape(id)))
    }

    pub fn background(&self) -> Srgb<u8> {
        self.background
    }

    pub fn properties(&self) -> SceneProperties {
        self.properties
    }

    /// Group rotation in degrees, as last set by the renderer's interpolation.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn set_rotation(&mut self, rotation_deg: f64) {
        self.rotation_deg = rotation_deg;
    }

    /// Axis endpoints after the group's scale and rotation. `None` for rings.
    pub fn transformed_axis(&self, id: ShapeId) -> Option<(Vec2, Vec2)> {
        match self.shape(id).geometry {
            Geometry::Segment { from, to } => Some((self.transform(from), self.transform(to))),
            Geometry::Ring { .. } => None,
        }
    }

    /// Ring radius after the group's scale. Rotation leaves rings unchanged.
    pub fn transformed_ring_radius(&self, id: ShapeId) -> Option<f32> {
        match self.shape(id).geometry {
            Geometry::Ring { radius } => Some(radius * self.properties.scale),
            Geometry::Segment { .. } => None,
        }
    }

    fn transform(&self, point: Vec2) -> Vec2 {
        let (sin, cos) = (self.rotation_deg.to_radians() as f32).sin_cos();
        let p = point * self.properties.scale;
        Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
    }
}

impl Default for WheelScene {
    fn default() -> Self {
        Self::new(SceneProperties::default())
    }
}
