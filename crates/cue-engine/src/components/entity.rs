use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::ball::{Ball, BallColor};

/// What kind of primitive the renderer should draw for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Ball,
    Spot,
}

/// Draw data for one table object. Independent of any drawing API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawShape {
    pub kind: ShapeKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BallColor,
    pub alpha: f32,
}

/// Capability set shared by everything that lives on the table.
pub trait Actor {
    /// Step the object forward by `dt` seconds.
    fn advance(&mut self, dt: f32);
    /// Data the renderer needs to draw the object this frame.
    fn draw_shape(&self) -> DrawShape;
}

impl Actor for Ball {
    fn advance(&mut self, dt: f32) {
        Ball::advance(self, dt);
    }

    fn draw_shape(&self) -> DrawShape {
        DrawShape {
            kind: ShapeKind::Ball,
            pos: self.pos,
            radius: self.radius,
            color: self.color,
            alpha: 1.0,
        }
    }
}

/// A printed marking on the felt (head spot, foot spot). Never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    pub pos: Vec2,
    pub radius: f32,
}

impl Spot {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

impl Actor for Spot {
    fn advance(&mut self, _dt: f32) {}

    fn draw_shape(&self) -> DrawShape {
        DrawShape {
            kind: ShapeKind::Spot,
            pos: self.pos,
            radius: self.radius,
            color: BallColor::WHITE,
            alpha: 0.35,
        }
    }
}

/// Closed set of things that can be placed on the table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableObject {
    Ball(Ball),
    Spot(Spot),
}

impl TableObject {
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            TableObject::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            TableObject::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            TableObject::Ball(ball) => ball.pos,
            TableObject::Spot(spot) => spot.pos,
        }
    }
}

impl Actor for TableObject {
    fn advance(&mut self, dt: f32) {
        match self {
            TableObject::Ball(ball) => ball.advance(dt),
            TableObject::Spot(spot) => spot.advance(dt),
        }
    }

    fn draw_shape(&self) -> DrawShape {
        match self {
            TableObject::Ball(ball) => ball.draw_shape(),
            TableObject::Spot(spot) => spot.draw_shape(),
        }
    }
}

impl From<Ball> for TableObject {
    fn from(ball: Ball) -> Self {
        TableObject::Ball(ball)
    }
}

impl From<Spot> for TableObject {
    fn from(spot: Spot) -> Self {
        TableObject::Spot(spot)
    }
}

/// A table object with identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are neither advanced, bounced nor drawn.
    pub active: bool,
    pub object: TableObject,
}

impl Entity {
    pub fn new(id: EntityId, object: impl Into<TableObject>) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            object: object.into(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.object.as_ball()
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.object.as_ball_mut()
    }
}
