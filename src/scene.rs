use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::core::{Color, Command, Rect, Shape};

/// Source of the commands the emitter writes.
///
/// `header` is written once before the first frame, `frame` once per loop
/// iteration. Every frame should end by presenting and handling events so a
/// consumer can keep its window responsive.
pub trait Scene {
    fn header(&self) -> Vec<Command>;
    fn frame(&self, index: u64) -> Vec<Command>;
}

/// A red square on a white background, the same every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleScene;

impl Scene for RectangleScene {
    fn header(&self) -> Vec<Command> {
        vec![
            Command::Window {
                width: 400,
                height: 400,
            },
            Command::Title("A Rectangle".to_string()),
        ]
    }

    fn frame(&self, _index: u64) -> Vec<Command> {
        vec![
            Command::Color(Color::WHITE),
            Command::Clear,
            Command::Color(Color::RED),
            Command::Rect(Rect::new(50, 50, 100, 100)),
            Command::Present,
            Command::Handle,
        ]
    }
}

/// A car that drives one pixel to the right every frame.
#[derive(Debug, Clone, Copy)]
pub struct MovingCarScene {
    pub start_x: i32,
}

impl Default for MovingCarScene {
    fn default() -> Self {
        Self { start_x: 10 }
    }
}

impl MovingCarScene {
    fn position(&self, index: u64) -> i32 {
        // The car leaves the window long before this saturates
        let offset = i32::try_from(index).unwrap_or(i32::MAX);
        self.start_x.saturating_add(offset)
    }
}

impl Scene for MovingCarScene {
    fn header(&self) -> Vec<Command> {
        vec![
            Command::Window {
                width: 400,
                height: 400,
            },
            Command::Title("a moving car".to_string()),
        ]
    }

    fn frame(&self, index: u64) -> Vec<Command> {
        let x = self.position(index);
        let wheel = |dx: i32| {
            Command::Fill(Shape::Circle {
                x: x.saturating_add(dx),
                y: 221,
                radius: 12,
            })
        };

        vec![
            Command::Color(Color::SKY),
            Command::Clear,
            // body
            Command::Color(Color::HOT_PINK),
            Command::Fill(Shape::Rect(Rect::new(x, 200, 100, 20))),
            Command::Fill(Shape::Rect(Rect::new(x.saturating_add(15), 178, 70, 40))),
            // wheels
            Command::Color(Color::CHARCOAL),
            wheel(25),
            wheel(75),
            Command::Present,
            Command::Handle,
        ]
    }
}

/// Scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    #[default]
    Rectangle,
    Car,
}

impl SceneKind {
    pub const NAMES: [&'static str; 2] = ["rectangle", "car"];

    pub fn build(self) -> Box<dyn Scene> {
        match self {
            SceneKind::Rectangle => Box::new(RectangleScene),
            SceneKind::Car => Box::new(MovingCarScene::default()),
        }
    }
}

impl Display for SceneKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SceneKind::Rectangle => write!(f, "rectangle"),
            SceneKind::Car => write!(f, "car"),
        }
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(SceneKind::Rectangle),
            "car" => Ok(SceneKind::Car),
            other => Err(format!("unknown scene `{}`", other)),
        }
    }
}
