use std::fmt::{self, Display, Formatter};
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Shapes that can be drawn filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect(Rect),
    Circle { x: i32, y: i32, radius: u32 },
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Rect(rect) => write!(f, "rect {}", rect),
            Shape::Circle { x, y, radius } => write!(f, "circle {} {} {}", x, y, radius),
        }
    }
}

/// One line of the command stream.
///
/// `Display` produces the exact wire line, without the trailing newline.
/// `FromStr` accepts any whitespace between tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Window { width: u32, height: u32 },
    Title(String),
    Color(Color),
    Clear,
    Rect(Rect),
    Fill(Shape),
    Outline(Shape),
    Point { x: i32, y: i32 },
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    Present,
    Handle,
}

impl Command {
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Window { .. } => "window",
            Command::Title(_) => "title",
            Command::Color(_) => "color",
            Command::Clear => "clear",
            Command::Rect(_) => "rect",
            Command::Fill(_) => "fill",
            Command::Outline(_) => "outline",
            Command::Point { .. } => "point",
            Command::Line { .. } => "line",
            Command::Present => "present",
            Command::Handle => "handle",
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::Window { width, height } => write!(f, "window {} {}", width, height),
            Command::Title(text) => write!(f, "title {}", text),
            Command::Color(color) => write!(f, "color {}", color),
            Command::Rect(rect) => write!(f, "rect {}", rect),
            Command::Fill(shape) => write!(f, "fill {}", shape),
            Command::Outline(shape) => write!(f, "outline {}", shape),
            Command::Point { x, y } => write!(f, "point {} {}", x, y),
            Command::Line { x1, y1, x2, y2 } => write!(f, "line {} {} {} {}", x1, y1, x2, y2),
            Command::Clear | Command::Present | Command::Handle => f.write_str(self.keyword()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty line")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("unknown shape `{0}`, expected `rect` or `circle`")]
    UnknownShape(String),

    #[error("`{command}` is missing its {name} argument")]
    MissingArgument {
        command: &'static str,
        name: &'static str,
    },

    #[error("`{command}` expected a number for {name}, got `{value}`")]
    InvalidNumber {
        command: &'static str,
        name: &'static str,
        value: String,
    },

    #[error("`{command}` takes no further arguments, got `{extra}`")]
    TrailingArguments {
        command: &'static str,
        extra: String,
    },
}

/// Pulls typed arguments off the remaining tokens of a line.
struct Args<'a> {
    command: &'static str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(command: &'static str, tokens: SplitWhitespace<'a>) -> Self {
        Self { command, tokens }
    }

    fn word(&mut self, name: &'static str) -> Result<&'a str, ParseCommandError> {
        self.tokens
            .next()
            .ok_or(ParseCommandError::MissingArgument {
                command: self.command,
                name,
            })
    }

    fn number<T: FromStr>(&mut self, name: &'static str) -> Result<T, ParseCommandError> {
        let value = self.word(name)?;
        value.parse().map_err(|_| ParseCommandError::InvalidNumber {
            command: self.command,
            name,
            value: value.to_string(),
        })
    }

    fn color(&mut self) -> Result<Color, ParseCommandError> {
        Ok(Color::new(
            self.number("red")?,
            self.number("green")?,
            self.number("blue")?,
        ))
    }

    fn rect(&mut self) -> Result<Rect, ParseCommandError> {
        Ok(Rect::new(
            self.number("x")?,
            self.number("y")?,
            self.number("width")?,
            self.number("height")?,
        ))
    }

    fn shape(&mut self) -> Result<Shape, ParseCommandError> {
        match self.word("shape")? {
            "rect" => Ok(Shape::Rect(self.rect()?)),
            "circle" => Ok(Shape::Circle {
                x: self.number("x")?,
                y: self.number("y")?,
                radius: self.number("radius")?,
            }),
            other => Err(ParseCommandError::UnknownShape(other.to_string())),
        }
    }

    fn finish<T>(mut self, command: T) -> Result<T, ParseCommandError> {
        let rest: Vec<&str> = self.tokens.by_ref().collect();
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(ParseCommandError::TrailingArguments {
                command: self.command,
                extra: rest.join(" "),
            })
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim_start()),
            None => (line, ""),
        };

        // Title text is free-form, everything after the keyword belongs to it
        if keyword == "title" {
            if rest.is_empty() {
                return Err(ParseCommandError::MissingArgument {
                    command: "title",
                    name: "text",
                });
            }
            return Ok(Command::Title(rest.to_string()));
        }

        let tokens = rest.split_whitespace();
        match keyword {
            "" => Err(ParseCommandError::Empty),
            "window" => {
                let mut args = Args::new("window", tokens);
                let command = Command::Window {
                    width: args.number("width")?,
                    height: args.number("height")?,
                };
                args.finish(command)
            }
            "color" => {
                let mut args = Args::new("color", tokens);
                let command = Command::Color(args.color()?);
                args.finish(command)
            }
            "rect" => {
                let mut args = Args::new("rect", tokens);
                let command = Command::Rect(args.rect()?);
                args.finish(command)
            }
            "fill" => {
                let mut args = Args::new("fill", tokens);
                let command = Command::Fill(args.shape()?);
                args.finish(command)
            }
            "outline" => {
                let mut args = Args::new("outline", tokens);
                let command = Command::Outline(args.shape()?);
                args.finish(command)
            }
            "point" => {
                let mut args = Args::new("point", tokens);
                let command = Command::Point {
                    x: args.number("x")?,
                    y: args.number("y")?,
                };
                args.finish(command)
            }
            "line" => {
                let mut args = Args::new("line", tokens);
                let command = Command::Line {
                    x1: args.number("x1")?,
                    y1: args.number("y1")?,
                    x2: args.number("x2")?,
                    y2: args.number("y2")?,
                };
                args.finish(command)
            }
            "clear" => Args::new("clear", tokens).finish(Command::Clear),
            "present" => Args::new("present", tokens).finish(Command::Present),
            "handle" => Args::new("handle", tokens).finish(Command::Handle),
            other => Err(ParseCommandError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_exact_wire_lines() {
        assert_eq!(
            Command::Window {
                width: 400,
                height: 400
            }
            .to_string(),
            "window 400 400"
        );
        assert_eq!(
            Command::Title("A Rectangle".into()).to_string(),
            "title A Rectangle"
        );
        assert_eq!(Command::Color(Color::RED).to_string(), "color 255 0 0");
        assert_eq!(
            Command::Rect(Rect::new(50, 50, 100, 100)).to_string(),
            "rect 50 50 100 100"
        );
        assert_eq!(
            Command::Fill(Shape::Circle {
                x: 35,
                y: 221,
                radius: 12
            })
            .to_string(),
            "fill circle 35 221 12"
        );
        assert_eq!(Command::Present.to_string(), "present");
    }

    #[test]
    fn parses_loose_whitespace() {
        assert_eq!(
            "  rect   50 50\t100 100 ".parse(),
            Ok(Command::Rect(Rect::new(50, 50, 100, 100)))
        );
        assert_eq!(
            "fill rect -5 200 100 20".parse(),
            Ok(Command::Fill(Shape::Rect(Rect::new(-5, 200, 100, 20))))
        );
        assert_eq!(
            "line 0 0 10 -10".parse(),
            Ok(Command::Line {
                x1: 0,
                y1: 0,
                x2: 10,
                y2: -10
            })
        );
    }

    #[test]
    fn title_keeps_inner_spaces() {
        assert_eq!(
            "title  a moving car".parse(),
            Ok(Command::Title("a moving car".into()))
        );
        assert_eq!(
            "title".parse::<Command>(),
            Err(ParseCommandError::MissingArgument {
                command: "title",
                name: "text"
            })
        );
    }

    #[test]
    fn reports_bad_lines() {
        assert_eq!("   ".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "draw 1 2".parse::<Command>(),
            Err(ParseCommandError::UnknownCommand("draw".into()))
        );
        assert_eq!(
            "fill square 1 2 3".parse::<Command>(),
            Err(ParseCommandError::UnknownShape("square".into()))
        );
        assert_eq!(
            "color 255 0".parse::<Command>(),
            Err(ParseCommandError::MissingArgument {
                command: "color",
                name: "blue"
            })
        );
        assert_eq!(
            "color 256 0 0".parse::<Command>(),
            Err(ParseCommandError::InvalidNumber {
                command: "color",
                name: "red",
                value: "256".into()
            })
        );
        assert_eq!(
            "clear now".parse::<Command>(),
            Err(ParseCommandError::TrailingArguments {
                command: "clear",
                extra: "now".into()
            })
        );
    }

    #[test]
    fn every_variant_parses_back_from_its_line() {
        let commands = [
            Command::Window {
                width: 640,
                height: 480,
            },
            Command::Title("a moving car".into()),
            Command::Color(Color::new(151, 244, 247)),
            Command::Clear,
            Command::Rect(Rect::new(-3, 7, 10, 20)),
            Command::Fill(Shape::Rect(Rect::new(10, 200, 100, 20))),
            Command::Fill(Shape::Circle {
                x: 35,
                y: 221,
                radius: 12,
            }),
            Command::Outline(Shape::Rect(Rect::new(0, 0, 5, 5))),
            Command::Outline(Shape::Circle {
                x: -1,
                y: 2,
                radius: 3,
            }),
            Command::Point { x: 4, y: -4 },
            Command::Line {
                x1: 1,
                y1: 2,
                x2: 3,
                y2: 4,
            },
            Command::Present,
            Command::Handle,
        ];

        for command in commands {
            let line = command.to_string();
            assert!(line.starts_with(command.keyword()), "{}", line);
            assert_eq!(line.parse::<Command>(), Ok(command));
        }
        assert_eq!(
            "outline circle -1 2 3".parse(),
            Ok(Command::Outline(Shape::Circle {
                x: -1,
                y: 2,
                radius: 3
            }))
        );
        assert_eq!("point 4 -4".parse(), Ok(Command::Point { x: 4, y: -4 }));
    }

    #[test]
    fn error_messages_name_the_argument() {
        let err = "rect 1 2 x 4".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "`rect` expected a number for width, got `x`");
    }
}
