#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod event;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod surface;
pub mod tools;
pub mod viewport;

pub use app::CanvasApp;
pub use canvas::Canvas;
pub use command::{Command, CommandError, CommandHistory};
pub use config::CanvasConfig;
pub use document::Document;
pub use element::{Element, ElementId, ElementType};
pub use event::{CanvasEvent, EventHandler};
pub use input::{InputEvent, InputSource};
pub use persistence::PersistenceError;
pub use renderer::{RenderSurface, Renderer};
pub use tools::Mode;
pub use viewport::Viewport;
