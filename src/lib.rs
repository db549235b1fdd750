#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod text_box;

pub use app::CanvasApp;
pub use command::{Command, CommandError, History, Outcome};
pub use config::EditorConfig;
pub use document::{Document, Snapshot};
pub use error::{ConfigError, ExportError};
pub use input::{InputEvent, InteractionState};
pub use renderer::{render_document, ApproximateMeasurer, RenderSurface, TextMeasurer};
pub use session::EditorSession;
pub use text_box::{FieldChange, FontFace, StyleFlag, TextBox, TextBoxId, TextBoxPatch, TextBoxTemplate};
