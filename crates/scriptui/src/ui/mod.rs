//! UI engine objects exposed to script callers
//!
//! These are the objects scripts create and address through handles. They
//! carry just enough state to exercise the resource lifecycle: rendering,
//! layout and input routing belong to the host UI library.
//!
//! - [`Context`]: top-level UI context owning viewports and draw lists
//! - [`Font`], [`TextFilter`], [`Function`]: standalone resources that can
//!   be attached to a context
//! - [`ListClipper`]: only valid while the context it was created for lives
//! - [`ViewportProxy`], [`DrawListProxy`]: tagged views into a context

pub mod context;
pub mod draw_list;
pub mod font;
pub mod function;
pub mod list_clipper;
pub mod text_filter;
pub mod viewport;

pub use context::{Context, ContextFlags};
pub use draw_list::{DrawCommand, DrawList, DrawListProxy};
pub use font::{Font, FontFlags, FontSource, GenericFamily};
pub use function::{Function, ProgramRuntime, ProgramState};
pub use list_clipper::ListClipper;
pub use text_filter::TextFilter;
pub use viewport::{Viewport, ViewportProxy};
