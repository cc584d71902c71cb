//! Geometrieverändernde Use-Cases. Alle laufen über `transaction::execute`.

mod add_vertex;
mod grow;
mod recolor;
mod redraw;
mod remove_vertex;
mod start;
mod transform;

pub use add_vertex::add_vertex;
pub use grow::grow;
pub use recolor::recolor_vertex;
pub use redraw::redraw;
pub use remove_vertex::remove_vertex;
pub use start::start_triangle;
pub use transform::{fit_to_bounds, transform};
