//! Draw hooks
//!
//! The simulation never touches real drawing primitives. Entities describe
//! themselves to a `Surface`, and the host supplies the implementation.

pub mod shapes;
pub mod surface;

pub use shapes::Draw;
pub use surface::{Color, DrawCommand, RecordingSurface, Surface};
