//! GPU rendering subsystem.
//!
//! One renderer, one pass: `QuadRenderer` owns the linked shader program,
//! the static full-screen quad, and the per-frame uniform buffer, and issues
//! a single 6-vertex triangle-list draw per frame. The image itself is the
//! fragment shader's business.

mod ctx;
mod quad;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::{QuadRenderer, QuadVertex};
pub use uniforms::FrameUniforms;
