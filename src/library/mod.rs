//! Ready-made tween kinds and the minimal target models they drive.
//!
//! Every kind is generic over a small capability trait, so host types can be
//! animated by implementing e.g. [`Fade`] or [`Tint`]. The default type
//! parameter is the bundled in-memory model.

mod alpha;
mod color;
mod delayed;
mod line;
mod material;
mod scale;

pub use alpha::{AlphaFade, CanvasGroup, Fade};
pub use color::{ColorBlend, Graphic, Tint};
pub use delayed::{Behaviour, DelayedTrigger};
pub use line::{AlphaKey, AlphaKeyed, Gradient, LineAlpha, LineRenderer};
pub use material::{Image, Material, MaterialFloat, MaterialParams};
pub use scale::{ScaleTo, Scalable, Transform};
