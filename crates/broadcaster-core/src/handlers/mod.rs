//! Handler contracts and the immutable registries built at startup

mod registry;
mod traits;

pub use registry::{LifecycleHandlers, RequestHandlers};
pub use traits::{LifecycleHandler, RequestHandler};
