mod backend_kind;
mod level;
mod sink;

pub use backend_kind::*;
pub use level::*;
pub use sink::*;
