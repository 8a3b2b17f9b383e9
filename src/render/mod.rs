pub mod live;

pub use live::{DocumentStyle, LiveStyleApplier, StyleScope};
