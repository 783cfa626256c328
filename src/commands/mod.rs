mod syllables;
mod translate;

pub use syllables::*;
pub use translate::*;
