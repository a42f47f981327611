//! Conversion run lifecycle: acquire frames, encode them in order, assemble the document.

pub mod run;
pub mod threading;

pub use run::{ConversionOutput, Converter, ProgressObserver, RunControl, RunState, convert};
pub use threading::Threading;
