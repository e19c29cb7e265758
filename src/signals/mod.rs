// =============================================================================
// Signal Detection Module
// =============================================================================
//
// Consumes the aligned indicator series and turns the most recent two samples
// into a single trading signal.  Stateless: every evaluation starts from the
// series it is handed and nothing carries over to the next cycle.

pub mod crossover;

pub use crossover::{detect_signal, Signal};
