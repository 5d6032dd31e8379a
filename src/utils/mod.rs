pub mod format;
pub mod tokenomics;

pub use tokenomics::TokenomicsCalculator;
