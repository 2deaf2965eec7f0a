pub mod src {
    pub mod analyzer;
    pub mod imports;
}

#[cfg(test)]
mod test;

pub use src::analyzer::{Cycle, CycleAnalyzer, CycleHandlingStrategy};
pub use src::imports::ImportGraph;
