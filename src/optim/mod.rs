pub mod guidelines;
pub mod portions;
pub mod solver;

pub use guidelines::{GramRange, PortionGuidelines};
pub use portions::{
    MacroTargets, MealNutrition, OptimizedPortions, OptimizerConfig, Portion, PortionOptimizer,
    PortionOutcome,
};
pub use solver::SolveOptions;
