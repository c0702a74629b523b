pub mod api_connection;
pub mod cli;
pub mod corpus;
pub mod filter;
pub mod instructions;
pub mod optim;
pub mod pipeline;
pub mod plan;
pub mod profile;
pub mod ranker;
pub mod selector;
pub mod targets;
