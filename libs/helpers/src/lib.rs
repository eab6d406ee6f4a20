pub mod corpus;
pub mod documents;
