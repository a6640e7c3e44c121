// Data types shared between the remote API clients, handlers and views

pub mod errors;
pub mod quote;
