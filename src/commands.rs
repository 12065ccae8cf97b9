// Command handlers module

pub mod open;
