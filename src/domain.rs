// Pure pull request logic: no process, network or terminal access here

pub mod branch;
pub mod pipeline;
pub mod pull_request;
pub mod question;
pub mod render;
