mod common;
mod wizard;
