mod final_handler;
mod register_handlers;

pub use final_handler::{wrap_final_handler, FinalHandler};
