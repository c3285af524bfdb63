pub mod command_router;
pub mod interaction_router;
