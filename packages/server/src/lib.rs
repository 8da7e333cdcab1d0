//! WebSocket message relay library.
//!
//! Every message a client sends is rebroadcast to all other connected
//! clients, and newly connected clients are greeted with the most recent
//! messages.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
