//! Kanban task board for one project.
//!
//! The board keeps a project's tasks in memory, renders them as four status
//! columns, moves cards between columns by drag-and-drop, and runs the
//! create/edit/view dialog with its comment thread. Every change goes
//! through an injected task service; failures reach the user through an
//! injected notifier. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Board services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
