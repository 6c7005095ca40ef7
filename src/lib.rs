//! Taskboard: client-side core of a kanban task board.
//!
//! This crate holds the state and coordination logic behind a project's task
//! board: the four status columns, optimistic drag-and-drop moves with
//! rollback, and the create/edit/view dialog with its comment thread.
//! Rendering is left to the caller.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, comments, and statuses with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the task backend and the
//!   notification surface
//! - **Adapters**: Concrete implementations of ports (in-memory backend,
//!   tracing notifier)
//! - **Services**: The board controller, drag coordinator, and edit session
//!
//! # Modules
//!
//! - [`board`]: Kanban board state, drag handling, and task dialogs

pub mod board;
