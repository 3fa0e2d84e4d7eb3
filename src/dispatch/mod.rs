//! Function dispatch.
//!
//! Resource types may expose named side-effecting actions ("functions")
//! beyond attribute and relationship reads and writes. Each type declares
//! the names on its descriptor and binds a [`FunctionHandler`] per name in
//! a [`FunctionTable`]; the [`FunctionDispatcher`] routes invocations.

mod dispatcher;
mod handler;
mod table;

pub use dispatcher::FunctionDispatcher;
pub use handler::{FnHandler, FunctionCall, FunctionContext, FunctionHandler, HandlerError};
pub use table::FunctionTable;
