mod execute_context;
mod operation;


pub use execute_context::ExecuteContext;
pub use operation::Operation;
