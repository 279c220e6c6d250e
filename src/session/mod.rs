pub mod exec;
pub mod invocation;

pub use exec::exec_into;
pub use invocation::Invocation;
