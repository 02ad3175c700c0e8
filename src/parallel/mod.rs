pub use self::communicator::{Communicator, SingleProcess};
pub use self::thread_communicator::ThreadCommunicator;

mod communicator;
mod thread_communicator;
