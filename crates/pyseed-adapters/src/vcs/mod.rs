//! Version-control adapters.

mod git;
mod recording;

pub use git::GitCli;
pub use recording::{RecordingVcs, VcsCall, VcsStep};
