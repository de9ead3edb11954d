// Book artifact storage — pluggable writers used by the persistence fan-out.

pub mod fs_writer;
pub mod traits;
