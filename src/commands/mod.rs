mod identify;
mod misc;
mod run;
mod transcribe;

pub use identify::cmd_identify;
pub use misc::cmd_doctor;
pub use run::cmd_run;
pub use transcribe::cmd_transcribe;
