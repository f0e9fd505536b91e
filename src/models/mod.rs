pub mod control_event;
pub mod sample;
pub mod track;
