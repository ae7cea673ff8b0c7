mod ocr_command;
pub use ocr_command::*;

mod plugins_command;
pub use plugins_command::*;
