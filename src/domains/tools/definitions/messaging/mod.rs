//! WhatsApp delivery tools.

mod send_image;
mod send_message;

pub use send_image::{SendImageParams, SendImageTool};
pub use send_message::{SendMessageParams, SendMessageTool};
