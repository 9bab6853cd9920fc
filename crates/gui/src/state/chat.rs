use shared::ChatLog;

/// Chat log plus the text being typed
#[derive(Default)]
pub struct ChatState {
    pub log: ChatLog,
    pub input: String,
}

impl ChatState {
    /// Send the current input. Blank input is ignored and left in place.
    pub fn send_message(&mut self) -> bool {
        if self.log.send(&self.input).is_none() {
            return false;
        }
        self.input.clear();
        true
    }
}
