use tui_textarea::Input;

use super::ChatApiError;
use super::ChatReply;

pub enum Event {
    BackendReply(Result<ChatReply, ChatApiError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLL(),
    KeyboardCTRLY(),
    KeyboardEnter(),
    KeyboardPaste(String),
    KeyboardQuickAsk(usize),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
