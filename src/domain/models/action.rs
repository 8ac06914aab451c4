use super::ChatRequest;

pub enum Action {
    BackendRequest(ChatRequest),
}
